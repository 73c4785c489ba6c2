//! Static issuer prefix table for offline BIN lookups.
//!
//! A small embedded table mapping digit prefixes to issuer display names,
//! consulted only when both the cache and the external lookup service have
//! missed. Entries are sorted so lookups use binary search.
//!
//! Scheme-level umbrella prefixes (e.g. every `4xxxxx` being "Visa") are
//! deliberately absent: scheme detection already covers the network, and the
//! resolver leaves `bank_name` unset when no actual issuer is known.
//!
//! # Example
//!
//! ```
//! use bin_resolver::table::issuer_for_bin;
//!
//! assert_eq!(issuer_for_bin("414720"), Some("JP Morgan Chase - Visa Classic"));
//! assert_eq!(issuer_for_bin("999999"), None);
//! ```

/// Issuer entries, sorted by prefix for binary search.
///
/// Keys are digit-string prefixes; a lookup tries the longest prefix of the
/// BIN first (6 digits down to 1), so longer, more specific entries shadow
/// shorter ones.
static ISSUER_PREFIXES: &[(&str, &str)] = &[
    ("341234", "Amex - Green Card"),
    ("371234", "Amex - Gold Card"),
    ("378282", "Amex - Platinum Card"),
    ("402360", "HSBC - Visa Classic"),
    ("414720", "JP Morgan Chase - Visa Classic"),
    ("414738", "Capital One - Visa Platinum"),
    ("422910", "JP Morgan Chase - Visa Signature"),
    ("426395", "Barclays - Visa Rewards"),
    ("431490", "US Bank - Visa Signature"),
    ("438857", "Bank of America - Visa Platinum"),
    ("450140", "Royal Bank of Canada - Visa"),
    ("450141", "TD Canada Trust - Visa"),
    ("450142", "CIBC - Visa"),
    ("450875", "TD Bank - Visa Debit"),
    ("454313", "Lloyds Bank - Visa"),
    ("454314", "HSBC - Visa"),
    ("454742", "Barclays - Visa"),
    ("456767", "Commonwealth Bank - Visa"),
    ("456768", "ANZ - Visa"),
    ("456769", "Westpac - Visa"),
    ("456789", "Wells Fargo - Visa Rewards"),
    ("457173", "Jyske Bank - Visa/Dankort"),
    ("472439", "Wells Fargo - Visa Business"),
    ("491361", "Deutsche Bank - Visa (Germany)"),
    ("491362", "Commerzbank - Visa (Germany)"),
    ("491363", "BNP Paribas - Visa (France)"),
    ("491364", "Société Générale - Visa (France)"),
    ("491365", "UniCredit - Visa (Italy)"),
    ("491366", "Santander - Visa (Spain)"),
    ("491367", "ING - Visa (Netherlands)"),
    ("491368", "Nordea - Visa (Sweden)"),
    ("491369", "Danske Bank - Visa (Denmark)"),
    ("491370", "ICBC - Visa (China)"),
    ("491371", "Bank of China - Visa (China)"),
    ("491372", "Mitsubishi UFJ - Visa (Japan)"),
    ("491373", "Mizuho - Visa (Japan)"),
    ("491374", "DBS - Visa (Singapore)"),
    ("491375", "OCBC - Visa (Singapore)"),
    ("491376", "HDFC - Visa (India)"),
    ("491377", "ICICI - Visa (India)"),
    ("491378", "Emirates NBD - Visa (UAE)"),
    ("491379", "Qatar National Bank - Visa (Qatar)"),
    ("491380", "National Commercial Bank - Visa (Saudi Arabia)"),
    ("491381", "Banco do Brasil - Visa (Brazil)"),
    ("491382", "Itaú - Visa (Brazil)"),
    ("491383", "Bancolombia - Visa (Colombia)"),
    ("491384", "Banco de Chile - Visa (Chile)"),
    ("491385", "Standard Bank - Visa (South Africa)"),
    ("491386", "FirstRand Bank - Visa (South Africa)"),
    ("491387", "Ecobank - Visa (Nigeria)"),
    ("491388", "Commercial International Bank - Visa (Egypt)"),
    ("493428", "Nationwide - Visa"),
    ("512345", "Citibank - Mastercard Gold"),
    ("516732", "PNC Bank - Mastercard Standard"),
    ("519332", "Scotiabank - Mastercard"),
    ("519929", "Santander - Mastercard"),
    ("521234", "Chase - Mastercard Platinum"),
    ("522980", "NAB - Mastercard"),
    ("524366", "Citibank - Mastercard World Elite"),
    ("531234", "Bank of America - Mastercard Rewards"),
    ("551234", "Capital One - Mastercard World"),
    ("552433", "Wells Fargo - Mastercard Business"),
    ("601100", "Discover - It Card"),
    ("644520", "Discover - Miles Card"),
];

/// Looks up the issuer name for a BIN against the embedded table.
///
/// Tries the 6-digit prefix first, then 5, 4, 3, 2, and 1 digits, returning
/// the first hit. Non-digit characters in `bin` make every tier miss.
pub fn issuer_for_bin(bin: &str) -> Option<&'static str> {
    lookup_in(ISSUER_PREFIXES, bin)
}

/// Longest-prefix-first lookup against a sorted prefix table.
fn lookup_in(table: &[(&str, &'static str)], bin: &str) -> Option<&'static str> {
    if !bin.is_ascii() {
        return None;
    }

    for len in (1..=bin.len().min(6)).rev() {
        let prefix = &bin[..len];
        if let Ok(idx) = table.binary_search_by(|(key, _)| (*key).cmp(prefix)) {
            return Some(table[idx].1);
        }
    }

    None
}
