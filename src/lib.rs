//! # bin_resolver
//!
//! Three-tier BIN (Bank Identification Number) resolution for payment cards.
//!
//! Given a card number or 6-digit BIN, the resolver produces a best-effort
//! [`CardDetails`] record (bank name, card type, scheme, country, Luhn
//! validity, card tier) by trying, in order:
//!
//! 1. a persistent key-value cache keyed by BIN,
//! 2. an external BIN-lookup network service,
//! 3. a deterministic offline fallback (scheme prefix rules plus a static
//!    issuer prefix table).
//!
//! External and fallback results are written back to the cache, so each
//! distinct BIN triggers at most one external call. The resolver never
//! errors for a well-formed 6+-digit input: the offline tier is pure
//! computation and always produces a result.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use bin_resolver::{BinResolver, cache::SqliteBinCache, remote::HandyApiClient};
//!
//! let cache = Arc::new(SqliteBinCache::open("bin_cache.db")?);
//! let remote = Arc::new(HandyApiClient::new(std::env::var("HANDY_API_KEY")?)?);
//! let resolver = BinResolver::new(cache).with_remote(remote);
//!
//! let details = resolver.resolve("4111 1111 1111 1111").await;
//! println!("scheme: {:?}, bank: {:?}", details.scheme, details.bank_name);
//! ```
//!
//! ## Offline building blocks
//!
//! The fallback tier is usable on its own:
//!
//! ```
//! use bin_resolver::luhn;
//! use bin_resolver::scheme::{detect_scheme, CardScheme};
//! use bin_resolver::input::extract_digits;
//!
//! let digits = extract_digits("4111-1111-1111-1111");
//! assert!(luhn::validate_card_number(&digits));
//! assert_eq!(detect_scheme(&digits), Some(CardScheme::Visa));
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Description |
//! |---------|-------------|
//! | `cache-sqlite` | SQLite-backed BIN cache (default) |
//! | `server` | REST API wrapper with Swagger UI |
//!
//! ## Caveats
//!
//! - `is_valid` is advisory. The offline tier computes it from the full
//!   card number via Luhn; the external service reports its own flag for
//!   whatever it was given. A 6-digit prefix alone cannot be Luhn-validated
//!   meaningfully.
//! - The cache has no TTL or invalidation. BINs can be reassigned between
//!   issuers over time; refreshing a stale entry requires manual deletion.
//! - Full card numbers are never logged or persisted; only the 6-digit BIN
//!   reaches the cache, the log stream, and the network.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod cache;
pub mod details;
pub mod error;
pub mod input;
pub mod luhn;
pub mod remote;
pub mod resolver;
pub mod scheme;
pub mod table;

// Re-export main types at crate root
pub use details::CardDetails;
pub use error::{CacheError, LookupError};
pub use resolver::BinResolver;
pub use scheme::CardScheme;

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::cache::MemoryBinCache;
    use crate::input::extract_digits;
    use crate::scheme::detect_scheme;

    // Standard test card numbers from payment processors
    const VISA_16: &str = "4111111111111111";
    const MASTERCARD: &str = "5500000000000004";
    const AMEX: &str = "378282246310005";
    const DISCOVER: &str = "6011111111111117";
    const JCB: &str = "3530111333300000";
    const DINERS: &str = "30569309025904";

    #[test]
    fn test_luhn_on_processor_test_cards() {
        for card in [VISA_16, MASTERCARD, AMEX, DISCOVER, JCB, DINERS] {
            assert!(
                luhn::validate_card_number(&extract_digits(card)),
                "{} should pass Luhn",
                card
            );
        }
        assert!(!luhn::validate_card_number(&extract_digits(
            "4111111111111112"
        )));
    }

    #[test]
    fn test_scheme_on_processor_test_cards() {
        let cases = [
            (VISA_16, CardScheme::Visa),
            (MASTERCARD, CardScheme::Mastercard),
            (AMEX, CardScheme::Amex),
            (DISCOVER, CardScheme::Discover),
            (JCB, CardScheme::Jcb),
            (DINERS, CardScheme::DinersClub),
        ];
        for (card, expected) in cases {
            assert_eq!(detect_scheme(&extract_digits(card)), Some(expected));
        }
    }

    #[tokio::test]
    async fn test_resolver_smoke() {
        let resolver = BinResolver::new(Arc::new(MemoryBinCache::new()));
        let details = resolver.resolve(VISA_16).await;
        assert_eq!(details.scheme, Some(CardScheme::Visa));
        assert_eq!(details.is_valid, Some(true));
    }

    #[test]
    fn test_thread_safety() {
        // Ensure the shared types are Send + Sync
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<BinResolver>();
        assert_send_sync::<CardDetails>();
        assert_send_sync::<CardScheme>();
        assert_send_sync::<MemoryBinCache>();
    }
}
