//! The resolver's output value.

use serde::{Deserialize, Serialize};

use crate::scheme::CardScheme;

/// Best-effort metadata for a resolved BIN.
///
/// A fresh value is constructed per resolution call; it carries no identity
/// and is not persisted directly (the cache stores
/// [`BinCacheEntry`](crate::cache::BinCacheEntry) rows instead).
///
/// All fields are optional because every resolution tier fills in only what
/// it knows. `is_valid` is advisory: the offline fallback computes it from
/// the full card number via Luhn, while the external service reports its own
/// flag for whatever it was given. The two notions are not reconciled.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CardDetails {
    /// Issuing bank display name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bank_name: Option<String>,

    /// Card type, normalized to lower case (e.g. "credit", "debit").
    #[serde(skip_serializing_if = "Option::is_none")]
    pub card_type: Option<String>,

    /// Card network.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scheme: Option<CardScheme>,

    /// Issuing country display name. The offline fallback uses the literal
    /// placeholder "Unknown" since its table carries no country data.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,

    /// Whether the number passed a Luhn check at resolution time.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_valid: Option<bool>,

    /// Issuer-assigned tier (e.g. "Platinum"). Passthrough, no validation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub card_tier: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_empty() {
        let details = CardDetails::default();
        assert!(details.bank_name.is_none());
        assert!(details.scheme.is_none());
        assert!(details.is_valid.is_none());
    }

    #[test]
    fn test_serializes_scheme_lowercase() {
        let details = CardDetails {
            scheme: Some(CardScheme::DinersClub),
            is_valid: Some(true),
            ..Default::default()
        };
        let json = serde_json::to_value(&details).unwrap();
        assert_eq!(json["scheme"], "diners club");
        assert_eq!(json["is_valid"], true);
        // Unset fields are omitted entirely
        assert!(json.get("bank_name").is_none());
    }
}
