//! Persistent BIN cache port.
//!
//! The resolver consults a key-value cache keyed by 6-digit BIN before it
//! touches the network, and writes back every external or offline resolution.
//! The cache is append/update-only: entries are created lazily on first
//! resolution and never expire (BIN reassignment over time is a known
//! limitation with no refresh path short of manual deletion).
//!
//! Implementations:
//!
//! - [`MemoryBinCache`] - in-memory map, for tests and embedding
//! - [`SqliteBinCache`] - SQLite-backed store (requires the `cache-sqlite`
//!   feature)
//! - [`NoopBinCache`] - always misses and discards writes, for environments
//!   without a durable store
//!
//! # Example
//!
//! ```rust,ignore
//! use bin_resolver::cache::{BinCache, SqliteBinCache};
//!
//! let cache = SqliteBinCache::open("bin_cache.db")?;
//! if let Some(entry) = cache.get("411111").await? {
//!     println!("bank: {:?}", entry.bank_name);
//! }
//! ```

mod memory;
mod noop;

#[cfg(feature = "cache-sqlite")]
mod sqlite;

pub use memory::MemoryBinCache;
pub use noop::NoopBinCache;

#[cfg(feature = "cache-sqlite")]
pub use sqlite::SqliteBinCache;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::details::CardDetails;
use crate::error::CacheError;
use crate::scheme::CardScheme;

/// A persisted cache row for one BIN.
///
/// `scheme` and `card_type` are stored as plain strings rather than enums:
/// collaborators outside this crate may upsert rows opportunistically, and
/// the cache must tolerate entries it did not itself create.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BinCacheEntry {
    /// Exactly 6 ASCII digits, unique key.
    pub bin: String,

    /// Issuer display name.
    pub bank_name: Option<String>,

    /// Card type, lower case.
    pub card_type: Option<String>,

    /// Card network name, lower case.
    pub scheme: Option<String>,

    /// Issuing country display name.
    pub country: Option<String>,

    /// Issuer-assigned tier, passthrough.
    pub card_tier: Option<String>,

    /// Advisory Luhn flag recorded at resolution time. Defaults to true
    /// when the source supplied none.
    pub is_valid: bool,

    /// Set once on first insert.
    pub created_at: DateTime<Utc>,

    /// Refreshed on every resolved write.
    pub updated_at: DateTime<Utc>,
}

impl BinCacheEntry {
    /// Builds a fresh entry from resolved details, stamping both timestamps
    /// with the current time.
    pub fn from_details(bin: &str, details: &CardDetails) -> Self {
        let now = Utc::now();
        Self {
            bin: bin.to_string(),
            bank_name: details.bank_name.clone(),
            card_type: details.card_type.clone(),
            scheme: details.scheme.map(|s| s.name().to_string()),
            country: details.country.clone(),
            card_tier: details.card_tier.clone(),
            is_valid: details.is_valid.unwrap_or(true),
            created_at: now,
            updated_at: now,
        }
    }

    /// Maps the stored row to the resolver's output shape.
    pub fn to_details(&self) -> CardDetails {
        CardDetails {
            bank_name: self.bank_name.clone(),
            card_type: self.card_type.clone(),
            scheme: self.scheme.as_deref().map(CardScheme::from_name),
            country: self.country.clone(),
            is_valid: Some(self.is_valid),
            card_tier: self.card_tier.clone(),
        }
    }
}

/// Trait for BIN cache implementations.
///
/// Implementations must support concurrent calls: `upsert` is required to be
/// atomic per BIN (insert-if-absent, else update every resolvable field and
/// `updated_at`), so that two concurrent first-time resolutions of the same
/// BIN leave exactly one row with the last writer's field values.
#[async_trait]
pub trait BinCache: Send + Sync {
    /// Looks up a cache entry by exact BIN match.
    async fn get(&self, bin: &str) -> Result<Option<BinCacheEntry>, CacheError>;

    /// Inserts or updates the entry for `bin` with the given details.
    ///
    /// On update, `created_at` is preserved and `updated_at` refreshed.
    async fn upsert(&self, bin: &str, details: &CardDetails) -> Result<(), CacheError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_from_details_defaults_valid() {
        let details = CardDetails {
            bank_name: Some("Test Bank".into()),
            ..Default::default()
        };
        let entry = BinCacheEntry::from_details("411111", &details);

        assert_eq!(entry.bin, "411111");
        assert_eq!(entry.bank_name.as_deref(), Some("Test Bank"));
        // No validity flag supplied: recorded as true
        assert!(entry.is_valid);
        assert_eq!(entry.created_at, entry.updated_at);
    }

    #[test]
    fn test_entry_round_trip() {
        let details = CardDetails {
            bank_name: Some("Chase".into()),
            card_type: Some("credit".into()),
            scheme: Some(CardScheme::Mastercard),
            country: Some("United States".into()),
            is_valid: Some(false),
            card_tier: Some("Platinum".into()),
        };
        let entry = BinCacheEntry::from_details("555555", &details);
        assert_eq!(entry.scheme.as_deref(), Some("mastercard"));

        let back = entry.to_details();
        assert_eq!(back, details);
    }

    #[test]
    fn test_foreign_scheme_string_tolerated() {
        // A collaborator wrote a scheme this crate doesn't model
        let mut entry = BinCacheEntry::from_details("620000", &CardDetails::default());
        entry.scheme = Some("unionpay".into());

        assert_eq!(entry.to_details().scheme, Some(CardScheme::Unknown));
    }
}
