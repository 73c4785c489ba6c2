//! The three-tier BIN resolution pipeline.
//!
//! Given a raw card number or a bare BIN, [`BinResolver::resolve`] tries, in
//! strict order:
//!
//! 1. the persistent BIN cache (no network, no write on hit),
//! 2. the external lookup service (result written back to the cache),
//! 3. a deterministic offline fallback: Luhn over the full number, scheme
//!    prefix rules, and the embedded issuer table (also written back).
//!
//! The pipeline short-circuits on the first tier that produces a result and
//! never surfaces an error for a well-formed 6+-digit input: tier 3 is pure
//! computation and always answers. There are no retries; a single external
//! failure falls through rather than re-dialing the network.
//!
//! Concurrent `resolve` calls are safe. The only shared state is the cache
//! port (whose upsert is atomic per BIN, last writer wins) and the read-only
//! issuer table.

use std::sync::Arc;

use crate::cache::BinCache;
use crate::details::CardDetails;
use crate::input;
use crate::luhn;
use crate::remote::BinLookupService;
use crate::scheme::{detect_scheme, CardScheme};
use crate::table;

/// The BIN resolver.
///
/// Owns a cache port and an optional external lookup service. With no
/// remote configured the pipeline degrades to cache + offline fallback,
/// which still produces a populated (if partially "Unknown") result.
///
/// # Example
///
/// ```rust,ignore
/// use std::sync::Arc;
/// use bin_resolver::{BinResolver, cache::SqliteBinCache, remote::HandyApiClient};
///
/// let cache = Arc::new(SqliteBinCache::open("bin_cache.db")?);
/// let remote = Arc::new(HandyApiClient::new(api_key)?);
/// let resolver = BinResolver::new(cache).with_remote(remote);
///
/// let details = resolver.resolve("4111 1111 1111 1111").await;
/// assert_eq!(details.scheme.unwrap().name(), "visa");
/// ```
pub struct BinResolver {
    cache: Arc<dyn BinCache>,
    remote: Option<Arc<dyn BinLookupService>>,
}

impl BinResolver {
    /// Creates a resolver over the given cache, with no external service.
    pub fn new(cache: Arc<dyn BinCache>) -> Self {
        Self {
            cache,
            remote: None,
        }
    }

    /// Attaches an external BIN-lookup service as the second tier.
    pub fn with_remote(mut self, remote: Arc<dyn BinLookupService>) -> Self {
        self.remote = Some(remote);
        self
    }

    /// Resolves a card number (possibly with separators) or bare BIN to
    /// best-effort card details.
    ///
    /// Inputs with fewer than 6 extractable digits yield an empty
    /// [`CardDetails`]; collaborating layers are expected to enforce a
    /// minimum length before calling, so this is a quiet degenerate case
    /// rather than an error.
    pub async fn resolve(&self, input: &str) -> CardDetails {
        let digits = input::extract_digits(input);
        let bin = match input::bin6(&digits) {
            Some(bin) => bin,
            None => {
                tracing::debug!("fewer than 6 digits in input, nothing to resolve");
                return CardDetails::default();
            }
        };

        // Tier 1: cache. A hit performs no network call and no write.
        match self.cache.get(&bin).await {
            Ok(Some(entry)) => {
                tracing::debug!(bin = %bin, "BIN cache hit");
                return entry.to_details();
            }
            Ok(None) => {}
            Err(err) => {
                // A broken cache degrades to a miss
                tracing::warn!(bin = %bin, error = %err, "BIN cache read failed");
            }
        }

        // Tier 2: external lookup. Any failure falls through.
        if let Some(remote) = &self.remote {
            match remote.lookup(&bin).await {
                Ok(details) => {
                    tracing::info!(bin = %bin, "BIN resolved via external lookup");
                    self.write_back(&bin, &details).await;
                    return details;
                }
                Err(err) => {
                    tracing::warn!(bin = %bin, error = %err, "external BIN lookup missed");
                }
            }
        }

        // Tier 3: offline fallback, pure computation.
        let details = offline_details(&bin, &digits);
        tracing::debug!(bin = %bin, "BIN resolved via offline fallback");
        self.write_back(&bin, &details).await;
        details
    }

    /// Persists a resolved result; failures are logged, never propagated.
    async fn write_back(&self, bin: &str, details: &CardDetails) {
        if let Err(err) = self.cache.upsert(bin, details).await {
            tracing::warn!(bin = %bin, error = %err, "BIN cache write failed");
        }
    }
}

/// Assembles the offline-fallback details for a BIN.
///
/// `digits` is the full extracted digit sequence: Luhn validity is computed
/// over the complete number, while scheme and issuer detection use only the
/// BIN prefix.
fn offline_details(bin: &str, digits: &[u8]) -> CardDetails {
    let scheme = detect_scheme(&digits[..input::BIN_LENGTH]);

    // Coarse guess only; other schemes carry no type information offline
    let card_type = match scheme {
        Some(CardScheme::Visa) | Some(CardScheme::Mastercard) => Some("credit".to_string()),
        _ => None,
    };

    CardDetails {
        bank_name: table::issuer_for_bin(bin).map(String::from),
        card_type,
        scheme,
        // The offline table carries no country data; an explicit
        // placeholder, not an absent field
        country: Some("Unknown".to_string()),
        is_valid: Some(luhn::validate_card_number(digits)),
        card_tier: None,
    }
}
