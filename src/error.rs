//! Error types for the cache port and the external lookup client.
//!
//! The taxonomy is deliberately narrow: the resolver itself never surfaces
//! these to its caller. Cache failures degrade to misses and lookup failures
//! fall through to the offline tier.

use std::fmt;

/// Error type for BIN cache operations.
#[derive(Debug)]
pub enum CacheError {
    /// The underlying store failed to read or write.
    Storage(String),
    /// A stored row could not be decoded into a cache entry.
    Corrupt(String),
}

impl fmt::Display for CacheError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Storage(s) => write!(f, "cache storage error: {}", s),
            Self::Corrupt(s) => write!(f, "corrupt cache entry: {}", s),
        }
    }
}

impl std::error::Error for CacheError {}

/// Error type for the external BIN-lookup service.
///
/// Every variant is treated identically by the resolver: as a miss that
/// falls through to the offline fallback.
#[derive(Debug)]
pub enum LookupError {
    /// The request could not be sent or timed out.
    Request(String),
    /// The service answered with a non-success HTTP status.
    Status(u16),
    /// The service answered 200 but flagged the lookup as failed.
    Failed(String),
    /// The response body could not be parsed.
    Malformed(String),
    /// No API key was configured for the service.
    MissingApiKey,
}

impl fmt::Display for LookupError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Request(s) => write!(f, "lookup request failed: {}", s),
            Self::Status(code) => write!(f, "lookup service returned HTTP {}", code),
            Self::Failed(status) => {
                write!(f, "lookup service reported non-success status: {}", status)
            }
            Self::Malformed(s) => write!(f, "malformed lookup response: {}", s),
            Self::MissingApiKey => write!(f, "no API key configured for lookup service"),
        }
    }
}

impl std::error::Error for LookupError {}

impl From<reqwest::Error> for LookupError {
    fn from(err: reqwest::Error) -> Self {
        Self::Request(err.to_string())
    }
}
