//! No-op BIN cache.
//!
//! For environments without a durable store (e.g. a browser-facing embed
//! where persistence lives behind an API instead). Injecting this keeps the
//! resolver free of runtime environment checks: the pipeline shape stays the
//! same and the cache tier simply always misses.

use async_trait::async_trait;

use super::{BinCache, BinCacheEntry};
use crate::details::CardDetails;
use crate::error::CacheError;

/// A cache that never hits and discards every write.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopBinCache;

impl NoopBinCache {
    /// Creates a new no-op cache.
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl BinCache for NoopBinCache {
    async fn get(&self, _bin: &str) -> Result<Option<BinCacheEntry>, CacheError> {
        Ok(None)
    }

    async fn upsert(&self, _bin: &str, _details: &CardDetails) -> Result<(), CacheError> {
        Ok(())
    }
}
