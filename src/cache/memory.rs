//! In-memory BIN cache implementation.
//!
//! Backed by a mutex-guarded map. Handy for tests and for embedding the
//! resolver without a durable store; contents are lost on drop.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;

use super::{BinCache, BinCacheEntry};
use crate::details::CardDetails;
use crate::error::CacheError;

/// In-memory BIN cache.
///
/// The mutex is held only for the duration of the map operation, never
/// across an await point, so concurrent resolves stay safe.
#[derive(Debug, Default)]
pub struct MemoryBinCache {
    entries: Mutex<HashMap<String, BinCacheEntry>>,
}

impl MemoryBinCache {
    /// Creates a new empty in-memory cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds the cache with an existing entry, e.g. one written by a
    /// collaborating CRUD handler.
    pub fn seed(&self, entry: BinCacheEntry) {
        let mut entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        entries.insert(entry.bin.clone(), entry);
    }

    /// Returns the number of cached BINs.
    pub fn len(&self) -> usize {
        let entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        entries.len()
    }

    /// Returns true if nothing is cached.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl BinCache for MemoryBinCache {
    async fn get(&self, bin: &str) -> Result<Option<BinCacheEntry>, CacheError> {
        let entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        Ok(entries.get(bin).cloned())
    }

    async fn upsert(&self, bin: &str, details: &CardDetails) -> Result<(), CacheError> {
        let mut entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());

        match entries.get_mut(bin) {
            Some(existing) => {
                existing.bank_name = details.bank_name.clone();
                existing.card_type = details.card_type.clone();
                existing.scheme = details.scheme.map(|s| s.name().to_string());
                existing.country = details.country.clone();
                existing.card_tier = details.card_tier.clone();
                existing.is_valid = details.is_valid.unwrap_or(true);
                existing.updated_at = Utc::now();
            }
            None => {
                entries.insert(bin.to_string(), BinCacheEntry::from_details(bin, details));
            }
        }

        Ok(())
    }
}
