//! SQLite-backed BIN cache implementation.
//!
//! Persists resolved BINs across restarts so that no BIN is ever looked up
//! externally twice. The upsert is a single `INSERT ... ON CONFLICT` so it
//! is atomic per BIN at the database level.
//!
//! # Feature
//!
//! Requires the `cache-sqlite` feature.
//!
//! # Schema
//!
//! ```sql
//! CREATE TABLE bin_cache (
//!     bin        TEXT PRIMARY KEY,
//!     bank_name  TEXT,
//!     card_type  TEXT,
//!     scheme     TEXT,
//!     country    TEXT,
//!     card_tier  TEXT,
//!     is_valid   INTEGER NOT NULL DEFAULT 1,
//!     created_at TEXT NOT NULL,
//!     updated_at TEXT NOT NULL
//! );
//! ```

#![cfg(feature = "cache-sqlite")]

use std::path::Path;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;
use rusqlite::Connection;

use super::{BinCache, BinCacheEntry};
use crate::details::CardDetails;
use crate::error::CacheError;

/// SQLite-backed BIN cache.
///
/// # Thread Safety
///
/// The connection is wrapped in a Mutex to allow sharing across tasks; the
/// lock is never held across an await point. Individual statements are
/// short, so contention stays low at this system's request rates.
pub struct SqliteBinCache {
    conn: Mutex<Connection>,
}

impl SqliteBinCache {
    /// Opens (or creates) a SQLite BIN cache at the given path.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, CacheError> {
        let conn = Connection::open(path).map_err(|e| CacheError::Storage(e.to_string()))?;
        Self::from_connection(conn)
    }

    /// Opens an in-memory cache. Useful for tests.
    pub fn open_in_memory() -> Result<Self, CacheError> {
        let conn = Connection::open_in_memory().map_err(|e| CacheError::Storage(e.to_string()))?;
        Self::from_connection(conn)
    }

    fn from_connection(conn: Connection) -> Result<Self, CacheError> {
        conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS bin_cache (
                bin        TEXT PRIMARY KEY,
                bank_name  TEXT,
                card_type  TEXT,
                scheme     TEXT,
                country    TEXT,
                card_tier  TEXT,
                is_valid   INTEGER NOT NULL DEFAULT 1,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL
            );",
        )
        .map_err(|e| CacheError::Storage(e.to_string()))?;

        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Returns the number of cached BINs.
    pub fn len(&self) -> Result<usize, CacheError> {
        let conn = self.conn.lock().unwrap_or_else(|e| e.into_inner());
        conn.query_row("SELECT COUNT(*) FROM bin_cache", [], |row| row.get(0))
            .map(|n: i64| n as usize)
            .map_err(|e| CacheError::Storage(e.to_string()))
    }

    /// Returns true if nothing is cached.
    pub fn is_empty(&self) -> Result<bool, CacheError> {
        Ok(self.len()? == 0)
    }
}

#[async_trait]
impl BinCache for SqliteBinCache {
    async fn get(&self, bin: &str) -> Result<Option<BinCacheEntry>, CacheError> {
        let conn = self.conn.lock().unwrap_or_else(|e| e.into_inner());
        let mut stmt = conn
            .prepare_cached(
                "SELECT bin, bank_name, card_type, scheme, country, card_tier,
                        is_valid, created_at, updated_at
                 FROM bin_cache WHERE bin = ?1",
            )
            .map_err(|e| CacheError::Storage(e.to_string()))?;

        let mut rows = stmt
            .query([bin])
            .map_err(|e| CacheError::Storage(e.to_string()))?;

        let row = match rows.next().map_err(|e| CacheError::Storage(e.to_string()))? {
            Some(row) => row,
            None => return Ok(None),
        };

        let entry = BinCacheEntry {
            bin: row.get(0).map_err(|e| CacheError::Corrupt(e.to_string()))?,
            bank_name: row.get(1).map_err(|e| CacheError::Corrupt(e.to_string()))?,
            card_type: row.get(2).map_err(|e| CacheError::Corrupt(e.to_string()))?,
            scheme: row.get(3).map_err(|e| CacheError::Corrupt(e.to_string()))?,
            country: row.get(4).map_err(|e| CacheError::Corrupt(e.to_string()))?,
            card_tier: row.get(5).map_err(|e| CacheError::Corrupt(e.to_string()))?,
            is_valid: row.get(6).map_err(|e| CacheError::Corrupt(e.to_string()))?,
            created_at: row.get(7).map_err(|e| CacheError::Corrupt(e.to_string()))?,
            updated_at: row.get(8).map_err(|e| CacheError::Corrupt(e.to_string()))?,
        };

        Ok(Some(entry))
    }

    async fn upsert(&self, bin: &str, details: &CardDetails) -> Result<(), CacheError> {
        let now = Utc::now();
        let conn = self.conn.lock().unwrap_or_else(|e| e.into_inner());

        conn.execute(
            "INSERT INTO bin_cache
                (bin, bank_name, card_type, scheme, country, card_tier,
                 is_valid, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?8)
             ON CONFLICT(bin) DO UPDATE SET
                bank_name  = excluded.bank_name,
                card_type  = excluded.card_type,
                scheme     = excluded.scheme,
                country    = excluded.country,
                card_tier  = excluded.card_tier,
                is_valid   = excluded.is_valid,
                updated_at = excluded.updated_at",
            rusqlite::params![
                bin,
                details.bank_name,
                details.card_type,
                details.scheme.map(|s| s.name()),
                details.country,
                details.card_tier,
                details.is_valid.unwrap_or(true),
                now,
            ],
        )
        .map_err(|e| CacheError::Storage(e.to_string()))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scheme::CardScheme;

    fn details(bank: &str) -> CardDetails {
        CardDetails {
            bank_name: Some(bank.to_string()),
            card_type: Some("credit".into()),
            scheme: Some(CardScheme::Visa),
            country: Some("United States".into()),
            is_valid: Some(true),
            card_tier: Some("Classic".into()),
        }
    }

    #[tokio::test]
    async fn test_miss_on_empty() {
        let cache = SqliteBinCache::open_in_memory().unwrap();
        assert!(cache.get("411111").await.unwrap().is_none());
        assert!(cache.is_empty().unwrap());
    }

    #[tokio::test]
    async fn test_upsert_and_get() {
        let cache = SqliteBinCache::open_in_memory().unwrap();
        cache.upsert("411111", &details("Test Bank")).await.unwrap();

        let entry = cache.get("411111").await.unwrap().unwrap();
        assert_eq!(entry.bin, "411111");
        assert_eq!(entry.bank_name.as_deref(), Some("Test Bank"));
        assert_eq!(entry.scheme.as_deref(), Some("visa"));
        assert_eq!(entry.country.as_deref(), Some("United States"));
        assert!(entry.is_valid);
    }

    #[tokio::test]
    async fn test_upsert_updates_in_place() {
        let cache = SqliteBinCache::open_in_memory().unwrap();
        cache.upsert("411111", &details("First Bank")).await.unwrap();
        let first = cache.get("411111").await.unwrap().unwrap();

        cache
            .upsert("411111", &details("Second Bank"))
            .await
            .unwrap();

        assert_eq!(cache.len().unwrap(), 1);
        let entry = cache.get("411111").await.unwrap().unwrap();
        assert_eq!(entry.bank_name.as_deref(), Some("Second Bank"));
        assert_eq!(entry.created_at, first.created_at);
        assert!(entry.updated_at >= first.updated_at);
    }

    #[tokio::test]
    async fn test_optional_fields_null() {
        let cache = SqliteBinCache::open_in_memory().unwrap();
        let sparse = CardDetails {
            scheme: Some(CardScheme::Maestro),
            is_valid: Some(false),
            ..Default::default()
        };
        cache.upsert("675900", &sparse).await.unwrap();

        let entry = cache.get("675900").await.unwrap().unwrap();
        assert!(entry.bank_name.is_none());
        assert!(entry.card_tier.is_none());
        assert_eq!(entry.scheme.as_deref(), Some("maestro"));
        assert!(!entry.is_valid);
    }

    #[tokio::test]
    async fn test_concurrent_upserts_single_row() {
        use std::sync::Arc;

        let cache = Arc::new(SqliteBinCache::open_in_memory().unwrap());
        let mut handles = Vec::new();

        for i in 0..8 {
            let cache = Arc::clone(&cache);
            handles.push(tokio::spawn(async move {
                cache
                    .upsert("555555", &details(&format!("Bank {}", i)))
                    .await
                    .unwrap();
            }));
        }
        for handle in handles {
            handle.await.unwrap();
        }

        assert_eq!(cache.len().unwrap(), 1);
    }
}
