//! TTL cache store: in-memory key/value map with per-entry expiry.
//! Shared by the refresh scheduler and the request path.

use dashmap::DashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use bytes::Bytes;
use tokio::time;

use crate::config::CacheConfig;

// ========================================
// ENTRY - Value wrapper with expiry
// ========================================

#[derive(Clone, Debug)]
struct Entry {
    value: Bytes,
    expires_at: Instant,
}

impl Entry {
    fn is_expired(&self, now: Instant) -> bool {
        now >= self.expires_at
    }
}

// ========================================
// CACHE STORE
// ========================================

pub struct CacheStore {
    inner: Arc<DashMap<String, Entry>>,
    default_ttl_secs: u64,
}

impl CacheStore {
    pub fn new(config: CacheConfig) -> Self {
        let inner = Arc::new(DashMap::new());

        // Weak reference for the sweep task
        // This prevents the task from keeping the map alive if the store is dropped
        let weak_inner = Arc::downgrade(&inner);
        let sweep_interval = config.sweep_interval_secs;

        tokio::spawn(async move {
            let mut interval = time::interval(Duration::from_secs(sweep_interval));
            interval.tick().await; // Skip first immediate tick
            loop {
                interval.tick().await;

                match weak_inner.upgrade() {
                    Some(map) => {
                        let now = Instant::now();
                        map.retain(|_, entry: &mut Entry| !entry.is_expired(now));
                        tracing::debug!("Cache sweep complete, entries remaining: {}", map.len());
                    }
                    None => {
                        // Store has been dropped, stop the sweep task
                        break;
                    }
                }
            }
        });

        Self {
            inner,
            default_ttl_secs: config.snapshot_ttl_secs,
        }
    }

    /// Store `value` under `key`, overwriting any previous entry. A `ttl` of
    /// None uses the configured snapshot TTL; 0 yields an already-expired entry.
    pub fn set(&self, key: String, value: Bytes, ttl: Option<u64>) {
        let ttl_secs = ttl.unwrap_or(self.default_ttl_secs);
        self.inner.insert(key, Entry {
            value,
            expires_at: Instant::now() + Duration::from_secs(ttl_secs),
        });
    }

    /// Copy out the value stored under `key`, if a live entry exists.
    /// Expired-but-unswept entries read as absent.
    pub fn get(&self, key: &str) -> Option<Bytes> {
        let entry = self.inner.get(key)?;
        if entry.is_expired(Instant::now()) {
            return None;
        }
        Some(entry.value.clone())
    }

    /// Number of physically held entries, expired-but-unswept included.
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}
