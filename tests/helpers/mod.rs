#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use rescache::cache::CacheStore;
use rescache::config::CacheConfig;
use rescache::error::{ResourceError, Result};
use rescache::resources::{ResourceManager, ServerRecord};
use rescache::upstream::ServerSource;

pub fn test_cache_config(sweep_interval_secs: u64) -> CacheConfig {
    CacheConfig {
        sweep_interval_secs,
        snapshot_ttl_secs: 86400,
    }
}

pub fn setup_cache() -> Arc<CacheStore> {
    // Long sweep interval: these tests exercise lazy expiry, not the sweep
    Arc::new(CacheStore::new(test_cache_config(3600)))
}

pub fn setup_manager(source: Arc<StubSource>) -> (Arc<ResourceManager>, Arc<CacheStore>) {
    let cache = setup_cache();
    let manager = Arc::new(ResourceManager::new(cache.clone(), source, 86400));
    (manager, cache)
}

/// Build a ServerRecord through serde, the same path the panel client uses.
pub fn record(
    name: &str,
    description: &str,
    limits: serde_json::Value,
    feature_limits: serde_json::Value,
) -> ServerRecord {
    serde_json::from_value(serde_json::json!({
        "name": name,
        "description": description,
        "limits": limits,
        "feature_limits": feature_limits,
    }))
    .expect("record fixture should deserialize")
}

// ========================================
// STUB UPSTREAM
// ========================================

/// Upstream stub: serves per-user record lists and counts calls. Users with
/// no entry fail the way a broken panel would.
pub struct StubSource {
    records: Mutex<HashMap<u32, Vec<ServerRecord>>>,
    calls: AtomicUsize,
}

impl StubSource {
    pub fn empty() -> Arc<Self> {
        Arc::new(Self {
            records: Mutex::new(HashMap::new()),
            calls: AtomicUsize::new(0),
        })
    }

    pub fn with_user(user_id: u32, records: Vec<ServerRecord>) -> Arc<Self> {
        let stub = Self::empty();
        stub.insert(user_id, records);
        stub
    }

    pub fn insert(&self, user_id: u32, records: Vec<ServerRecord>) {
        self.records.lock().unwrap().insert(user_id, records);
    }

    pub fn remove(&self, user_id: u32) {
        self.records.lock().unwrap().remove(&user_id);
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ServerSource for StubSource {
    async fn fetch_user_servers(&self, user_id: u32) -> Result<Vec<ServerRecord>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.records
            .lock()
            .unwrap()
            .get(&user_id)
            .cloned()
            .ok_or(ResourceError::UpstreamStatus {
                status: 500,
                body: "panel unavailable".to_string(),
            })
    }
}
