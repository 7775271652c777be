#![allow(dead_code, unused_imports, unused_variables)]

pub mod cache;
pub mod config;
pub mod error;
pub mod metrics;
pub mod resources;
pub mod scheduler;
pub mod server;
pub mod upstream;

use std::sync::Arc;
use std::time::Instant;

use crate::cache::CacheStore;
use crate::config::Config;
use crate::resources::ResourceManager;
use crate::upstream::PanelClient;

// ========================================
// ENGINE (The Singleton)
// ========================================

#[derive(Clone)]
pub struct RescacheEngine {
    pub cache: Arc<CacheStore>,
    pub resources: Arc<ResourceManager>,
    pub start_time: Instant,
}

impl RescacheEngine {
    pub fn new(config: &Config) -> Self {
        let cache = Arc::new(CacheStore::new(config.cache.clone()));
        let panel = Arc::new(PanelClient::new(config.panel.clone()));
        let resources = Arc::new(ResourceManager::new(
            cache.clone(),
            panel,
            config.cache.snapshot_ttl_secs,
        ));

        Self {
            cache,
            resources,
            start_time: Instant::now(),
        }
    }
}
