use serde::Serialize;

use crate::RescacheEngine;

#[derive(Serialize)]
pub struct MetricsSnapshot {
    pub cache_entries: usize,
    pub uptime_seconds: u64,
    pub server_time: String,
}

impl MetricsSnapshot {
    pub fn capture(engine: &RescacheEngine) -> Self {
        Self {
            cache_entries: engine.cache.len(),
            uptime_seconds: engine.start_time.elapsed().as_secs(),
            server_time: chrono::Utc::now().to_rfc3339(),
        }
    }
}
