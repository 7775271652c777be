use std::sync::Arc;

use bytes::Bytes;
use chrono::Utc;

use crate::cache::CacheStore;
use crate::error::{ResourceError, Result};
use crate::resources::aggregator::aggregate;
use crate::resources::types::CachedResources;
use crate::upstream::ServerSource;

/// Cache key for one user's snapshot.
pub fn cache_key(user_id: u32) -> String {
    format!("user_resources_{}", user_id)
}

// ========================================
// RESOURCE MANAGER
// ========================================

/// Owns the refresh routine (fetch -> aggregate -> serialize -> cache).
/// Shared by the background scheduler and the request path.
pub struct ResourceManager {
    cache: Arc<CacheStore>,
    source: Arc<dyn ServerSource>,
    snapshot_ttl_secs: u64,
}

impl ResourceManager {
    pub fn new(
        cache: Arc<CacheStore>,
        source: Arc<dyn ServerSource>,
        snapshot_ttl_secs: u64,
    ) -> Self {
        Self {
            cache,
            source,
            snapshot_ttl_secs,
        }
    }

    /// Recompute one user's snapshot and overwrite the cached value.
    /// On failure the previous entry (if any) is left untouched.
    pub async fn refresh_user(&self, user_id: u32, include_demos: bool) -> Result<()> {
        tracing::debug!(
            "Updating resources for user {} (include_demos: {})",
            user_id,
            include_demos
        );

        let records = self.source.fetch_user_servers(user_id).await?;
        let (snapshot, skipped) = aggregate(&records, include_demos);

        let payload = CachedResources {
            server_count: snapshot.servers,
            updated_at: Utc::now().timestamp(),
            total_resources: snapshot,
        };
        let data = serde_json::to_vec(&payload)?;

        self.cache
            .set(cache_key(user_id), Bytes::from(data), Some(self.snapshot_ttl_secs));

        tracing::info!(
            "Updated resources for user {}: {} servers counted, {} demo servers skipped",
            user_id,
            payload.server_count,
            skipped
        );
        Ok(())
    }

    /// Serve the cached snapshot, computing it synchronously on a miss.
    /// Overlapping misses for the same key may each hit upstream; the last
    /// write wins and every caller gets a complete payload.
    pub async fn get_resources(&self, user_id: u32, include_demos: bool) -> Result<Bytes> {
        let key = cache_key(user_id);

        if let Some(data) = self.cache.get(&key) {
            return Ok(data);
        }

        self.refresh_user(user_id, include_demos).await?;

        self.cache.get(&key).ok_or(ResourceError::Unavailable)
    }
}
