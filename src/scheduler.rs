//! Per-user background refresh loops.

use std::sync::Arc;
use std::time::Duration;

use rand::Rng;

use crate::config::SchedulerConfig;
use crate::resources::ResourceManager;

/// Spawn one detached refresh loop per configured user id. Each loop starts
/// with a one-time random jitter so a large user list does not hit the panel
/// in a single burst, then refreshes on a fixed interval forever. A failed
/// cycle is logged and skipped; the snapshot from the last good cycle stays
/// visible until the next successful overwrite.
pub fn spawn_refresh_loops(manager: Arc<ResourceManager>, config: &SchedulerConfig) {
    let interval = Duration::from_secs(config.update_interval_mins * 60);
    let max_jitter = config.max_jitter_secs;

    tracing::info!("Found {} users to process", config.user_ids.len());

    for user_id in config.user_ids.clone() {
        let manager = manager.clone();

        tokio::spawn(async move {
            let jitter = rand::thread_rng().gen_range(0..=max_jitter);
            tokio::time::sleep(Duration::from_secs(jitter)).await;

            loop {
                if let Err(e) = manager.refresh_user(user_id, false).await {
                    tracing::error!("Scheduled refresh failed for user {}: {}", user_id, e);
                }
                tokio::time::sleep(interval).await;
            }
        });
    }
}
