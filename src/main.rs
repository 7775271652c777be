#![allow(dead_code, unused_imports, unused_variables)]

use rescache::config::Config;
use rescache::scheduler;
use rescache::server::api;
use rescache::RescacheEngine;

// ========================================
// MAIN ENTRY POINT
// ========================================

#[tokio::main]
async fn main() {
    let config = Config::global();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.server.log_level)),
        )
        .init();

    tracing::info!("🚀 rescache starting...");
    tracing::info!("Panel API URL: {}", config.panel.api_url);
    tracing::info!("Update interval: {} minutes", config.scheduler.update_interval_mins);

    let engine = RescacheEngine::new(config);

    if config.scheduler.user_ids.is_empty() {
        tracing::info!("No USER_IDS defined, background updates disabled. Only on-demand updates will be processed.");
    } else {
        scheduler::spawn_refresh_loops(engine.resources.clone(), &config.scheduler);
    }

    api::start_api_server(engine, &config.server.host, config.server.port).await;
}
