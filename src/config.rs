use std::env;
use std::sync::OnceLock;

static CONFIG: OnceLock<Config> = OnceLock::new();

// --- CONFIG AGGREGATOR ---

#[derive(Debug, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub panel: PanelConfig,
    pub cache: CacheConfig,
    pub scheduler: SchedulerConfig,
}

impl Config {
    pub fn global() -> &'static Config {
        CONFIG.get_or_init(Self::load)
    }

    fn load() -> Self {
        dotenv::dotenv().ok();
        Self {
            server: ServerConfig::load(),
            panel: PanelConfig::load(),
            cache: CacheConfig::load(),
            scheduler: SchedulerConfig::load(),
        }
    }
}

// --- MODULES ---

// SERVER
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub log_level: String,
}

impl ServerConfig {
    fn load() -> Self {
        Self {
            host:      get_env("SERVER_HOST", "127.0.0.1"),
            port:      get_env("PORT", "8080"),
            log_level: get_env("RESCACHE_LOG", "info"),
        }
    }
}

// PANEL (upstream application API)
#[derive(Debug, Clone)]
pub struct PanelConfig {
    pub api_url: String,
    pub api_key: String,
    pub http_timeout_secs: u64,
}

impl PanelConfig {
    fn load() -> Self {
        Self {
            api_url:           get_env("PANEL_API_URL", ""),
            api_key:           get_env("PANEL_API_KEY", ""),
            http_timeout_secs: get_env("PANEL_HTTP_TIMEOUT_SECS", "30"),
        }
    }
}

// CACHE
#[derive(Debug, Clone)]
pub struct CacheConfig {
    pub sweep_interval_secs: u64,
    pub snapshot_ttl_secs: u64,
}

impl CacheConfig {
    fn load() -> Self {
        Self {
            sweep_interval_secs: get_env("CACHE_SWEEP_INTERVAL_SECS", "300"),
            snapshot_ttl_secs:   get_env("SNAPSHOT_TTL_SECS", "86400"),
        }
    }
}

// SCHEDULER
#[derive(Debug, Clone)]
pub struct SchedulerConfig {
    pub update_interval_mins: u64,
    pub max_jitter_secs: u64,
    pub user_ids: Vec<u32>,
}

impl SchedulerConfig {
    fn load() -> Self {
        Self {
            update_interval_mins: get_env("UPDATE_INTERVAL_MINUTES", "15"),
            max_jitter_secs:      get_env("SCHEDULER_MAX_JITTER_SECS", "60"),
            user_ids:             load_user_ids(),
        }
    }
}

/// Comma-separated USER_IDS from the environment, falling back to a users.txt
/// file in the working directory. Malformed entries are skipped.
fn load_user_ids() -> Vec<u32> {
    let raw = match env::var("USER_IDS") {
        Ok(list) => list,
        Err(_) => std::fs::read_to_string("users.txt").unwrap_or_default(),
    };

    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .filter_map(|s| match s.parse::<u32>() {
            Ok(0) | Err(_) => {
                tracing::warn!("Skipping invalid user id: {:?}", s);
                None
            }
            Ok(id) => Some(id),
        })
        .collect()
}

// --- PRIVATE HELPER ---

fn get_env<T: std::str::FromStr>(key: &str, default: &str) -> T {
    env::var(key)
        .unwrap_or_else(|_| default.to_string())
        .parse()
        .map_err(|_| format!("Config error: {} must be valid", key))
        .unwrap()
}
