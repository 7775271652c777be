use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

// ========================================
// AGGREGATED SNAPSHOT
// ========================================

/// Resource totals for one user across all counted servers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceSnapshot {
    pub memory: u64,
    pub swap: u64,
    pub disk: u64,
    pub io: u64,
    pub cpu: u64,
    pub databases: u64,
    pub allocations: u64,
    pub backups: u64,
    pub servers: u64,
}

/// Wire payload stored in the cache and returned to callers verbatim.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CachedResources {
    pub total_resources: ResourceSnapshot,
    pub server_count: u64,
    pub updated_at: i64,
}

// ========================================
// UPSTREAM SERVER RECORD
// ========================================

const DEMO_MARKER: &str = "demo";

/// Raw per-server attributes as the panel reports them. The limit groups stay
/// untyped maps: field values can arrive as numbers or numeric strings, and a
/// bad field must never fail the whole record.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ServerRecord {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub limits: Option<Map<String, Value>>,
    #[serde(default)]
    pub feature_limits: Option<Map<String, Value>>,
}

impl ServerRecord {
    /// Demo servers are excluded from totals unless explicitly requested.
    pub fn is_demo(&self) -> bool {
        self.name.to_lowercase().contains(DEMO_MARKER)
            || self.description.to_lowercase().contains(DEMO_MARKER)
    }
}

/// Read an integer field out of a limit group, tolerating integers, floats
/// and numeric strings. Anything else counts as 0.
pub(crate) fn int_field(group: &Map<String, Value>, key: &str) -> u64 {
    match group.get(key) {
        Some(Value::Number(n)) => n
            .as_u64()
            .or_else(|| n.as_f64().map(|f| if f > 0.0 { f as u64 } else { 0 }))
            .unwrap_or(0),
        Some(Value::String(s)) => s.trim().parse::<u64>().unwrap_or(0),
        _ => 0,
    }
}
