use serde::{Deserialize, Serialize};

/// Limits applied to every record cache created from this configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CacheConfig {
    /// Maximum number of cached names; 0 means unbounded.
    #[serde(default = "default_max_entries")]
    pub max_entries: usize,

    /// Upper bound on positive entry lifetime in seconds. `None` keeps the
    /// record TTL, `Some(0)` disables positive caching.
    #[serde(default)]
    pub max_positive_ttl: Option<u32>,

    /// Upper bound on negative entry lifetime in seconds.
    #[serde(default = "default_max_negative_ttl")]
    pub max_negative_ttl: u32,

    /// Minutes between eviction sweeps; zero or negative disables the sweep.
    #[serde(default = "default_cleanup_interval_minutes")]
    pub cleanup_interval_minutes: i64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            max_entries: default_max_entries(),
            max_positive_ttl: None,
            max_negative_ttl: default_max_negative_ttl(),
            cleanup_interval_minutes: default_cleanup_interval_minutes(),
        }
    }
}

fn default_max_entries() -> usize {
    50_000
}

fn default_max_negative_ttl() -> u32 {
    10_800
}

fn default_cleanup_interval_minutes() -> i64 {
    30
}
