use crate::dns_record::Credibility;
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ResolverConfig {
    /// Nameservers as `ip:port`; a bare address gets port 53.
    #[serde(default)]
    pub servers: Vec<String>,

    /// Search path appended to relative names.
    #[serde(default)]
    pub search: Vec<String>,

    #[serde(default = "default_ndots")]
    pub ndots: usize,

    #[serde(default = "default_query_timeout_ms")]
    pub query_timeout_ms: u64,

    /// Minimum credibility a cached entry needs to answer a lookup.
    #[serde(default = "default_credibility")]
    pub credibility: Credibility,

    /// Merge `/etc/resolv.conf` into this configuration at build time.
    #[serde(default)]
    pub use_resolv_conf: bool,
}

impl ResolverConfig {
    pub fn query_timeout(&self) -> Duration {
        Duration::from_millis(self.query_timeout_ms)
    }
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            servers: Vec::new(),
            search: Vec::new(),
            ndots: default_ndots(),
            query_timeout_ms: default_query_timeout_ms(),
            credibility: default_credibility(),
            use_resolv_conf: false,
        }
    }
}

fn default_ndots() -> usize {
    1
}

fn default_query_timeout_ms() -> u64 {
    5000
}

fn default_credibility() -> Credibility {
    Credibility::NORMAL
}
