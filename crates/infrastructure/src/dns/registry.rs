use super::cache::{Clock, RecordCache, SystemClock};
use ferrous_resolv_application::ports::{CacheProvider, ResolverCache};
use ferrous_resolv_domain::{CacheConfig, DnsClass};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tracing::debug;

/// One record cache per class, created on first use from a shared
/// configuration.
pub struct CacheRegistry {
    config: CacheConfig,
    clock: Arc<dyn Clock>,
    caches: Mutex<HashMap<DnsClass, Arc<RecordCache>>>,
}

impl CacheRegistry {
    pub fn new(config: CacheConfig) -> Self {
        Self::with_clock(config, Arc::new(SystemClock))
    }

    pub fn with_clock(config: CacheConfig, clock: Arc<dyn Clock>) -> Self {
        Self {
            config,
            clock,
            caches: Mutex::new(HashMap::new()),
        }
    }

    /// Registers a prebuilt cache, replacing any cache for its class.
    pub fn insert(&self, cache: Arc<RecordCache>) {
        self.caches
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .insert(cache.class(), cache);
    }

    pub fn get(&self, class: DnsClass) -> Option<Arc<RecordCache>> {
        self.caches
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .get(&class)
            .cloned()
    }

    pub fn get_or_create(&self, class: DnsClass) -> Arc<RecordCache> {
        let mut caches = self.caches.lock().unwrap_or_else(|e| e.into_inner());
        let cache = caches.entry(class).or_insert_with(|| {
            debug!(class = %class, "Creating record cache");
            RecordCache::with_clock(class, &self.config, Arc::clone(&self.clock))
        });
        Arc::clone(cache)
    }

    pub fn classes(&self) -> Vec<DnsClass> {
        self.caches
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .keys()
            .copied()
            .collect()
    }

    pub fn config(&self) -> &CacheConfig {
        &self.config
    }
}

impl CacheProvider for CacheRegistry {
    fn cache_for(&self, class: DnsClass) -> Arc<dyn ResolverCache> {
        self.get_or_create(class)
    }
}
