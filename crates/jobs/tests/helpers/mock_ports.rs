use async_trait::async_trait;
use ferrous_resolv_application::ports::{CacheEvictionOutcome, CacheMaintenancePort};
use ferrous_resolv_domain::DomainError;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

pub struct MockCacheMaintenancePort {
    eviction_call_count: AtomicU64,
    should_fail: AtomicBool,
}

impl MockCacheMaintenancePort {
    pub fn new() -> Self {
        Self {
            eviction_call_count: AtomicU64::new(0),
            should_fail: AtomicBool::new(false),
        }
    }

    pub fn eviction_call_count(&self) -> u64 {
        self.eviction_call_count.load(Ordering::Relaxed)
    }

    pub fn set_should_fail(&self, fail: bool) {
        self.should_fail.store(fail, Ordering::Relaxed);
    }
}

impl Default for MockCacheMaintenancePort {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CacheMaintenancePort for MockCacheMaintenancePort {
    async fn run_eviction_cycle(&self) -> Result<CacheEvictionOutcome, DomainError> {
        self.eviction_call_count.fetch_add(1, Ordering::Relaxed);
        if self.should_fail.load(Ordering::Relaxed) {
            return Err(DomainError::IoError("mock eviction failure".into()));
        }
        Ok(CacheEvictionOutcome {
            entries_removed: 1,
            names_scanned: 1,
            cache_size: 0,
        })
    }
}
