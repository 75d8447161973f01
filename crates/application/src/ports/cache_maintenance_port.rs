use async_trait::async_trait;
use ferrous_resolv_domain::DomainError;

/// Outcome of an eviction sweep.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CacheEvictionOutcome {
    pub entries_removed: usize,
    pub names_scanned: usize,
    pub cache_size: usize,
}

/// Port for background cache maintenance.
#[async_trait]
pub trait CacheMaintenancePort: Send + Sync {
    /// Remove every expired entry.
    async fn run_eviction_cycle(&self) -> Result<CacheEvictionOutcome, DomainError>;
}
