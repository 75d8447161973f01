use super::cache::{CacheMetrics, RecordCache};
use async_trait::async_trait;
use ferrous_resolv_application::ports::{CacheEvictionOutcome, CacheMaintenancePort};
use ferrous_resolv_domain::DomainError;
use std::sync::atomic::Ordering as AtomicOrdering;
use tracing::debug;

/// Names re-checked per lock acquisition during a sweep.
const SWEEP_BATCH_SIZE: usize = 256;

#[async_trait]
impl CacheMaintenancePort for RecordCache {
    async fn run_eviction_cycle(&self) -> Result<CacheEvictionOutcome, DomainError> {
        let names = self.names_snapshot();
        let mut entries_removed = 0;

        for batch in names.chunks(SWEEP_BATCH_SIZE) {
            entries_removed += self.sweep_names(batch);
            tokio::task::yield_now().await;
        }

        record_sweep(&self.metrics(), entries_removed);

        let outcome = CacheEvictionOutcome {
            entries_removed,
            names_scanned: names.len(),
            cache_size: self.len(),
        };

        debug!(
            class = %self.class(),
            entries_removed = outcome.entries_removed,
            names_scanned = outcome.names_scanned,
            cache_size = outcome.cache_size,
            "Record cache sweep completed"
        );

        Ok(outcome)
    }
}

fn record_sweep(metrics: &CacheMetrics, removed: usize) {
    if removed > 0 {
        metrics.swept.fetch_add(removed as u64, AtomicOrdering::Relaxed);
    }
}
