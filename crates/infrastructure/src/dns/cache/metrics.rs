use std::sync::atomic::{AtomicU64, Ordering as AtomicOrdering};

#[derive(Debug, Default)]
pub struct CacheMetrics {
    pub hits: AtomicU64,
    pub misses: AtomicU64,

    pub insertions: AtomicU64,
    pub lazy_deletions: AtomicU64,
    pub swept: AtomicU64,
    pub capacity_evictions: AtomicU64,
}

impl CacheMetrics {
    /// Percentage of lookups that found something usable.
    pub fn hit_rate(&self) -> f64 {
        let hits = self.hits.load(AtomicOrdering::Relaxed) as f64;
        let total = hits + self.misses.load(AtomicOrdering::Relaxed) as f64;

        if total > 0.0 {
            (hits / total) * 100.0
        } else {
            0.0
        }
    }

    #[inline]
    pub(super) fn bump(counter: &AtomicU64, by: u64) {
        if by > 0 {
            counter.fetch_add(by, AtomicOrdering::Relaxed);
        }
    }
}
