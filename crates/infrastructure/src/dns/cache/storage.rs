use super::clock::{Clock, SystemClock};
use super::entry::CacheEntry;
use super::key::EntryKey;
use super::metrics::CacheMetrics;
use ferrous_resolv_application::ports::CacheMaintenancePort;
use ferrous_resolv_domain::{CacheConfig, Credibility, DnsClass, DomainError, Name, Record};
use ferrous_resolv_jobs::{CacheEvictionJob, EvictionHandle};
use lru::LruCache;
use std::collections::HashMap;
use std::num::NonZeroUsize;
use std::sync::{Arc, Mutex, MutexGuard, Weak};
use std::time::Duration;
use tracing::{debug, info};

pub(super) type NameEntries = HashMap<EntryKey, CacheEntry>;

pub(super) struct State {
    pub(super) names: LruCache<Name, NameEntries>,
    pub(super) max_entries: usize,
    pub(super) max_positive_ttl: Option<u32>,
    pub(super) max_negative_ttl: u32,
}

impl State {
    /// Drops the entry under `key` if it has expired. Returns how many
    /// entries were removed.
    pub(super) fn expire_entry(&mut self, name: &Name, key: EntryKey, now: u64) -> u64 {
        let Some(entries) = self.names.peek_mut(name) else {
            return 0;
        };
        if !entries.get(&key).is_some_and(|entry| entry.is_expired(now)) {
            return 0;
        }
        entries.remove(&key);
        if entries.is_empty() {
            self.names.pop(name);
        }
        1
    }

    pub(super) fn peek_entry(&self, name: &Name, key: EntryKey) -> Option<&CacheEntry> {
        self.names.peek(name)?.get(&key)
    }

    pub(super) fn peek_entry_mut(&mut self, name: &Name, key: EntryKey) -> Option<&mut CacheEntry> {
        self.names.peek_mut(name)?.get_mut(&key)
    }

    pub(super) fn remove_entry(&mut self, name: &Name, key: EntryKey) -> bool {
        let Some(entries) = self.names.peek_mut(name) else {
            return false;
        };
        let removed = entries.remove(&key).is_some();
        if entries.is_empty() {
            self.names.pop(name);
        }
        removed
    }

    /// Installs an entry, returning true when another name had to make room.
    pub(super) fn insert_entry(&mut self, name: &Name, key: EntryKey, entry: CacheEntry) -> bool {
        if let Some(entries) = self.names.get_mut(name) {
            entries.insert(key, entry);
            return false;
        }
        let mut entries = HashMap::with_capacity(2);
        entries.insert(key, entry);
        matches!(self.names.push(name.clone(), entries), Some((evicted, _)) if evicted != *name)
    }

    pub(super) fn entry_count(&self) -> usize {
        self.names.iter().map(|(_, entries)| entries.len()).sum()
    }
}

/// Credibility-aware cache of RRsets and negative answers for one class.
///
/// Every structural change goes through one mutex. RRsets leave the cache as
/// `Arc` snapshots and are never mutated in place once handed out.
pub struct RecordCache {
    pub(super) class: DnsClass,
    pub(super) state: Mutex<State>,
    pub(super) clock: Arc<dyn Clock>,
    pub(super) metrics: Arc<CacheMetrics>,
    weak_self: Weak<RecordCache>,
    cleanup: Mutex<Option<EvictionHandle>>,
}

impl RecordCache {
    /// Creates a cache and, inside a tokio runtime, starts its eviction job.
    pub fn new(class: DnsClass, config: &CacheConfig) -> Arc<Self> {
        Self::with_clock(class, config, Arc::new(SystemClock))
    }

    pub fn with_clock(class: DnsClass, config: &CacheConfig, clock: Arc<dyn Clock>) -> Arc<Self> {
        info!(
            class = %class,
            max_entries = config.max_entries,
            max_positive_ttl = ?config.max_positive_ttl,
            max_negative_ttl = config.max_negative_ttl,
            cleanup_interval_minutes = config.cleanup_interval_minutes,
            "Initializing record cache"
        );

        let cache = Arc::new_cyclic(|weak_self| Self {
            class,
            state: Mutex::new(State {
                names: new_lru(config.max_entries),
                max_entries: config.max_entries,
                max_positive_ttl: config.max_positive_ttl,
                max_negative_ttl: config.max_negative_ttl,
            }),
            clock,
            metrics: Arc::new(CacheMetrics::default()),
            weak_self: weak_self.clone(),
            cleanup: Mutex::new(None),
        });
        cache.set_cleanup_interval(config.cleanup_interval_minutes);
        cache
    }

    pub(super) fn state(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    pub fn class(&self) -> DnsClass {
        self.class
    }

    pub fn metrics(&self) -> Arc<CacheMetrics> {
        Arc::clone(&self.metrics)
    }

    /// Number of owner names held.
    pub fn len(&self) -> usize {
        self.state().names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of entries across all names.
    pub fn entry_count(&self) -> usize {
        self.state().entry_count()
    }

    /// Name limit; 0 means unbounded.
    pub fn max_entries(&self) -> usize {
        self.state().max_entries
    }

    /// Changes the name limit, dropping least recently used names that no
    /// longer fit.
    pub fn set_max_entries(&self, max_entries: usize) {
        let mut state = self.state();
        let before = state.names.len();
        let capacity = NonZeroUsize::new(max_entries).unwrap_or(NonZeroUsize::MAX);
        state.names.resize(capacity);
        state.max_entries = max_entries;
        let dropped = before.saturating_sub(state.names.len()) as u64;
        CacheMetrics::bump(&self.metrics.capacity_evictions, dropped);
    }

    /// `None` keeps record TTLs as they are; `Some(0)` stops positive caching.
    pub fn set_max_positive_ttl(&self, max: Option<u32>) {
        self.state().max_positive_ttl = max;
    }

    pub fn max_positive_ttl(&self) -> Option<u32> {
        self.state().max_positive_ttl
    }

    pub fn set_max_negative_ttl(&self, max: u32) {
        self.state().max_negative_ttl = max;
    }

    pub fn max_negative_ttl(&self) -> u32 {
        self.state().max_negative_ttl
    }

    /// Removes everything cached for `name`.
    pub fn flush_name(&self, name: &Name) {
        self.state().names.pop(&fqdn(name));
    }

    /// Removes the entry for one type (or the name-absent entry) at `name`.
    pub fn flush_set(&self, name: &Name, key: impl Into<EntryKey>) {
        self.state().remove_entry(&fqdn(name), key.into());
    }

    pub fn clear(&self) {
        self.state().names.clear();
        debug!(class = %self.class, "Record cache cleared");
    }

    /// Loads hint data. Returns the number of records accepted.
    pub fn preload<I>(&self, records: I) -> Result<usize, DomainError>
    where
        I: IntoIterator<Item = (Record, Credibility)>,
    {
        let mut loaded = 0;
        for (record, credibility) in records {
            self.add_record(record, credibility)?;
            loaded += 1;
        }
        debug!(class = %self.class, loaded, "Record cache preloaded");
        Ok(loaded)
    }

    /// Sets the sweep period in minutes; zero or negative stops sweeping.
    ///
    /// The first positive interval starts the eviction job when called from
    /// within a tokio runtime. Later calls only retune it.
    pub fn set_cleanup_interval(&self, minutes: i64) {
        let interval = CacheEvictionJob::interval_from_minutes(minutes);
        let mut cleanup = self.cleanup.lock().unwrap_or_else(|e| e.into_inner());

        if let Some(handle) = cleanup.as_ref() {
            handle.set_interval(interval);
            return;
        }
        if interval.is_none() {
            return;
        }
        if tokio::runtime::Handle::try_current().is_err() {
            debug!(class = %self.class, "No tokio runtime, eviction job not started");
            return;
        }

        let maintenance: Weak<dyn CacheMaintenancePort> = self.weak_self.clone();
        *cleanup = Some(
            CacheEvictionJob::new(maintenance)
                .with_interval(interval)
                .start(),
        );
    }

    pub fn cleanup_interval(&self) -> Option<Duration> {
        self.cleanup
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .as_ref()
            .and_then(EvictionHandle::interval)
    }
}

fn new_lru(max_entries: usize) -> LruCache<Name, NameEntries> {
    match NonZeroUsize::new(max_entries) {
        Some(capacity) => LruCache::new(capacity),
        None => LruCache::unbounded(),
    }
}

/// Cache keys are always absolute.
pub(super) fn fqdn(name: &Name) -> Name {
    let mut name = name.clone();
    name.set_fqdn(true);
    name
}
