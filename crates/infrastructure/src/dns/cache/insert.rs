use super::entry::{CacheEntry, EntryData};
use super::key::EntryKey;
use super::metrics::CacheMetrics;
use super::storage::{fqdn, RecordCache, State};
use ferrous_resolv_domain::{Credibility, DomainError, Name, RRset, Record, RecordType};
use std::sync::Arc;
use tracing::debug;

fn ensure_cacheable(record_type: RecordType) -> Result<(), DomainError> {
    if record_type.is_meta() {
        return Err(DomainError::MetaTypeNotCacheable(record_type.to_string()));
    }
    Ok(())
}

fn absolute_rrset(rrset: RRset) -> RRset {
    if rrset.name().is_fqdn() {
        return rrset;
    }
    let name = fqdn(rrset.name());
    let records = rrset
        .records()
        .iter()
        .chain(rrset.signatures())
        .cloned()
        .map(|mut record| {
            record.name = name.clone();
            record
        });
    RRset::from_records(records).unwrap_or(rrset)
}

impl RecordCache {
    /// Adds one record at `credibility`.
    ///
    /// A more credible insert replaces what is there; an equally credible
    /// one joins an existing positive set. Signatures join the set of the
    /// type they cover.
    pub fn add_record(&self, record: Record, credibility: Credibility) -> Result<(), DomainError> {
        let record_type = record.rrset_type();
        ensure_cacheable(record_type)?;

        let mut record = record;
        record.name.set_fqdn(true);
        let name = record.name.clone();
        let key = EntryKey::Type(record_type);

        let now = self.clock.now_secs();
        let mut state = self.state();
        let expired = state.expire_entry(&name, key, now);
        CacheMetrics::bump(&self.metrics.lazy_deletions, expired);

        if let Some(entry) = state.peek_entry_mut(&name, key) {
            if credibility < entry.credibility {
                return Ok(());
            }
            if credibility == entry.credibility {
                if let EntryData::Positive(rrset) = &mut entry.data {
                    if rrset.accepts(&record) {
                        Arc::make_mut(rrset).add(record);
                    }
                }
                return Ok(());
            }
        }

        self.store_rrset(&mut state, Arc::new(RRset::new(record)), credibility, now);
        Ok(())
    }

    /// Adds a whole RRset at `credibility`. A zero TTL removes an existing
    /// entry that is no more credible instead of caching.
    pub fn add_rrset(&self, rrset: RRset, credibility: Credibility) -> Result<(), DomainError> {
        ensure_cacheable(rrset.record_type())?;
        let rrset = Arc::new(absolute_rrset(rrset));
        let now = self.clock.now_secs();
        let mut state = self.state();
        self.store_rrset(&mut state, rrset, credibility, now);
        Ok(())
    }

    /// Records that `name` (for [`EntryKey::Name`]) or one of its types does
    /// not exist. The lifetime comes from the SOA minimum; a missing SOA or
    /// an SOA with TTL 0 only removes what it may override.
    ///
    /// # Panics
    ///
    /// Panics when `key` is `RecordType::ANY`.
    pub fn add_negative(
        &self,
        name: &Name,
        key: EntryKey,
        soa: Option<&Record>,
        credibility: Credibility,
    ) {
        assert!(
            key != EntryKey::Type(RecordType::ANY),
            "negative entries cannot be keyed by ANY"
        );
        let name = fqdn(name);
        let now = self.clock.now_secs();
        let mut state = self.state();
        self.store_negative(&mut state, &name, key, soa, credibility, now);
    }

    /// Returns true when the set was installed.
    pub(super) fn store_rrset(
        &self,
        state: &mut State,
        rrset: Arc<RRset>,
        credibility: Credibility,
        now: u64,
    ) -> bool {
        let name = rrset.name().clone();
        let key = EntryKey::Type(rrset.record_type());
        let expired = state.expire_entry(&name, key, now);
        CacheMetrics::bump(&self.metrics.lazy_deletions, expired);

        if rrset.ttl() == 0 || state.max_positive_ttl == Some(0) {
            if state
                .peek_entry(&name, key)
                .is_some_and(|entry| entry.credibility <= credibility)
            {
                state.remove_entry(&name, key);
            }
            return false;
        }

        if state
            .peek_entry(&name, key)
            .is_some_and(|entry| credibility < entry.credibility)
        {
            return false;
        }

        let entry = CacheEntry::positive(rrset, credibility, now, state.max_positive_ttl);
        if state.insert_entry(&name, key, entry) {
            CacheMetrics::bump(&self.metrics.capacity_evictions, 1);
        }
        CacheMetrics::bump(&self.metrics.insertions, 1);
        true
    }

    pub(super) fn store_negative(
        &self,
        state: &mut State,
        name: &Name,
        key: EntryKey,
        soa: Option<&Record>,
        credibility: Credibility,
        now: u64,
    ) {
        let expired = state.expire_entry(name, key, now);
        CacheMetrics::bump(&self.metrics.lazy_deletions, expired);

        let ttl = soa.map_or(0, |soa| soa.ttl);
        if ttl == 0 {
            if state
                .peek_entry(name, key)
                .is_some_and(|entry| entry.credibility <= credibility)
            {
                state.remove_entry(name, key);
            }
            return;
        }

        if state
            .peek_entry(name, key)
            .is_some_and(|entry| credibility < entry.credibility)
        {
            return;
        }

        let minimum = soa.and_then(|soa| soa.data.soa_minimum()).unwrap_or(ttl);
        let entry = CacheEntry::negative(minimum, credibility, now, state.max_negative_ttl);
        debug!(
            name = %name,
            key = %key,
            expires_at = entry.expires_at,
            "Caching negative entry"
        );
        if state.insert_entry(name, key, entry) {
            CacheMetrics::bump(&self.metrics.capacity_evictions, 1);
        }
        CacheMetrics::bump(&self.metrics.insertions, 1);
    }
}
