use super::entry::CacheEntry;
use super::key::EntryKey;
use super::metrics::CacheMetrics;
use super::storage::{fqdn, NameEntries, RecordCache, State};
use ferrous_resolv_domain::{Credibility, LookupOutcome, Name, NameExt, RRset, RecordType};
use std::sync::Arc;

impl RecordCache {
    /// Finds what the cache knows about `name`/`record_type`, walking from
    /// the name itself up to the root.
    ///
    /// Entries below `min` are ignored but kept. Expired entries met on the
    /// way are deleted.
    pub fn lookup(&self, name: &Name, record_type: RecordType, min: Credibility) -> LookupOutcome {
        let now = self.clock.now_secs();
        let mut state = self.state();
        self.lookup_locked(&mut state, name, record_type, min, now)
    }

    /// Positive answers for `name`/`record_type` at normal credibility.
    pub fn find_records(&self, name: &Name, record_type: RecordType) -> Option<Vec<Arc<RRset>>> {
        match self.lookup(name, record_type, Credibility::NORMAL) {
            LookupOutcome::Successful(answers) => Some(answers),
            _ => None,
        }
    }

    /// Like [`find_records`](Self::find_records) but also accepts glue.
    pub fn find_any_records(
        &self,
        name: &Name,
        record_type: RecordType,
    ) -> Option<Vec<Arc<RRset>>> {
        match self.lookup(name, record_type, Credibility::Glue) {
            LookupOutcome::Successful(answers) => Some(answers),
            _ => None,
        }
    }

    pub(super) fn lookup_locked(
        &self,
        state: &mut State,
        name: &Name,
        record_type: RecordType,
        min: Credibility,
        now: u64,
    ) -> LookupOutcome {
        let name = fqdn(name);
        let labels = name.num_labels() as usize;
        let mut expired = 0u64;
        let mut outcome = LookupOutcome::Unknown;

        for level in (0..=labels).rev() {
            let exact = level == labels;
            let tname = if exact {
                name.clone()
            } else {
                fqdn(&name.suffix(level))
            };

            let entries = if exact {
                state.names.get_mut(&tname)
            } else {
                state.names.peek_mut(&tname)
            };
            let Some(entries) = entries else {
                continue;
            };

            let before = entries.len();
            entries.retain(|_, entry| !entry.is_expired(now));
            expired += (before - entries.len()) as u64;
            if entries.is_empty() {
                state.names.pop(&tname);
                continue;
            }

            if let Some(found) = level_outcome(entries, exact, record_type, min) {
                outcome = found;
                break;
            }
        }

        CacheMetrics::bump(&self.metrics.lazy_deletions, expired);
        if outcome.is_unknown() {
            CacheMetrics::bump(&self.metrics.misses, 1);
        } else {
            CacheMetrics::bump(&self.metrics.hits, 1);
        }
        outcome
    }
}

fn level_outcome(
    entries: &NameEntries,
    exact: bool,
    record_type: RecordType,
    min: Credibility,
) -> Option<LookupOutcome> {
    let find = |key: EntryKey| entries.get(&key).filter(|entry| entry.qualifies(min));
    let find_set = |rtype: RecordType| find(EntryKey::Type(rtype)).and_then(CacheEntry::rrset);

    if exact && record_type == RecordType::ANY {
        let mut answers: Vec<Arc<RRset>> = entries
            .values()
            .filter(|entry| entry.qualifies(min))
            .filter_map(CacheEntry::rrset)
            .cloned()
            .collect();
        if !answers.is_empty() {
            answers.sort_by_key(|rrset| rrset.record_type().to_u16());
            return Some(LookupOutcome::Successful(answers));
        }
    } else if exact {
        if let Some(entry) = find(EntryKey::Type(record_type)) {
            return Some(match entry.rrset() {
                Some(rrset) => LookupOutcome::Successful(vec![Arc::clone(rrset)]),
                None => LookupOutcome::NxRrset,
            });
        }
        if let Some(rrset) = find_set(RecordType::CNAME) {
            return Some(LookupOutcome::Cname(Arc::clone(rrset)));
        }
    } else if let Some(rrset) = find_set(RecordType::DNAME) {
        return Some(LookupOutcome::Dname(Arc::clone(rrset)));
    }

    if let Some(rrset) = find_set(RecordType::NS) {
        return Some(LookupOutcome::Delegation(Arc::clone(rrset)));
    }

    if exact && find(EntryKey::Name).is_some() {
        return Some(LookupOutcome::NxDomain);
    }

    None
}
