use super::storage::RecordCache;
use ferrous_resolv_domain::Name;

impl RecordCache {
    /// Owner names currently held, least recently used last.
    pub(crate) fn names_snapshot(&self) -> Vec<Name> {
        self.state()
            .names
            .iter()
            .map(|(name, _)| name.clone())
            .collect()
    }

    /// Removes expired entries of the given names, re-checking each under
    /// the lock. Names that changed or vanished since the snapshot are
    /// handled as found.
    pub(crate) fn sweep_names(&self, names: &[Name]) -> usize {
        let now = self.clock.now_secs();
        let mut state = self.state();
        let mut removed = 0;

        for name in names {
            let Some(entries) = state.names.peek_mut(name) else {
                continue;
            };
            let before = entries.len();
            entries.retain(|_, entry| !entry.is_expired(now));
            removed += before - entries.len();
            if entries.is_empty() {
                state.names.pop(name);
            }
        }

        removed
    }
}
