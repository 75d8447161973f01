use ferrous_resolv_domain::{Credibility, RRset};
use std::sync::Arc;

#[derive(Debug, Clone)]
pub(super) enum EntryData {
    Positive(Arc<RRset>),
    Negative,
}

#[derive(Debug, Clone)]
pub(super) struct CacheEntry {
    pub(super) data: EntryData,
    pub(super) credibility: Credibility,
    /// Absolute expiry in clock seconds.
    pub(super) expires_at: u64,
}

impl CacheEntry {
    pub(super) fn positive(
        rrset: Arc<RRset>,
        credibility: Credibility,
        now: u64,
        max_ttl: Option<u32>,
    ) -> Self {
        let ttl = match max_ttl {
            Some(max) => rrset.ttl().min(max),
            None => rrset.ttl(),
        };
        Self {
            data: EntryData::Positive(rrset),
            credibility,
            expires_at: now.saturating_add(u64::from(ttl)),
        }
    }

    pub(super) fn negative(ttl: u32, credibility: Credibility, now: u64, max_ttl: u32) -> Self {
        Self {
            data: EntryData::Negative,
            credibility,
            expires_at: now.saturating_add(u64::from(ttl.min(max_ttl))),
        }
    }

    #[inline]
    pub(super) fn is_expired(&self, now: u64) -> bool {
        now >= self.expires_at
    }

    #[inline]
    pub(super) fn qualifies(&self, min: Credibility) -> bool {
        self.credibility >= min
    }

    pub(super) fn rrset(&self) -> Option<&Arc<RRset>> {
        match &self.data {
            EntryData::Positive(rrset) => Some(rrset),
            EntryData::Negative => None,
        }
    }
}
