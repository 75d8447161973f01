use ferrous_resolv_domain::{
    Credibility, DnsClass, DnsMessage, LookupOutcome, Name, RecordType,
};
use std::sync::Arc;

/// What the cache learned from a response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IngestedResponse {
    pub outcome: LookupOutcome,
    /// Names found to be aliases while following the answer chain, in
    /// order. Only meaningful when the chain reached an answer.
    pub aliases: Vec<Name>,
}

/// The view of the record cache the resolution driver needs.
pub trait ResolverCache: Send + Sync {
    fn lookup(&self, name: &Name, record_type: RecordType, min: Credibility) -> LookupOutcome;

    /// Caches the contents of a response. `None` when the response carries
    /// nothing cacheable (bad rcode, no question).
    fn ingest_response(&self, message: &DnsMessage) -> Option<IngestedResponse>;
}

/// Hands out one cache per class.
pub trait CacheProvider: Send + Sync {
    fn cache_for(&self, class: DnsClass) -> Arc<dyn ResolverCache>;
}
