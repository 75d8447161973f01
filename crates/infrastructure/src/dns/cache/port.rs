use super::storage::RecordCache;
use ferrous_resolv_application::ports::{IngestedResponse, ResolverCache};
use ferrous_resolv_domain::{Credibility, DnsMessage, LookupOutcome, Name, RecordType};

impl ResolverCache for RecordCache {
    fn lookup(&self, name: &Name, record_type: RecordType, min: Credibility) -> LookupOutcome {
        RecordCache::lookup(self, name, record_type, min)
    }

    fn ingest_response(&self, message: &DnsMessage) -> Option<IngestedResponse> {
        RecordCache::ingest_response(self, message)
    }
}
