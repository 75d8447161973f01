use async_trait::async_trait;
use ferrous_resolv_application::ports::{
    CacheProvider, DnsSender, IngestedResponse, ResolverCache,
};
use ferrous_resolv_application::use_cases::{LookupOptions, ResolverContext};
use ferrous_resolv_domain::{
    parse_name, Credibility, DnsClass, DnsMessage, DomainError, LookupOutcome, Name, Question,
    RRset, Record, RecordData, RecordType, ResponseCode,
};
use std::collections::HashMap;
use std::net::Ipv4Addr;
use std::sync::{Arc, Mutex};

pub fn name(s: &str) -> Name {
    parse_name(s).unwrap()
}

pub fn a_set(owner: &str, ip: [u8; 4]) -> Arc<RRset> {
    Arc::new(RRset::new(Record::from_data(
        name(owner),
        300,
        RecordData::A(Ipv4Addr::from(ip)),
    )))
}

pub fn cname_set(owner: &str, target: &str) -> Arc<RRset> {
    Arc::new(RRset::new(Record::from_data(
        name(owner),
        300,
        RecordData::CNAME(name(target)),
    )))
}

pub fn dname_set(owner: &str, target: &str) -> Arc<RRset> {
    Arc::new(RRset::new(Record::from_data(
        name(owner),
        300,
        RecordData::DNAME(name(target)),
    )))
}

pub fn ns_set(owner: &str, host: &str) -> Arc<RRset> {
    Arc::new(RRset::new(Record::from_data(
        name(owner),
        300,
        RecordData::NS(name(host)),
    )))
}

/// Cache double answering from a fixed table.
#[derive(Default)]
pub struct MockResolverCache {
    entries: Mutex<HashMap<(Name, RecordType), LookupOutcome>>,
    ingest_results: Mutex<HashMap<Name, IngestedResponse>>,
    lookups: Mutex<Vec<Name>>,
    ingested: Mutex<Vec<DnsMessage>>,
}

impl MockResolverCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_outcome(&self, owner: &str, record_type: RecordType, outcome: LookupOutcome) {
        self.entries
            .lock()
            .unwrap()
            .insert((name(owner), record_type), outcome);
    }

    /// What `ingest_response` reports for a response to `qname`.
    pub fn set_ingest_result(&self, qname: &str, outcome: LookupOutcome, aliases: Vec<&str>) {
        self.ingest_results.lock().unwrap().insert(
            name(qname),
            IngestedResponse {
                outcome,
                aliases: aliases.into_iter().map(name).collect(),
            },
        );
    }

    pub fn lookups(&self) -> Vec<Name> {
        self.lookups.lock().unwrap().clone()
    }

    pub fn ingested_count(&self) -> usize {
        self.ingested.lock().unwrap().len()
    }
}

impl ResolverCache for MockResolverCache {
    fn lookup(&self, owner: &Name, record_type: RecordType, _min: Credibility) -> LookupOutcome {
        self.lookups.lock().unwrap().push(owner.clone());
        self.entries
            .lock()
            .unwrap()
            .get(&(owner.clone(), record_type))
            .cloned()
            .unwrap_or(LookupOutcome::Unknown)
    }

    fn ingest_response(&self, message: &DnsMessage) -> Option<IngestedResponse> {
        self.ingested.lock().unwrap().push(message.clone());
        let question = message.question.as_ref()?;
        if let Some(result) = self.ingest_results.lock().unwrap().get(&question.name) {
            return Some(result.clone());
        }
        match message.rcode {
            ResponseCode::NXDomain => Some(IngestedResponse {
                outcome: LookupOutcome::NxDomain,
                aliases: Vec::new(),
            }),
            _ => None,
        }
    }
}

pub struct SingleCacheProvider(pub Arc<MockResolverCache>);

impl CacheProvider for SingleCacheProvider {
    fn cache_for(&self, _class: DnsClass) -> Arc<dyn ResolverCache> {
        self.0.clone()
    }
}

#[derive(Clone)]
pub enum MockReply {
    Rcode(ResponseCode),
    Error(DomainError),
    WrongQuestion,
}

/// Sender double: records every question and answers from a table,
/// NXDOMAIN by default.
#[derive(Default)]
pub struct MockDnsSender {
    replies: Mutex<HashMap<Name, MockReply>>,
    queries: Mutex<Vec<Question>>,
}

impl MockDnsSender {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_reply(&self, qname: &str, reply: MockReply) {
        self.replies.lock().unwrap().insert(name(qname), reply);
    }

    pub fn queried_names(&self) -> Vec<String> {
        self.queries
            .lock()
            .unwrap()
            .iter()
            .map(|q| q.name.to_string())
            .collect()
    }

    pub fn query_count(&self) -> usize {
        self.queries.lock().unwrap().len()
    }
}

#[async_trait]
impl DnsSender for MockDnsSender {
    async fn send(&self, query: &DnsMessage) -> Result<DnsMessage, DomainError> {
        let question = query
            .question
            .clone()
            .ok_or_else(|| DomainError::InvalidDnsResponse("query without question".into()))?;
        self.queries.lock().unwrap().push(question.clone());

        let reply = self
            .replies
            .lock()
            .unwrap()
            .get(&question.name)
            .cloned()
            .unwrap_or(MockReply::Rcode(ResponseCode::NXDomain));

        match reply {
            MockReply::Rcode(rcode) => Ok(DnsMessage::response_to(query).with_rcode(rcode)),
            MockReply::Error(e) => Err(e),
            MockReply::WrongQuestion => {
                let mut response = DnsMessage::response_to(query);
                response.question = Some(Question::new(
                    name("unrelated.example."),
                    question.qtype,
                    question.qclass,
                ));
                Ok(response)
            }
        }
    }
}

pub fn make_context(
    cache: Arc<MockResolverCache>,
    sender: Arc<MockDnsSender>,
    options: LookupOptions,
) -> ResolverContext {
    ResolverContext::new(Arc::new(SingleCacheProvider(cache)), sender, options)
}
