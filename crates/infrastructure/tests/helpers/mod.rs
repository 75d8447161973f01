#![allow(dead_code)]
pub mod dns_server_mock;

use async_trait::async_trait;
use ferrous_resolv_application::ports::DnsSender;
use ferrous_resolv_domain::{
    parse_name, CacheConfig, DnsClass, DnsMessage, DomainError, Name, Question, Record,
    RecordData, RecordType, ResponseCode,
};
use ferrous_resolv_infrastructure::dns::{ManualClock, RecordCache};
use std::collections::HashMap;
use std::net::{Ipv4Addr, Ipv6Addr};
use std::sync::{Arc, Mutex};

pub const START_SECS: u64 = 1_000_000;

pub fn name(s: &str) -> Name {
    parse_name(s).unwrap()
}

pub fn a(owner: &str, ttl: u32, ip: [u8; 4]) -> Record {
    Record::from_data(name(owner), ttl, RecordData::A(Ipv4Addr::from(ip)))
}

pub fn aaaa(owner: &str, ttl: u32, ip: Ipv6Addr) -> Record {
    Record::from_data(name(owner), ttl, RecordData::AAAA(ip))
}

pub fn cname(owner: &str, ttl: u32, target: &str) -> Record {
    Record::from_data(name(owner), ttl, RecordData::CNAME(name(target)))
}

pub fn dname(owner: &str, ttl: u32, target: &str) -> Record {
    Record::from_data(name(owner), ttl, RecordData::DNAME(name(target)))
}

pub fn ns(owner: &str, ttl: u32, host: &str) -> Record {
    Record::from_data(name(owner), ttl, RecordData::NS(name(host)))
}

pub fn mx(owner: &str, ttl: u32, preference: u16, exchange: &str) -> Record {
    Record::from_data(
        name(owner),
        ttl,
        RecordData::MX {
            preference,
            exchange: name(exchange),
        },
    )
}

pub fn soa(zone: &str, ttl: u32, minimum: u32) -> Record {
    Record::from_data(
        name(zone),
        ttl,
        RecordData::SOA {
            mname: name(&format!("ns1.{}", zone)),
            rname: name(&format!("hostmaster.{}", zone)),
            serial: 2024_01_01,
            refresh: 3600,
            retry: 600,
            expire: 86_400,
            minimum,
        },
    )
}

pub fn rrsig(owner: &str, ttl: u32, covered: RecordType) -> Record {
    let code = covered.to_u16().to_be_bytes();
    Record::from_data(
        name(owner),
        ttl,
        RecordData::RRSIG {
            type_covered: covered,
            rdata: vec![code[0], code[1], 8, 2],
        },
    )
}

/// Cache on a manual clock with the background sweep disabled.
pub fn test_cache() -> (Arc<RecordCache>, Arc<ManualClock>) {
    test_cache_with(CacheConfig {
        cleanup_interval_minutes: 0,
        ..CacheConfig::default()
    })
}

pub fn test_cache_with(config: CacheConfig) -> (Arc<RecordCache>, Arc<ManualClock>) {
    let clock = Arc::new(ManualClock::new(START_SECS));
    let cache = RecordCache::with_clock(DnsClass::IN, &config, clock.clone());
    (cache, clock)
}

pub fn question(qname: &str, qtype: RecordType) -> Question {
    Question::new(name(qname), qtype, DnsClass::IN)
}

/// Empty NOERROR response to `qname`/`qtype`.
pub fn response(qname: &str, qtype: RecordType) -> DnsMessage {
    DnsMessage::response_to(&DnsMessage::query(question(qname, qtype)))
}

pub fn nxdomain(qname: &str, qtype: RecordType) -> DnsMessage {
    response(qname, qtype).with_rcode(ResponseCode::NXDomain)
}

/// Network double answering from a table keyed by question.
#[derive(Default)]
pub struct MockDnsSender {
    responses: Mutex<HashMap<(Name, RecordType), Result<DnsMessage, DomainError>>>,
    queries: Mutex<Vec<Question>>,
}

impl MockDnsSender {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_response(self, message: DnsMessage) -> Self {
        let question = message.question.clone().expect("response needs a question");
        self.responses
            .lock()
            .unwrap()
            .insert((question.name, question.qtype), Ok(message));
        self
    }

    pub fn with_error(self, qname: &str, qtype: RecordType, error: DomainError) -> Self {
        self.responses
            .lock()
            .unwrap()
            .insert((name(qname), qtype), Err(error));
        self
    }

    pub fn queries(&self) -> Vec<Question> {
        self.queries.lock().unwrap().clone()
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

        match self
            .responses
            .lock()
            .unwrap()
            .get(&(question.name.clone(), question.qtype))
        {
            Some(Ok(message)) => {
                let mut message = message.clone();
                message.id = query.id;
                Ok(message)
            }
            Some(Err(e)) => Err(e.clone()),
            None => Ok(DnsMessage::response_to(query).with_rcode(ResponseCode::ServFail)),
        }
    }
}
