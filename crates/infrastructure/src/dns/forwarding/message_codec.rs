//! Conversion between wire-format messages (via `hickory-proto`) and the
//! domain `DnsMessage`.
//!
//! Record data the resolver looks inside is decoded into typed
//! `RecordData`; anything else keeps its raw rdata. hickory has no typed
//! DNAME, so DNAME targets are read from the raw rdata, which RFC 6672
//! forbids compressing.

use ferrous_resolv_domain::{
    DnsClass, DnsMessage, DomainError, Name, Question, Record, RecordData, RecordType,
    ResponseCode,
};
use hickory_proto::op::{Message, MessageType, OpCode, Query};
use hickory_proto::rr::{
    DNSClass, RData, Record as HickoryRecord, RecordType as HickoryRecordType,
};
use hickory_proto::serialize::binary::{BinDecodable, BinEncodable, BinEncoder};
use tracing::debug;

pub struct MessageCodec;

impl MessageCodec {
    /// A recursive query for `question` with a random id.
    pub fn build_query(question: Question) -> DnsMessage {
        let mut message = DnsMessage::query(question);
        message.id = fastrand::u16(..);
        message
    }

    /// Serializes a query. Only the header id, RD flag and question are
    /// carried.
    pub fn encode_query(message: &DnsMessage) -> Result<Vec<u8>, DomainError> {
        let question = message.question.as_ref().ok_or_else(|| {
            DomainError::InvalidDomainName("Cannot encode a query without a question".into())
        })?;

        let mut query = Query::new();
        query.set_name(question.name.clone());
        query.set_query_type(HickoryRecordType::from(question.qtype.to_u16()));
        query.set_query_class(to_hickory_class(question.qclass));

        let mut wire = Message::new(message.id, MessageType::Query, OpCode::Query);
        wire.set_recursion_desired(message.recursion_desired);
        wire.add_query(query);

        let mut buf = Vec::with_capacity(512);
        let mut encoder = BinEncoder::new(&mut buf);
        wire.emit(&mut encoder).map_err(|e| {
            DomainError::InvalidDomainName(format!("Failed to serialize DNS message: {}", e))
        })?;

        Ok(buf)
    }

    /// Parses a wire-format message. Records whose data cannot be decoded
    /// are dropped.
    pub fn decode(bytes: &[u8]) -> Result<DnsMessage, DomainError> {
        let message = Message::from_vec(bytes).map_err(|e| {
            DomainError::InvalidDnsResponse(format!("Failed to parse DNS response: {}", e))
        })?;

        let question = message.queries().first().map(|query| {
            Question::new(
                query.name().clone(),
                RecordType::from_u16(u16::from(query.query_type())),
                DnsClass::from_u16(u16::from(query.query_class())),
            )
        });

        Ok(DnsMessage {
            id: message.id(),
            response: message.message_type() == MessageType::Response,
            authoritative: message.authoritative(),
            truncated: message.truncated(),
            recursion_desired: message.recursion_desired(),
            recursion_available: message.recursion_available(),
            rcode: ResponseCode::from_u16(u16::from(message.response_code())),
            question,
            answers: decode_section(message.answers()),
            authority: decode_section(message.name_servers()),
            additional: decode_section(message.additionals()),
        })
    }
}

fn to_hickory_class(class: DnsClass) -> DNSClass {
    match class {
        DnsClass::IN => DNSClass::IN,
        DnsClass::CH => DNSClass::CH,
        DnsClass::HS => DNSClass::HS,
        DnsClass::NONE => DNSClass::NONE,
        DnsClass::ANY => DNSClass::ANY,
        DnsClass::Unknown(_) => DNSClass::IN,
    }
}

fn decode_section(records: &[HickoryRecord]) -> Vec<Record> {
    records
        .iter()
        .filter_map(|record| match decode_record(record) {
            Ok(decoded) => Some(decoded),
            Err(e) => {
                debug!(name = %record.name(), error = %e, "Skipping undecodable record");
                None
            }
        })
        .collect()
}

fn decode_record(record: &HickoryRecord) -> Result<Record, DomainError> {
    Ok(Record::new(
        record.name().clone(),
        DnsClass::from_u16(u16::from(record.dns_class())),
        record.ttl(),
        decode_rdata(record)?,
    ))
}

fn decode_rdata(record: &HickoryRecord) -> Result<RecordData, DomainError> {
    let data = match record.data() {
        RData::A(a) => RecordData::A(a.0),
        RData::AAAA(aaaa) => RecordData::AAAA(aaaa.0),
        RData::NS(ns) => RecordData::NS(ns.0.clone()),
        RData::CNAME(cname) => RecordData::CNAME(cname.0.clone()),
        RData::PTR(ptr) => RecordData::PTR(ptr.0.clone()),
        RData::MX(mx) => RecordData::MX {
            preference: mx.preference(),
            exchange: mx.exchange().clone(),
        },
        RData::SRV(srv) => RecordData::SRV {
            priority: srv.priority(),
            weight: srv.weight(),
            port: srv.port(),
            target: srv.target().clone(),
        },
        RData::SOA(soa) => RecordData::SOA {
            mname: soa.mname().clone(),
            rname: soa.rname().clone(),
            serial: soa.serial(),
            refresh: soa.refresh() as u32,
            retry: soa.retry() as u32,
            expire: soa.expire() as u32,
            minimum: soa.minimum(),
        },
        RData::TXT(txt) => {
            RecordData::TXT(txt.txt_data().iter().map(|chunk| chunk.to_vec()).collect())
        }
        other => {
            let rtype = RecordType::from_u16(u16::from(record.record_type()));
            let rdata = other.to_bytes().map_err(|e| {
                DomainError::InvalidDnsResponse(format!("Failed to read {} rdata: {}", rtype, e))
            })?;
            raw_rdata(rtype, rdata)?
        }
    };
    Ok(data)
}

fn raw_rdata(rtype: RecordType, rdata: Vec<u8>) -> Result<RecordData, DomainError> {
    match rtype {
        RecordType::DNAME => {
            let target = Name::from_bytes(&rdata).map_err(|e| {
                DomainError::InvalidDnsResponse(format!("Invalid DNAME target: {}", e))
            })?;
            Ok(RecordData::DNAME(target))
        }
        RecordType::RRSIG => {
            let covered = rdata.get(..2).ok_or_else(|| {
                DomainError::InvalidDnsResponse("RRSIG rdata too short".into())
            })?;
            Ok(RecordData::RRSIG {
                type_covered: RecordType::from_u16(u16::from_be_bytes([covered[0], covered[1]])),
                rdata,
            })
        }
        _ => Ok(RecordData::Opaque { rtype, rdata }),
    }
}
