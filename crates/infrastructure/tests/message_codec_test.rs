mod helpers;

use ferrous_resolv_domain::{
    Credibility, DnsClass, RecordData, RecordType, ResponseCode,
};
use ferrous_resolv_infrastructure::dns::MessageCodec;
use helpers::*;
use std::net::Ipv4Addr;

/// Authoritative answer for www.example.com/A whose answer section is a
/// DNAME example.com -> example.net, the synthesized CNAME and the final A.
#[rustfmt::skip]
fn dname_response() -> Vec<u8> {
    vec![
        // header: id 0xbeef, QR AA RD, RA, 1 question, 3 answers
        0xbe, 0xef, 0x85, 0x80, 0x00, 0x01, 0x00, 0x03, 0x00, 0x00, 0x00, 0x00,
        // question at 12: www.example.com A IN
        3, b'w', b'w', b'w',
        7, b'e', b'x', b'a', b'm', b'p', b'l', b'e',
        3, b'c', b'o', b'm', 0,
        0x00, 0x01, 0x00, 0x01,
        // example.com (pointer to 16) DNAME example.net, ttl 3600
        0xc0, 0x10, 0x00, 0x27, 0x00, 0x01, 0x00, 0x00, 0x0e, 0x10, 0x00, 0x0d,
        7, b'e', b'x', b'a', b'm', b'p', b'l', b'e', 3, b'n', b'e', b't', 0,
        // www.example.com (pointer to 12) CNAME www.example.net, ttl 0
        0xc0, 0x0c, 0x00, 0x05, 0x00, 0x01, 0x00, 0x00, 0x00, 0x00, 0x00, 0x06,
        3, b'w', b'w', b'w', 0xc0, 0x2d,
        // www.example.net A 192.0.2.10, ttl 300
        3, b'w', b'w', b'w', 0xc0, 0x2d, 0x00, 0x01, 0x00, 0x01, 0x00, 0x00, 0x01, 0x2c, 0x00, 0x04,
        192, 0, 2, 10,
    ]
}

#[rustfmt::skip]
fn nxdomain_response() -> Vec<u8> {
    vec![
        0x12, 0x34, 0x81, 0x83, 0x00, 0x01, 0x00, 0x00, 0x00, 0x01, 0x00, 0x00,
        // question at 12: nope.example.com AAAA IN
        4, b'n', b'o', b'p', b'e',
        7, b'e', b'x', b'a', b'm', b'p', b'l', b'e',
        3, b'c', b'o', b'm', 0,
        0x00, 0x1c, 0x00, 0x01,
        // example.com (pointer to 17) SOA, ttl 900
        0xc0, 0x11, 0x00, 0x06, 0x00, 0x01, 0x00, 0x00, 0x03, 0x84, 0x00, 0x22,
        // mname ns1.example.com, rname admin.example.com
        3, b'n', b's', b'1', 0xc0, 0x11,
        5, b'a', b'd', b'm', b'i', b'n', 0xc0, 0x11,
        // serial, refresh, retry, expire, minimum
        0x00, 0x00, 0x00, 0x01,
        0x00, 0x00, 0x0e, 0x10,
        0x00, 0x00, 0x02, 0x58,
        0x00, 0x01, 0x51, 0x80,
        0x00, 0x00, 0x00, 0x3c,
    ]
}

#[test]
fn test_decode_header_flags() {
    let message = MessageCodec::decode(&dname_response()).unwrap();

    assert_eq!(message.id, 0xbeef);
    assert!(message.response);
    assert!(message.authoritative);
    assert!(message.recursion_desired);
    assert!(message.recursion_available);
    assert!(!message.truncated);
    assert_eq!(message.rcode, ResponseCode::NoError);
    assert_eq!(
        message.question,
        Some(question("www.example.com.", RecordType::A))
    );
}

#[test]
fn test_decode_dname_cname_and_address() {
    let message = MessageCodec::decode(&dname_response()).unwrap();

    assert_eq!(message.answers.len(), 3);
    assert_eq!(message.answers[0].name, name("example.com."));
    assert_eq!(message.answers[0].data, RecordData::DNAME(name("example.net.")));
    assert_eq!(message.answers[0].ttl, 3600);
    assert_eq!(message.answers[1].data, RecordData::CNAME(name("www.example.net.")));
    assert_eq!(message.answers[2].name, name("www.example.net."));
    assert_eq!(message.answers[2].class, DnsClass::IN);
    assert_eq!(
        message.answers[2].data,
        RecordData::A(Ipv4Addr::new(192, 0, 2, 10))
    );
}

#[test]
fn test_decode_soa_in_authority() {
    let message = MessageCodec::decode(&nxdomain_response()).unwrap();

    assert_eq!(message.rcode, ResponseCode::NXDomain);
    assert!(message.answers.is_empty());
    assert_eq!(message.authority.len(), 1);
    assert_eq!(message.authority[0].ttl, 900);
    assert_eq!(message.authority[0].data.soa_minimum(), Some(60));
}

#[test]
fn test_decoded_dname_response_feeds_cache() {
    let message = MessageCodec::decode(&dname_response()).unwrap();
    let (cache, _) = test_cache();

    let ingested = cache.ingest_response(&message).unwrap();

    assert!(ingested.outcome.is_successful());
    assert_eq!(ingested.aliases, vec![name("www.example.com.")]);
    assert!(cache
        .lookup(&name("mail.example.com."), RecordType::A, Credibility::NORMAL)
        .is_dname());
}

#[test]
fn test_decoded_nxdomain_feeds_cache() {
    let message = MessageCodec::decode(&nxdomain_response()).unwrap();
    let (cache, clock) = test_cache();

    assert!(cache.ingest(&message).unwrap().is_nxdomain());

    let owner = name("nope.example.com.");
    clock.advance(59);
    assert!(cache.lookup(&owner, RecordType::A, Credibility::NORMAL).is_nxdomain());
    clock.advance(1);
    assert!(cache.lookup(&owner, RecordType::A, Credibility::NORMAL).is_unknown());
}

#[test]
fn test_truncated_message_is_decoded() {
    let mut bytes = nxdomain_response();
    bytes[2] |= 0x02;

    let message = MessageCodec::decode(&bytes).unwrap();
    assert!(message.truncated);
}
