use ferrous_resolv_domain::{DnsClass, RecordType};
use std::str::FromStr;

#[test]
fn test_record_type_codes() {
    for rtype in [
        RecordType::A,
        RecordType::NS,
        RecordType::CNAME,
        RecordType::SOA,
        RecordType::AAAA,
        RecordType::DNAME,
        RecordType::RRSIG,
        RecordType::ANY,
        RecordType::CAA,
    ] {
        assert_eq!(RecordType::from_u16(rtype.to_u16()), rtype);
    }
    assert_eq!(RecordType::from_u16(65_280), RecordType::Unknown(65_280));
}

#[test]
fn test_record_type_meta() {
    assert!(RecordType::ANY.is_meta());
    assert!(RecordType::AXFR.is_meta());
    assert!(RecordType::IXFR.is_meta());
    assert!(RecordType::OPT.is_meta());
    assert!(RecordType::TSIG.is_meta());
    assert!(RecordType::Unknown(200).is_meta());
    assert!(!RecordType::A.is_meta());
    assert!(!RecordType::RRSIG.is_meta());
}

#[test]
fn test_record_type_parse_and_display() {
    assert_eq!(RecordType::from_str("aaaa").unwrap(), RecordType::AAAA);
    assert_eq!(RecordType::from_str("TYPE39").unwrap(), RecordType::DNAME);
    assert_eq!(RecordType::Unknown(4000).to_string(), "TYPE4000");
    assert!(RecordType::from_str("bogus").is_err());
}

#[test]
fn test_class_codes() {
    assert_eq!(DnsClass::from_u16(1), DnsClass::IN);
    assert_eq!(DnsClass::from_u16(3), DnsClass::CH);
    assert_eq!(DnsClass::CH.to_u16(), 3);
    assert_eq!(DnsClass::from_u16(42).to_string(), "CLASS42");
}
