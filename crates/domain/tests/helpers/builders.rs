use ferrous_resolv_domain::{parse_name, Name, Record, RecordData};
use std::net::Ipv4Addr;

pub fn name(s: &str) -> Name {
    parse_name(s).unwrap()
}

pub fn a(owner: &str, ttl: u32, ip: [u8; 4]) -> Record {
    Record::from_data(
        name(owner),
        ttl,
        RecordData::A(Ipv4Addr::new(ip[0], ip[1], ip[2], ip[3])),
    )
}

pub fn cname(owner: &str, ttl: u32, target: &str) -> Record {
    Record::from_data(name(owner), ttl, RecordData::CNAME(name(target)))
}

pub fn ns(owner: &str, ttl: u32, host: &str) -> Record {
    Record::from_data(name(owner), ttl, RecordData::NS(name(host)))
}

pub fn soa(owner: &str, ttl: u32, minimum: u32) -> Record {
    Record::from_data(
        name(owner),
        ttl,
        RecordData::SOA {
            mname: name("ns1.example."),
            rname: name("hostmaster.example."),
            serial: 1,
            refresh: 3600,
            retry: 600,
            expire: 86_400,
            minimum,
        },
    )
}
