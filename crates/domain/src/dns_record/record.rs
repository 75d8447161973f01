use super::{DnsClass, RecordType};
use crate::name::Name;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::net::{Ipv4Addr, Ipv6Addr};

/// Typed record data for the types the resolver looks inside; everything
/// else travels as opaque bytes.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RecordData {
    A(Ipv4Addr),
    AAAA(Ipv6Addr),
    NS(Name),
    CNAME(Name),
    DNAME(Name),
    PTR(Name),
    MX {
        preference: u16,
        exchange: Name,
    },
    SRV {
        priority: u16,
        weight: u16,
        port: u16,
        target: Name,
    },
    SOA {
        mname: Name,
        rname: Name,
        serial: u32,
        refresh: u32,
        retry: u32,
        expire: u32,
        minimum: u32,
    },
    TXT(Vec<Vec<u8>>),
    RRSIG {
        type_covered: RecordType,
        rdata: Vec<u8>,
    },
    Opaque {
        rtype: RecordType,
        rdata: Vec<u8>,
    },
}

impl RecordData {
    pub fn record_type(&self) -> RecordType {
        match self {
            RecordData::A(_) => RecordType::A,
            RecordData::AAAA(_) => RecordType::AAAA,
            RecordData::NS(_) => RecordType::NS,
            RecordData::CNAME(_) => RecordType::CNAME,
            RecordData::DNAME(_) => RecordType::DNAME,
            RecordData::PTR(_) => RecordType::PTR,
            RecordData::MX { .. } => RecordType::MX,
            RecordData::SRV { .. } => RecordType::SRV,
            RecordData::SOA { .. } => RecordType::SOA,
            RecordData::TXT(_) => RecordType::TXT,
            RecordData::RRSIG { .. } => RecordType::RRSIG,
            RecordData::Opaque { rtype, .. } => *rtype,
        }
    }

    /// Target of a CNAME or DNAME.
    pub fn alias_target(&self) -> Option<&Name> {
        match self {
            RecordData::CNAME(target) | RecordData::DNAME(target) => Some(target),
            _ => None,
        }
    }

    /// Name whose addresses a server would put in the additional section.
    pub fn additional_name(&self) -> Option<&Name> {
        match self {
            RecordData::NS(name) => Some(name),
            RecordData::MX { exchange, .. } => Some(exchange),
            RecordData::SRV { target, .. } => Some(target),
            _ => None,
        }
    }

    /// Type covered by a signature record.
    pub fn covered_type(&self) -> Option<RecordType> {
        match self {
            RecordData::RRSIG { type_covered, .. } => Some(*type_covered),
            _ => None,
        }
    }

    pub fn soa_minimum(&self) -> Option<u32> {
        match self {
            RecordData::SOA { minimum, .. } => Some(*minimum),
            _ => None,
        }
    }
}

impl fmt::Display for RecordData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordData::A(ip) => write!(f, "{}", ip),
            RecordData::AAAA(ip) => write!(f, "{}", ip),
            RecordData::NS(name)
            | RecordData::CNAME(name)
            | RecordData::DNAME(name)
            | RecordData::PTR(name) => write!(f, "{}", name),
            RecordData::MX {
                preference,
                exchange,
            } => write!(f, "{} {}", preference, exchange),
            RecordData::SRV {
                priority,
                weight,
                port,
                target,
            } => write!(f, "{} {} {} {}", priority, weight, port, target),
            RecordData::SOA {
                mname,
                rname,
                serial,
                refresh,
                retry,
                expire,
                minimum,
            } => write!(
                f,
                "{} {} {} {} {} {} {}",
                mname, rname, serial, refresh, retry, expire, minimum
            ),
            RecordData::TXT(strings) => {
                let parts: Vec<String> = strings
                    .iter()
                    .map(|s| format!("\"{}\"", String::from_utf8_lossy(s)))
                    .collect();
                f.write_str(&parts.join(" "))
            }
            RecordData::RRSIG { type_covered, rdata } => {
                write!(f, "{} ({} octets)", type_covered, rdata.len())
            }
            RecordData::Opaque { rdata, .. } => write!(f, "\\# {}", rdata.len()),
        }
    }
}

/// A single resource record.
///
/// Equality and hashing ignore the TTL, so the same data seen twice with
/// different remaining lifetimes is one record.
#[derive(Debug, Clone)]
pub struct Record {
    pub name: Name,
    pub class: DnsClass,
    pub ttl: u32,
    pub data: RecordData,
}

impl Record {
    pub fn new(name: Name, class: DnsClass, ttl: u32, data: RecordData) -> Self {
        Self {
            name,
            class,
            ttl,
            data,
        }
    }

    /// Shorthand for class IN.
    pub fn from_data(name: Name, ttl: u32, data: RecordData) -> Self {
        Self::new(name, DnsClass::IN, ttl, data)
    }

    pub fn record_type(&self) -> RecordType {
        self.data.record_type()
    }

    /// The type of the RRset this record belongs to; signatures belong to the
    /// set they cover.
    pub fn rrset_type(&self) -> RecordType {
        self.data.covered_type().unwrap_or_else(|| self.record_type())
    }

    pub fn is_signature(&self) -> bool {
        self.record_type() == RecordType::RRSIG
    }
}

impl PartialEq for Record {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && self.class == other.class && self.data == other.data
    }
}

impl Eq for Record {}

impl Hash for Record {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
        self.class.hash(state);
        self.data.hash(state);
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} {} {}",
            self.name,
            self.ttl,
            self.class,
            self.record_type(),
            self.data
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::name::parse_name;

    #[test]
    fn test_equality_ignores_ttl() {
        let name = parse_name("host.example.").unwrap();
        let a = Record::from_data(name.clone(), 300, RecordData::A(Ipv4Addr::new(192, 0, 2, 1)));
        let b = Record::from_data(name, 60, RecordData::A(Ipv4Addr::new(192, 0, 2, 1)));
        assert_eq!(a, b);
    }

    #[test]
    fn test_signature_belongs_to_covered_set() {
        let sig = Record::from_data(
            parse_name("host.example.").unwrap(),
            300,
            RecordData::RRSIG {
                type_covered: RecordType::A,
                rdata: vec![0, 1, 2],
            },
        );
        assert_eq!(sig.record_type(), RecordType::RRSIG);
        assert_eq!(sig.rrset_type(), RecordType::A);
        assert!(sig.is_signature());
    }

    #[test]
    fn test_capabilities() {
        let target = parse_name("mail.example.").unwrap();
        let mx = RecordData::MX {
            preference: 10,
            exchange: target.clone(),
        };
        assert_eq!(mx.additional_name(), Some(&target));
        assert_eq!(mx.alias_target(), None);
        assert_eq!(RecordData::CNAME(target.clone()).alias_target(), Some(&target));
    }
}
