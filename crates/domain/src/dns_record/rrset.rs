use super::{DnsClass, Record, RecordType};
use crate::name::Name;
use std::fmt;

/// Records sharing owner name, type and class, plus the signatures covering
/// them. Insertion order is kept and duplicates are dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RRset {
    name: Name,
    rtype: RecordType,
    class: DnsClass,
    records: Vec<Record>,
    signatures: Vec<Record>,
}

impl RRset {
    pub fn new(record: Record) -> Self {
        let mut rrset = Self {
            name: record.name.clone(),
            rtype: record.rrset_type(),
            class: record.class,
            records: Vec::new(),
            signatures: Vec::new(),
        };
        rrset.add(record);
        rrset
    }

    /// Builds a set from records that must all share name, type and class.
    /// Returns `None` for an empty iterator.
    pub fn from_records<I>(records: I) -> Option<Self>
    where
        I: IntoIterator<Item = Record>,
    {
        let mut iter = records.into_iter();
        let mut rrset = RRset::new(iter.next()?);
        for record in iter {
            rrset.add(record);
        }
        Some(rrset)
    }

    /// Adds a record or signature, ignoring exact duplicates.
    ///
    /// # Panics
    ///
    /// Panics if the record does not belong to this set.
    pub fn add(&mut self, record: Record) {
        assert!(
            self.accepts(&record),
            "record {} does not belong to RRset {} {} {}",
            record,
            self.name,
            self.class,
            self.rtype
        );
        let target = if record.is_signature() {
            &mut self.signatures
        } else {
            &mut self.records
        };
        if !target.contains(&record) {
            target.push(record);
        }
    }

    pub fn accepts(&self, record: &Record) -> bool {
        record.name == self.name && record.class == self.class && record.rrset_type() == self.rtype
    }

    /// Merges every record and signature of `other` into this set.
    pub fn merge(&mut self, other: &RRset) {
        for record in other.records.iter().chain(other.signatures.iter()) {
            self.add(record.clone());
        }
    }

    pub fn name(&self) -> &Name {
        &self.name
    }

    pub fn record_type(&self) -> RecordType {
        self.rtype
    }

    pub fn class(&self) -> DnsClass {
        self.class
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn signatures(&self) -> &[Record] {
        &self.signatures
    }

    pub fn first(&self) -> Option<&Record> {
        self.records.first()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Smallest TTL among the records, or among the signatures when the set
    /// holds only signatures.
    pub fn ttl(&self) -> u32 {
        let source = if self.records.is_empty() {
            &self.signatures
        } else {
            &self.records
        };
        source.iter().map(|r| r.ttl).min().unwrap_or(0)
    }
}

impl fmt::Display for RRset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{{ {} {} {} {} [",
            self.name,
            self.ttl(),
            self.class,
            self.rtype
        )?;
        for (i, record) in self.records.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{}", record.data)?;
        }
        f.write_str("] }")
    }
}
