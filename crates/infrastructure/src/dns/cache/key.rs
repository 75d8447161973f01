use ferrous_resolv_domain::RecordType;
use std::fmt;

/// Slot of an entry within one owner name.
///
/// `Name` holds the negative entry saying the name itself does not exist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntryKey {
    Name,
    Type(RecordType),
}

impl From<RecordType> for EntryKey {
    fn from(record_type: RecordType) -> Self {
        EntryKey::Type(record_type)
    }
}

impl fmt::Display for EntryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntryKey::Name => f.write_str("NXDOMAIN"),
            EntryKey::Type(record_type) => write!(f, "{}", record_type),
        }
    }
}
