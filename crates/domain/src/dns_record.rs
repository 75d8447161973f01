pub mod class;
pub mod credibility;
pub mod record;
pub mod record_type;
pub mod rrset;

pub use class::DnsClass;
pub use credibility::Credibility;
pub use record::{Record, RecordData};
pub use record_type::RecordType;
pub use rrset::RRset;
