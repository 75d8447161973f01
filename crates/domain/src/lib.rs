//! Ferrous Resolv Domain Layer
pub mod config;
pub mod dns_message;
pub mod dns_record;
pub mod errors;
pub mod lookup_outcome;
pub mod name;
pub mod resolution;

pub use config::{CacheConfig, Config, ConfigError, LoggingConfig, ResolverConfig};
pub use dns_message::{DnsMessage, Question, ResponseCode, Section};
pub use dns_record::{Credibility, DnsClass, RRset, Record, RecordData, RecordType};
pub use errors::DomainError;
pub use lookup_outcome::{LookupOutcome, OutcomeKind};
pub use name::{parse_name, Name, NameExt, MAX_NAME_LENGTH};
pub use resolution::{Resolution, ResolutionStatus};
