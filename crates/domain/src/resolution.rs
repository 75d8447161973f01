use crate::dns_record::{RRset, Record};
use crate::name::Name;
use std::fmt;
use std::sync::Arc;

/// Final status of a resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResolutionStatus {
    Successful,
    Unrecoverable,
    TryAgain,
    HostNotFound,
    TypeNotFound,
}

impl ResolutionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResolutionStatus::Successful => "successful",
            ResolutionStatus::Unrecoverable => "unrecoverable error",
            ResolutionStatus::TryAgain => "try again",
            ResolutionStatus::HostNotFound => "host not found",
            ResolutionStatus::TypeNotFound => "type not found",
        }
    }
}

impl fmt::Display for ResolutionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    pub status: ResolutionStatus,
    /// Human readable detail; the status string unless something more
    /// specific is known (a loop, an rcode, a timeout).
    pub reason: String,
    pub answers: Vec<Arc<RRset>>,
    /// Alias names traversed on the way to the answer, in order.
    pub aliases: Vec<Name>,
}

impl Resolution {
    pub fn new(status: ResolutionStatus) -> Self {
        Self {
            status,
            reason: status.as_str().to_string(),
            answers: Vec::new(),
            aliases: Vec::new(),
        }
    }

    pub fn with_reason(mut self, reason: impl Into<String>) -> Self {
        self.reason = reason.into();
        self
    }

    pub fn is_successful(&self) -> bool {
        self.status == ResolutionStatus::Successful
    }

    /// Answer records flattened across sets.
    pub fn records(&self) -> impl Iterator<Item = &Record> {
        self.answers.iter().flat_map(|set| set.records().iter())
    }
}
