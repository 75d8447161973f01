//! Classification of a cache lookup or of an ingested response.

use crate::dns_record::RRset;
use std::fmt;
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LookupOutcome {
    /// Nothing usable is cached.
    Unknown,
    /// The name is known not to exist.
    NxDomain,
    /// The name exists but has no data of the requested type.
    NxRrset,
    /// The closest cached ancestor is a zone cut; carries its NS set.
    Delegation(Arc<RRset>),
    /// The name is an alias; carries the CNAME set.
    Cname(Arc<RRset>),
    /// An ancestor redirects its whole subtree; carries the DNAME set.
    Dname(Arc<RRset>),
    /// Answer sets; several only for ANY lookups.
    Successful(Vec<Arc<RRset>>),
}

/// Payload-free tag of a [`LookupOutcome`], used in logs and metrics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OutcomeKind {
    Unknown,
    NxDomain,
    NxRrset,
    Delegation,
    Cname,
    Dname,
    Successful,
}

impl LookupOutcome {
    pub fn successful(rrset: RRset) -> Self {
        LookupOutcome::Successful(vec![Arc::new(rrset)])
    }

    pub fn kind(&self) -> OutcomeKind {
        match self {
            LookupOutcome::Unknown => OutcomeKind::Unknown,
            LookupOutcome::NxDomain => OutcomeKind::NxDomain,
            LookupOutcome::NxRrset => OutcomeKind::NxRrset,
            LookupOutcome::Delegation(_) => OutcomeKind::Delegation,
            LookupOutcome::Cname(_) => OutcomeKind::Cname,
            LookupOutcome::Dname(_) => OutcomeKind::Dname,
            LookupOutcome::Successful(_) => OutcomeKind::Successful,
        }
    }

    pub fn is_unknown(&self) -> bool {
        matches!(self, LookupOutcome::Unknown)
    }

    pub fn is_nxdomain(&self) -> bool {
        matches!(self, LookupOutcome::NxDomain)
    }

    pub fn is_nxrrset(&self) -> bool {
        matches!(self, LookupOutcome::NxRrset)
    }

    pub fn is_delegation(&self) -> bool {
        matches!(self, LookupOutcome::Delegation(_))
    }

    pub fn is_cname(&self) -> bool {
        matches!(self, LookupOutcome::Cname(_))
    }

    pub fn is_dname(&self) -> bool {
        matches!(self, LookupOutcome::Dname(_))
    }

    pub fn is_successful(&self) -> bool {
        matches!(self, LookupOutcome::Successful(_))
    }

    /// # Panics
    ///
    /// Panics unless the outcome is `Successful`.
    pub fn answers(&self) -> &[Arc<RRset>] {
        match self {
            LookupOutcome::Successful(sets) => sets,
            other => panic!("answers() called on {} outcome", other.kind()),
        }
    }

    /// # Panics
    ///
    /// Panics unless the outcome is `Cname`.
    pub fn cname(&self) -> &Arc<RRset> {
        match self {
            LookupOutcome::Cname(set) => set,
            other => panic!("cname() called on {} outcome", other.kind()),
        }
    }

    /// # Panics
    ///
    /// Panics unless the outcome is `Dname`.
    pub fn dname(&self) -> &Arc<RRset> {
        match self {
            LookupOutcome::Dname(set) => set,
            other => panic!("dname() called on {} outcome", other.kind()),
        }
    }

    /// # Panics
    ///
    /// Panics unless the outcome is `Delegation`.
    pub fn ns(&self) -> &Arc<RRset> {
        match self {
            LookupOutcome::Delegation(set) => set,
            other => panic!("ns() called on {} outcome", other.kind()),
        }
    }
}

impl fmt::Display for OutcomeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            OutcomeKind::Unknown => "unknown",
            OutcomeKind::NxDomain => "NXDOMAIN",
            OutcomeKind::NxRrset => "NXRRSET",
            OutcomeKind::Delegation => "delegation",
            OutcomeKind::Cname => "CNAME",
            OutcomeKind::Dname => "DNAME",
            OutcomeKind::Successful => "successful",
        };
        f.write_str(s)
    }
}

impl fmt::Display for LookupOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LookupOutcome::Delegation(set)
            | LookupOutcome::Cname(set)
            | LookupOutcome::Dname(set) => write!(f, "{}: {}", self.kind(), set),
            LookupOutcome::Successful(sets) => {
                write!(f, "successful:")?;
                for set in sets {
                    write!(f, " {}", set)?;
                }
                Ok(())
            }
            other => write!(f, "{}", other.kind()),
        }
    }
}
