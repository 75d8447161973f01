//! Domain name helpers on top of `hickory_proto::rr::Name`.
//!
//! `Name` compares and hashes case-insensitively, which is what the cache
//! relies on for its keys.

use crate::errors::DomainError;
pub use hickory_proto::rr::Name;
use std::str::FromStr;

/// Maximum length of a name in wire format, root label included.
pub const MAX_NAME_LENGTH: usize = 255;

pub fn parse_name(s: &str) -> Result<Name, DomainError> {
    let name = Name::from_str(s)
        .map_err(|e| DomainError::InvalidDomainName(format!("'{}': {}", s, e)))?;
    if wire_length(name.iter()) > MAX_NAME_LENGTH {
        return Err(DomainError::NameTooLong(s.to_string()));
    }
    Ok(name)
}

fn wire_length<'a>(labels: impl Iterator<Item = &'a [u8]>) -> usize {
    labels.map(|label| label.len() + 1).sum::<usize>() + 1
}

fn build<'a>(
    labels: impl Iterator<Item = &'a [u8]>,
    fqdn: bool,
) -> Result<Name, DomainError> {
    let labels: Vec<&'a [u8]> = labels.collect();
    let length = wire_length(labels.iter().copied());
    if length > MAX_NAME_LENGTH {
        return Err(DomainError::NameTooLong(format!(
            "{} octets exceeds {}",
            length, MAX_NAME_LENGTH
        )));
    }
    let mut name = Name::from_labels(labels)
        .map_err(|e| DomainError::InvalidDomainName(e.to_string()))?;
    name.set_fqdn(fqdn);
    Ok(name)
}

pub trait NameExt {
    /// `self` followed by the labels of `suffix`. An absolute `self` is
    /// returned unchanged.
    fn concatenate(&self, suffix: &Name) -> Result<Name, DomainError>;

    /// The rightmost `labels` labels; zero yields the root.
    fn suffix(&self, labels: usize) -> Name;

    /// True when `self` equals `other` or lies below it.
    fn is_subdomain_of(&self, other: &Name) -> bool;

    /// Rewrites `self` from below `owner` to below `target` (DNAME substitution).
    fn substitute_suffix(&self, owner: &Name, target: &Name) -> Result<Name, DomainError>;
}

impl NameExt for Name {
    fn concatenate(&self, suffix: &Name) -> Result<Name, DomainError> {
        if self.is_fqdn() {
            return Ok(self.clone());
        }
        build(self.iter().chain(suffix.iter()), suffix.is_fqdn())
    }

    fn suffix(&self, labels: usize) -> Name {
        if labels == 0 {
            return Name::root();
        }
        self.trim_to(labels)
    }

    fn is_subdomain_of(&self, other: &Name) -> bool {
        let ours = self.num_labels() as usize;
        let theirs = other.num_labels() as usize;
        if theirs > ours {
            return false;
        }
        self.iter()
            .skip(ours - theirs)
            .zip(other.iter())
            .all(|(a, b)| a.eq_ignore_ascii_case(b))
    }

    fn substitute_suffix(&self, owner: &Name, target: &Name) -> Result<Name, DomainError> {
        if !self.is_subdomain_of(owner) {
            return Err(DomainError::InvalidDomainName(format!(
                "{} is not below {}",
                self, owner
            )));
        }
        let keep = self.num_labels() as usize - owner.num_labels() as usize;
        build(self.iter().take(keep).chain(target.iter()), target.is_fqdn())
    }
}
