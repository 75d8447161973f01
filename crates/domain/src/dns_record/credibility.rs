use crate::dns_message::Section;
use serde::{Deserialize, Serialize};
use std::fmt;

/// How much a cached entry is trusted, in ascending order.
///
/// A lookup carries a minimum credibility; entries below it behave as if
/// absent. Insertion never lets a less credible entry displace a more
/// credible one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Credibility {
    /// Root hints and other bootstrap data.
    Hint,
    /// The additional section of a response.
    Additional,
    /// Glue from a referral.
    Glue,
    /// Answer or authority data from a non-authoritative response.
    NonAuthAnswer,
    /// Answer or authority data from an authoritative response.
    AuthAnswer,
    /// Data loaded from a zone.
    Zone,
}

impl Credibility {
    pub const NON_AUTH_AUTHORITY: Credibility = Credibility::NonAuthAnswer;
    pub const AUTH_AUTHORITY: Credibility = Credibility::AuthAnswer;
    /// Default minimum for lookups.
    pub const NORMAL: Credibility = Credibility::NonAuthAnswer;
    /// Accepts every cached entry except hints.
    pub const ANY: Credibility = Credibility::Additional;

    /// Credibility of data found in `section` of a response with the given AA flag.
    pub fn for_section(section: Section, authoritative: bool) -> Credibility {
        match section {
            Section::Answer | Section::Authority if authoritative => Credibility::AuthAnswer,
            Section::Answer | Section::Authority => Credibility::NonAuthAnswer,
            Section::Additional | Section::Question => Credibility::Additional,
        }
    }
}

impl fmt::Display for Credibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Credibility::Hint => "hint",
            Credibility::Additional => "additional",
            Credibility::Glue => "glue",
            Credibility::NonAuthAnswer => "non_auth_answer",
            Credibility::AuthAnswer => "auth_answer",
            Credibility::Zone => "zone",
        };
        f.write_str(s)
    }
}
