//! The resolution driver.
//!
//! A `Lookup` consults the cache, follows CNAME and DNAME chains, asks the
//! network when the cache has nothing usable, feeds the answer back into the
//! cache and classifies it again. Relative names are tried against the
//! search path.

use super::context::{LookupOptions, ResolverContext};
use crate::ports::{DnsSender, IngestedResponse, ResolverCache};
use ferrous_resolv_domain::{
    DnsClass, DnsMessage, LookupOutcome, Name, NameExt, Question, RRset, RecordType, Resolution,
    ResolutionStatus,
};
use std::sync::Arc;
use tracing::{debug, warn};

/// Longest alias chain followed before giving up.
pub const MAX_ITERATIONS: u32 = 6;

enum Step {
    /// Stop working on the current name.
    Done,
    /// Nothing usable cached; ask the network.
    Query,
    /// Continue with an alias target.
    Follow(Name),
}

pub struct Lookup {
    name: Name,
    record_type: RecordType,
    class: DnsClass,
    options: LookupOptions,
    cache: Arc<dyn ResolverCache>,
    sender: Arc<dyn DnsSender>,

    iterations: u32,
    found_alias: bool,
    done: bool,
    nxdomain: bool,
    bad_response: bool,
    bad_response_reason: Option<String>,
    network_error: bool,
    timed_out: bool,
    referral: bool,
    name_too_long: bool,

    aliases: Vec<Name>,
    answers: Vec<Arc<RRset>>,
    status: Option<ResolutionStatus>,
    reason: Option<String>,
}

impl Lookup {
    pub fn new(
        context: &ResolverContext,
        name: Name,
        record_type: RecordType,
        class: DnsClass,
    ) -> Self {
        Self {
            name,
            record_type,
            class,
            options: context.options.clone(),
            cache: context.caches.cache_for(class),
            sender: Arc::clone(&context.sender),
            iterations: 0,
            found_alias: false,
            done: false,
            nxdomain: false,
            bad_response: false,
            bad_response_reason: None,
            network_error: false,
            timed_out: false,
            referral: false,
            name_too_long: false,
            aliases: Vec::new(),
            answers: Vec::new(),
            status: None,
            reason: None,
        }
    }

    pub fn with_options(mut self, options: LookupOptions) -> Self {
        self.options = options;
        self
    }

    pub async fn run(mut self) -> Resolution {
        let name = self.name.clone();
        let root = Name::root();

        if name.is_fqdn() {
            self.resolve(&name, None).await;
        } else if self.options.search_path.is_empty() {
            self.resolve(&name, Some(&root)).await;
        } else {
            let labels = name.num_labels() as usize;
            if labels > self.options.ndots {
                self.resolve(&name, Some(&root)).await;
            }
            if !self.done {
                let search_path = self.options.search_path.clone();
                for suffix in &search_path {
                    self.resolve(&name, Some(suffix)).await;
                    if self.done || self.found_alias {
                        break;
                    }
                }
            }
            if !self.done && !self.found_alias && labels <= self.options.ndots {
                self.resolve(&name, Some(&root)).await;
            }
        }

        self.finish()
    }

    async fn resolve(&mut self, name: &Name, suffix: Option<&Name>) {
        let mut target = match suffix {
            None => name.clone(),
            Some(suffix) => match name.concatenate(suffix) {
                Ok(target) => target,
                Err(e) => {
                    debug!(name = %name, suffix = %suffix, error = %e, "Search name too long");
                    self.name_too_long = true;
                    return;
                }
            },
        };
        target.set_fqdn(true);
        self.lookup(target).await;
    }

    async fn lookup(&mut self, start: Name) {
        let mut current = start;
        loop {
            let outcome = self
                .cache
                .lookup(&current, self.record_type, self.options.credibility);
            debug!(
                name = %current,
                record_type = %self.record_type,
                outcome = %outcome.kind(),
                "Cache lookup"
            );

            match self.process_response(&current, outcome, &[]) {
                Step::Follow(next) => {
                    current = next;
                    continue;
                }
                Step::Done => return,
                Step::Query => {}
            }

            let Some(ingested) = self.query_network(&current).await else {
                return;
            };
            debug!(
                name = %current,
                record_type = %self.record_type,
                outcome = %ingested.outcome.kind(),
                "Network response classified"
            );

            match self.process_response(&current, ingested.outcome, &ingested.aliases) {
                Step::Follow(next) => current = next,
                Step::Done | Step::Query => return,
            }
        }
    }

    async fn query_network(&mut self, current: &Name) -> Option<IngestedResponse> {
        let question = Question::new(current.clone(), self.record_type, self.class);
        let query = DnsMessage::query(question.clone());

        let response = match self.sender.send(&query).await {
            Ok(response) => response,
            Err(e) if e.is_timeout() => {
                debug!(name = %current, error = %e, "Query timed out");
                self.timed_out = true;
                return None;
            }
            Err(e) if e.is_network() => {
                warn!(name = %current, error = %e, "Query failed");
                self.network_error = true;
                return None;
            }
            Err(e) => {
                warn!(name = %current, error = %e, "Unusable response");
                self.bad_response = true;
                self.bad_response_reason = Some(e.to_string());
                return None;
            }
        };

        if !response.rcode.is_cacheable() {
            debug!(name = %current, rcode = %response.rcode, "Server refused query");
            self.bad_response = true;
            self.bad_response_reason = Some(response.rcode.mnemonic().to_string());
            return None;
        }

        if response.question.as_ref() != Some(&question) {
            warn!(name = %current, "Response question does not match query");
            self.bad_response = true;
            self.bad_response_reason = Some("response does not match query".to_string());
            return None;
        }

        let ingested = self.cache.ingest_response(&response).unwrap_or_else(|| {
            IngestedResponse {
                outcome: self
                    .cache
                    .lookup(current, self.record_type, self.options.credibility),
                aliases: Vec::new(),
            }
        });
        Some(ingested)
    }

    fn process_response(&mut self, current: &Name, outcome: LookupOutcome, chain: &[Name]) -> Step {
        match outcome {
            LookupOutcome::Successful(answers) => {
                if self.record_chain(chain) {
                    self.answers = answers;
                    self.status = Some(ResolutionStatus::Successful);
                    self.done = true;
                }
                Step::Done
            }
            LookupOutcome::NxDomain => {
                self.nxdomain = true;
                if self.iterations > 0 {
                    self.status = Some(ResolutionStatus::HostNotFound);
                    self.done = true;
                }
                Step::Done
            }
            LookupOutcome::NxRrset => {
                self.answers.clear();
                self.status = Some(ResolutionStatus::TypeNotFound);
                self.done = true;
                Step::Done
            }
            LookupOutcome::Cname(rrset) => match alias_target(&rrset) {
                Some(target) => self.follow(target.clone(), current),
                None => Step::Query,
            },
            LookupOutcome::Dname(rrset) => {
                let Some(target) = alias_target(&rrset) else {
                    return Step::Query;
                };
                match current.substitute_suffix(rrset.name(), target) {
                    Ok(next) => self.follow(next, current),
                    Err(e) => {
                        debug!(name = %current, dname = %rrset, error = %e, "DNAME substitution failed");
                        self.fail(ResolutionStatus::Unrecoverable, "Invalid DNAME target");
                        Step::Done
                    }
                }
            }
            LookupOutcome::Delegation(_) => {
                self.referral = true;
                Step::Query
            }
            LookupOutcome::Unknown => Step::Query,
        }
    }

    fn follow(&mut self, target: Name, old: &Name) -> Step {
        self.found_alias = true;
        self.bad_response = false;
        self.bad_response_reason = None;
        self.network_error = false;
        self.timed_out = false;
        self.nxdomain = false;
        self.referral = false;
        self.iterations += 1;

        if self.iterations >= MAX_ITERATIONS || target == *old || self.aliases.contains(&target) {
            warn!(name = %self.name, target = %target, "Alias loop detected");
            self.fail(ResolutionStatus::Unrecoverable, "CNAME loop");
            return Step::Done;
        }

        debug!(from = %old, to = %target, "Following alias");
        self.aliases.push(old.clone());
        Step::Follow(target)
    }

    /// Accounts for aliases the cache already walked while ingesting a
    /// response. Returns false when the chain is too long or loops.
    fn record_chain(&mut self, chain: &[Name]) -> bool {
        for alias in chain {
            self.found_alias = true;
            self.iterations += 1;
            if self.iterations >= MAX_ITERATIONS || self.aliases.contains(alias) {
                warn!(name = %self.name, alias = %alias, "Alias loop detected");
                self.fail(ResolutionStatus::Unrecoverable, "CNAME loop");
                return false;
            }
            self.aliases.push(alias.clone());
        }
        true
    }

    fn fail(&mut self, status: ResolutionStatus, reason: &str) {
        self.answers.clear();
        self.status = Some(status);
        self.reason = Some(reason.to_string());
        self.done = true;
    }

    fn finish(self) -> Resolution {
        let (status, reason) = match self.status {
            Some(status) => (status, self.reason),
            None if self.bad_response => (ResolutionStatus::TryAgain, self.bad_response_reason),
            None if self.timed_out => (ResolutionStatus::TryAgain, Some("timed out".to_string())),
            None if self.network_error => {
                (ResolutionStatus::TryAgain, Some("network error".to_string()))
            }
            None if self.nxdomain => (ResolutionStatus::HostNotFound, None),
            None if self.referral => (ResolutionStatus::Unrecoverable, Some("referral".to_string())),
            None if self.name_too_long => {
                (ResolutionStatus::Unrecoverable, Some("name too long".to_string()))
            }
            None => (ResolutionStatus::Unrecoverable, None),
        };

        debug!(
            name = %self.name,
            record_type = %self.record_type,
            status = %status,
            aliases = self.aliases.len(),
            "Lookup finished"
        );

        Resolution {
            status,
            reason: reason.unwrap_or_else(|| status.as_str().to_string()),
            answers: if status == ResolutionStatus::Successful {
                self.answers
            } else {
                Vec::new()
            },
            aliases: self.aliases,
        }
    }
}

fn alias_target(rrset: &RRset) -> Option<&Name> {
    rrset.first().and_then(|record| record.data.alias_target())
}
