use super::key::EntryKey;
use super::storage::{fqdn, RecordCache};
use ferrous_resolv_application::ports::IngestedResponse;
use ferrous_resolv_application::use_cases::MAX_ITERATIONS;
use ferrous_resolv_domain::{
    Credibility, DnsMessage, DomainError, LookupOutcome, Name, NameExt, RRset, RecordType,
    ResponseCode, Section,
};
use std::collections::HashSet;
use std::sync::Arc;
use tracing::debug;

fn is_alias_for(rrset: &RRset, current: &Name) -> bool {
    match rrset.record_type() {
        RecordType::CNAME => rrset.name() == current,
        RecordType::DNAME => rrset.name() != current && current.is_subdomain_of(rrset.name()),
        _ => false,
    }
}

fn alias_destination(rrset: &RRset, current: &Name) -> Result<Name, DomainError> {
    let target = rrset
        .first()
        .and_then(|record| record.data.alias_target())
        .ok_or_else(|| DomainError::InvalidDnsResponse(format!("empty alias set {}", rrset)))?;
    let next = match rrset.record_type() {
        RecordType::DNAME => current.substitute_suffix(rrset.name(), target)?,
        _ => target.clone(),
    };
    Ok(fqdn(&next))
}

fn mark_additional(rrset: &RRset, names: &mut HashSet<Name>) {
    for record in rrset.records() {
        if let Some(name) = record.data.additional_name() {
            names.insert(fqdn(name));
        }
    }
}

impl RecordCache {
    /// Caches a response and reports what it says about its question.
    pub fn ingest(&self, message: &DnsMessage) -> Option<LookupOutcome> {
        self.ingest_response(message).map(|ingested| ingested.outcome)
    }

    /// Caches a response and reports what it says about its question, plus
    /// the alias names crossed to reach the answer.
    ///
    /// Returns `None` unless the rcode is NOERROR or NXDOMAIN and the
    /// message carries a question. The whole message is ingested under one
    /// lock.
    pub fn ingest_response(&self, message: &DnsMessage) -> Option<IngestedResponse> {
        let question = message.question.as_ref()?;
        if !message.rcode.is_cacheable() {
            debug!(rcode = %message.rcode, "Response not cacheable");
            return None;
        }

        let qtype = question.qtype;
        let qclass = question.qclass;
        let aa = message.authoritative;
        let answer_credibility = Credibility::for_section(Section::Answer, aa);
        let authority_credibility = Credibility::for_section(Section::Authority, aa);
        let additional_credibility = Credibility::for_section(Section::Additional, aa);

        let in_class = |rrset: &RRset| rrset.class() == qclass;
        let answers: Vec<Arc<RRset>> = message
            .section_rrsets(Section::Answer)
            .into_iter()
            .filter(in_class)
            .map(Arc::new)
            .collect();
        let authority: Vec<Arc<RRset>> = message
            .section_rrsets(Section::Authority)
            .into_iter()
            .filter(in_class)
            .map(Arc::new)
            .collect();

        let now = self.clock.now_secs();
        let mut state = self.state();

        let mut current = fqdn(&question.name);
        let mut aliases = Vec::new();
        let mut alias_outcome = None;
        let mut final_sets: Vec<Arc<RRset>> = Vec::new();
        let mut used = vec![false; answers.len()];
        let mut additional_names = HashSet::new();

        for _ in 0..=MAX_ITERATIONS {
            let matching: Vec<Arc<RRset>> = answers
                .iter()
                .filter(|rrset| {
                    rrset.name() == &current
                        && (qtype == RecordType::ANY || rrset.record_type() == qtype)
                })
                .cloned()
                .collect();
            if !matching.is_empty() {
                for rrset in &matching {
                    self.store_rrset(&mut state, Arc::clone(rrset), answer_credibility, now);
                    mark_additional(rrset, &mut additional_names);
                }
                final_sets = matching;
                break;
            }

            let Some((index, alias)) = answers
                .iter()
                .enumerate()
                .find(|(i, rrset)| !used[*i] && is_alias_for(rrset, &current))
            else {
                break;
            };
            used[index] = true;
            self.store_rrset(&mut state, Arc::clone(alias), answer_credibility, now);

            if alias_outcome.is_none() {
                alias_outcome = Some(match alias.record_type() {
                    RecordType::DNAME => LookupOutcome::Dname(Arc::clone(alias)),
                    _ => LookupOutcome::Cname(Arc::clone(alias)),
                });
            }

            match alias_destination(alias, &current) {
                Ok(next) => {
                    aliases.push(current);
                    current = next;
                }
                Err(e) => {
                    debug!(name = %current, error = %e, "Alias chase stopped");
                    break;
                }
            }
        }

        let completed = !final_sets.is_empty();
        let soa = authority.iter().find(|rrset| {
            rrset.record_type() == RecordType::SOA && current.is_subdomain_of(rrset.name())
        });
        let ns = authority.iter().find(|rrset| {
            rrset.record_type() == RecordType::NS && current.is_subdomain_of(rrset.name())
        });

        let outcome = if completed {
            if let (ResponseCode::NoError, Some(ns)) = (message.rcode, ns) {
                self.store_rrset(&mut state, Arc::clone(ns), authority_credibility, now);
                mark_additional(ns, &mut additional_names);
            }
            LookupOutcome::Successful(final_sets)
        } else {
            let nxdomain = message.rcode == ResponseCode::NXDomain;
            match ns {
                Some(ns) if !nxdomain && soa.is_none() => {
                    self.store_rrset(&mut state, Arc::clone(ns), authority_credibility, now);
                    mark_additional(ns, &mut additional_names);
                    alias_outcome.unwrap_or_else(|| LookupOutcome::Delegation(Arc::clone(ns)))
                }
                _ => {
                    let key = if nxdomain {
                        EntryKey::Name
                    } else {
                        EntryKey::Type(qtype)
                    };
                    if key != EntryKey::Type(RecordType::ANY) {
                        let soa_record = soa.and_then(|rrset| rrset.first());
                        self.store_negative(
                            &mut state,
                            &current,
                            key,
                            soa_record,
                            authority_credibility,
                            now,
                        );
                    }
                    alias_outcome.unwrap_or(if nxdomain {
                        LookupOutcome::NxDomain
                    } else {
                        LookupOutcome::NxRrset
                    })
                }
            }
        };

        for rrset in message.section_rrsets(Section::Additional) {
            let is_address = matches!(rrset.record_type(), RecordType::A | RecordType::AAAA);
            if is_address && rrset.class() == qclass && additional_names.contains(rrset.name()) {
                self.store_rrset(&mut state, Arc::new(rrset), additional_credibility, now);
            }
        }

        debug!(
            question = %question,
            rcode = %message.rcode,
            outcome = %outcome.kind(),
            aliases = aliases.len(),
            "Response ingested"
        );

        Some(IngestedResponse {
            outcome,
            aliases: if completed { aliases } else { Vec::new() },
        })
    }
}
