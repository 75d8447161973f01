use ferrous_resolv_domain::{LookupOutcome, OutcomeKind, RRset};
use std::sync::Arc;

mod helpers;
use helpers::*;

#[test]
fn test_predicates_are_total() {
    let outcomes = vec![
        LookupOutcome::Unknown,
        LookupOutcome::NxDomain,
        LookupOutcome::NxRrset,
        LookupOutcome::Delegation(Arc::new(RRset::new(ns("example.", 300, "ns1.example.")))),
        LookupOutcome::Cname(Arc::new(RRset::new(cname("www.example.", 300, "web.example.")))),
        LookupOutcome::successful(RRset::new(a("web.example.", 300, [192, 0, 2, 1]))),
    ];

    for outcome in &outcomes {
        let flags = [
            outcome.is_unknown(),
            outcome.is_nxdomain(),
            outcome.is_nxrrset(),
            outcome.is_delegation(),
            outcome.is_cname(),
            outcome.is_dname(),
            outcome.is_successful(),
        ];
        assert_eq!(flags.iter().filter(|f| **f).count(), 1, "{}", outcome);
    }
}

#[test]
fn test_payload_accessors() {
    let set = RRset::new(cname("www.example.", 300, "web.example."));
    let outcome = LookupOutcome::Cname(Arc::new(set.clone()));
    assert_eq!(**outcome.cname(), set);
    assert_eq!(outcome.kind(), OutcomeKind::Cname);

    let answer = LookupOutcome::successful(RRset::new(a("web.example.", 300, [192, 0, 2, 1])));
    assert_eq!(answer.answers().len(), 1);
}

#[test]
#[should_panic]
fn test_wrong_variant_accessor_panics() {
    LookupOutcome::NxDomain.answers();
}

#[test]
#[should_panic]
fn test_ns_on_cname_panics() {
    let outcome =
        LookupOutcome::Cname(Arc::new(RRset::new(cname("www.example.", 300, "web.example."))));
    outcome.ns();
}

#[test]
fn test_unit_variants_are_shared() {
    assert_eq!(LookupOutcome::Unknown, LookupOutcome::Unknown);
    assert_eq!(LookupOutcome::NxDomain.to_string(), "NXDOMAIN");
}
