mod helpers;

use ferrous_resolv_application::use_cases::{LookupOptions, ResolveNameUseCase};
use ferrous_resolv_domain::{DnsClass, DomainError, LookupOutcome, RecordType, ResolutionStatus};
use helpers::*;
use std::sync::Arc;

fn make_use_case(cache: Arc<MockResolverCache>, sender: Arc<MockDnsSender>) -> ResolveNameUseCase {
    ResolveNameUseCase::new(Arc::new(make_context(
        cache,
        sender,
        LookupOptions::default(),
    )))
}

#[tokio::test]
async fn test_execute_returns_resolution() {
    let cache = Arc::new(MockResolverCache::new());
    let sender = Arc::new(MockDnsSender::new());
    cache.set_outcome(
        "host.example.",
        RecordType::A,
        LookupOutcome::Successful(vec![a_set("host.example.", [192, 0, 2, 1])]),
    );

    let use_case = make_use_case(cache, sender);
    let resolution = use_case.resolve("host.example.", RecordType::A).await.unwrap();

    assert_eq!(resolution.status, ResolutionStatus::Successful);
    assert_eq!(resolution.records().count(), 1);
}

#[tokio::test]
async fn test_execute_rejects_transfer_types() {
    let use_case = make_use_case(
        Arc::new(MockResolverCache::new()),
        Arc::new(MockDnsSender::new()),
    );

    let result = use_case
        .execute("example.", RecordType::AXFR, DnsClass::IN, None)
        .await;
    assert!(matches!(result, Err(DomainError::MetaTypeNotCacheable(_))));
}

#[tokio::test]
async fn test_execute_rejects_oversized_name() {
    let use_case = make_use_case(
        Arc::new(MockResolverCache::new()),
        Arc::new(MockDnsSender::new()),
    );
    let label = "a".repeat(63);
    let long = format!("{0}.{0}.{0}.{0}.{0}.", label);

    let result = use_case.resolve(&long, RecordType::A).await;
    assert!(result.is_err());
}

#[tokio::test]
async fn test_execute_with_options_override() {
    let cache = Arc::new(MockResolverCache::new());
    let sender = Arc::new(MockDnsSender::new());
    let use_case = make_use_case(cache, sender.clone());

    let options = LookupOptions::default().with_search_path(vec![name("lan.")]);
    let resolution = use_case
        .execute("printer", RecordType::A, DnsClass::IN, Some(&options))
        .await
        .unwrap();

    assert_eq!(resolution.status, ResolutionStatus::HostNotFound);
    assert_eq!(sender.queried_names(), vec!["printer.lan.", "printer."]);
}
