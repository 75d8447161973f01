use super::context::{LookupOptions, ResolverContext};
use super::lookup::Lookup;
use ferrous_resolv_domain::{parse_name, DnsClass, DomainError, RecordType, Resolution};
use std::sync::Arc;
use std::time::Instant;
use tracing::debug;

pub struct ResolveNameUseCase {
    context: Arc<ResolverContext>,
}

impl ResolveNameUseCase {
    pub fn new(context: Arc<ResolverContext>) -> Self {
        Self { context }
    }

    pub fn context(&self) -> &Arc<ResolverContext> {
        &self.context
    }

    /// Resolves `name` for one type and class. Input errors (malformed or
    /// oversized names, meta types other than ANY) are returned as errors;
    /// every other outcome is a [`Resolution`].
    pub async fn execute(
        &self,
        name: &str,
        record_type: RecordType,
        class: DnsClass,
        options: Option<&LookupOptions>,
    ) -> Result<Resolution, DomainError> {
        let start = Instant::now();

        if record_type.is_meta() && record_type != RecordType::ANY {
            return Err(DomainError::MetaTypeNotCacheable(record_type.to_string()));
        }
        let name = parse_name(name)?;

        let mut lookup = Lookup::new(&self.context, name.clone(), record_type, class);
        if let Some(options) = options {
            lookup = lookup.with_options(options.clone());
        }
        let resolution = lookup.run().await;

        debug!(
            name = %name,
            record_type = %record_type,
            status = %resolution.status,
            elapsed_us = start.elapsed().as_micros() as u64,
            "Resolution complete"
        );

        Ok(resolution)
    }

    /// Class IN with the context's default options.
    pub async fn resolve(
        &self,
        name: &str,
        record_type: RecordType,
    ) -> Result<Resolution, DomainError> {
        self.execute(name, record_type, DnsClass::IN, None).await
    }
}
