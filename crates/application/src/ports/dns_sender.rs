use async_trait::async_trait;
use ferrous_resolv_domain::{DnsMessage, DomainError};

/// Sends one query and returns the server's answer.
///
/// Timeouts surface as `DomainError::QueryTimeout` or
/// `DomainError::TransportTimeout`; other transport failures as
/// `DomainError::IoError` or `DomainError::TransportConnectionRefused`.
#[async_trait]
pub trait DnsSender: Send + Sync {
    async fn send(&self, query: &DnsMessage) -> Result<DnsMessage, DomainError>;
}
