use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Invalid domain name: {0}")]
    InvalidDomainName(String),

    #[error("Name too long: {0}")]
    NameTooLong(String),

    #[error("Meta type {0} cannot be cached")]
    MetaTypeNotCacheable(String),

    #[error("Invalid DNS response: {0}")]
    InvalidDnsResponse(String),

    #[error("I/O error: {0}")]
    IoError(String),

    #[error("Query timeout")]
    QueryTimeout,

    #[error("Transport timeout connecting to {server}")]
    TransportTimeout { server: String },

    #[error("Transport connection refused by {server}")]
    TransportConnectionRefused { server: String },

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl DomainError {
    /// Failures where the sender gave up waiting on the server.
    pub fn is_timeout(&self) -> bool {
        matches!(
            self,
            DomainError::QueryTimeout | DomainError::TransportTimeout { .. }
        )
    }

    /// Failures of the transport itself, as opposed to bad input or a bad answer.
    pub fn is_network(&self) -> bool {
        self.is_timeout()
            || matches!(
                self,
                DomainError::IoError(_) | DomainError::TransportConnectionRefused { .. }
            )
    }
}
