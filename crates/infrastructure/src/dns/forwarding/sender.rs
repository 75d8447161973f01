use super::message_codec::MessageCodec;
use crate::dns::transport::{parse_server_addr, TcpTransport, Transport, UdpTransport};
use async_trait::async_trait;
use ferrous_resolv_application::ports::DnsSender;
use ferrous_resolv_domain::{DnsMessage, DomainError, ResolverConfig};
use std::net::SocketAddr;
use std::time::Duration;
use tracing::{debug, warn};

/// Sends queries over UDP, falling back to TCP for truncated answers.
/// Servers are tried in order until one answers. Every query goes out
/// with a fresh random id.
pub struct UdpSender {
    servers: Vec<SocketAddr>,
    timeout: Duration,
}

impl UdpSender {
    pub fn new(servers: Vec<SocketAddr>, timeout: Duration) -> Self {
        Self { servers, timeout }
    }

    pub fn from_config(config: &ResolverConfig) -> Result<Self, DomainError> {
        Ok(Self::new(parse_servers(config)?, config.query_timeout()))
    }

    pub fn servers(&self) -> &[SocketAddr] {
        &self.servers
    }
}

#[async_trait]
impl DnsSender for UdpSender {
    async fn send(&self, query: &DnsMessage) -> Result<DnsMessage, DomainError> {
        query_servers(&self.servers, query, self.timeout, false).await
    }
}

/// Sends every query over TCP.
pub struct TcpSender {
    servers: Vec<SocketAddr>,
    timeout: Duration,
}

impl TcpSender {
    pub fn new(servers: Vec<SocketAddr>, timeout: Duration) -> Self {
        Self { servers, timeout }
    }

    pub fn from_config(config: &ResolverConfig) -> Result<Self, DomainError> {
        Ok(Self::new(parse_servers(config)?, config.query_timeout()))
    }
}

#[async_trait]
impl DnsSender for TcpSender {
    async fn send(&self, query: &DnsMessage) -> Result<DnsMessage, DomainError> {
        query_servers(&self.servers, query, self.timeout, true).await
    }
}

fn parse_servers(config: &ResolverConfig) -> Result<Vec<SocketAddr>, DomainError> {
    config
        .servers
        .iter()
        .map(|server| parse_server_addr(server))
        .collect()
}

async fn query_servers(
    servers: &[SocketAddr],
    query: &DnsMessage,
    timeout: Duration,
    tcp_only: bool,
) -> Result<DnsMessage, DomainError> {
    if servers.is_empty() {
        return Err(DomainError::ConfigError("No nameservers configured".into()));
    }

    let mut query = query.clone();
    query.id = fastrand::u16(..);
    let bytes = MessageCodec::encode_query(&query)?;
    let mut last_error = DomainError::QueryTimeout;

    for server in servers {
        let result = if tcp_only {
            exchange(&Transport::Tcp(TcpTransport::new(*server)), query.id, &bytes, timeout).await
        } else {
            exchange_udp(*server, query.id, &bytes, timeout).await
        };

        match result {
            Ok(response) => return Ok(response),
            Err(e) => {
                warn!(server = %server, error = %e, "Nameserver query failed");
                last_error = e;
            }
        }
    }

    Err(last_error)
}

async fn exchange_udp(
    server: SocketAddr,
    id: u16,
    bytes: &[u8],
    timeout: Duration,
) -> Result<DnsMessage, DomainError> {
    let response = exchange(&Transport::Udp(UdpTransport::new(server)), id, bytes, timeout).await?;
    if !response.truncated {
        return Ok(response);
    }

    debug!(server = %server, "Truncated UDP response, retrying over TCP");
    exchange(&Transport::Tcp(TcpTransport::new(server)), id, bytes, timeout).await
}

async fn exchange(
    transport: &Transport,
    id: u16,
    bytes: &[u8],
    timeout: Duration,
) -> Result<DnsMessage, DomainError> {
    let response = transport.send(bytes, timeout).await?;
    let message = MessageCodec::decode(&response.bytes)?;

    if !message.response || message.id != id {
        return Err(DomainError::InvalidDnsResponse(format!(
            "Unexpected message from {} over {} (id {}, expected {})",
            transport.server_addr(),
            response.protocol_used,
            message.id,
            id
        )));
    }

    Ok(message)
}
