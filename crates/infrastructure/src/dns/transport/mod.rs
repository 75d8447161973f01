pub mod tcp;
pub mod udp;

use async_trait::async_trait;
use ferrous_resolv_domain::DomainError;
use std::net::{IpAddr, SocketAddr};
use std::time::Duration;

pub use tcp::TcpTransport;
pub use udp::UdpTransport;

pub const DEFAULT_DNS_PORT: u16 = 53;

#[derive(Debug)]
pub struct TransportResponse {
    pub bytes: Vec<u8>,
    pub protocol_used: &'static str,
}

/// Moves one DNS message in wire format to a server and back.
#[async_trait]
pub trait DnsTransport: Send + Sync {
    async fn send(
        &self,
        message_bytes: &[u8],
        timeout: Duration,
    ) -> Result<TransportResponse, DomainError>;

    fn protocol_name(&self) -> &'static str;
}

pub enum Transport {
    Udp(UdpTransport),
    Tcp(TcpTransport),
}

impl Transport {
    pub async fn send(
        &self,
        message_bytes: &[u8],
        timeout: Duration,
    ) -> Result<TransportResponse, DomainError> {
        match self {
            Self::Udp(t) => DnsTransport::send(t, message_bytes, timeout).await,
            Self::Tcp(t) => DnsTransport::send(t, message_bytes, timeout).await,
        }
    }

    pub fn protocol_name(&self) -> &'static str {
        match self {
            Self::Udp(_) => "UDP",
            Self::Tcp(_) => "TCP",
        }
    }

    pub fn server_addr(&self) -> SocketAddr {
        match self {
            Self::Udp(t) => t.server_addr(),
            Self::Tcp(t) => t.server_addr(),
        }
    }
}

/// Parses `ip:port`, `[v6]:port` or a bare address (port 53).
pub fn parse_server_addr(server: &str) -> Result<SocketAddr, DomainError> {
    if let Ok(addr) = server.parse::<SocketAddr>() {
        return Ok(addr);
    }
    server
        .parse::<IpAddr>()
        .map(|ip| SocketAddr::new(ip, DEFAULT_DNS_PORT))
        .map_err(|_| DomainError::ConfigError(format!("Invalid server address: {}", server)))
}
