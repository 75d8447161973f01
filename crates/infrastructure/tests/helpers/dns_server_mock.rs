#![allow(dead_code)]
use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, UdpSocket};
use tokio::sync::oneshot;

/// Answer the mock puts on the wire for a query.
#[derive(Debug, Clone, Copy)]
pub enum MockReply {
    /// One A record for the question name.
    Address([u8; 4]),
    /// Empty answer with the TC bit set.
    Truncated,
    /// Empty answer with the given rcode.
    Rcode(u8),
    /// Response carrying a different id.
    WrongId,
    Silent,
}

/// Loopback DNS server speaking raw wire format over UDP and TCP on the
/// same port.
pub struct MockDnsServer {
    addr: SocketAddr,
    udp_queries: Arc<AtomicUsize>,
    tcp_queries: Arc<AtomicUsize>,
    shutdown_tx: Option<oneshot::Sender<()>>,
}

impl MockDnsServer {
    pub async fn start(udp: MockReply, tcp: MockReply) -> Result<Self, std::io::Error> {
        let socket = UdpSocket::bind(SocketAddr::from(([127, 0, 0, 1], 0))).await?;
        let addr = socket.local_addr()?;
        let listener = TcpListener::bind(addr).await?;

        let udp_queries = Arc::new(AtomicUsize::new(0));
        let tcp_queries = Arc::new(AtomicUsize::new(0));
        let (shutdown_tx, mut shutdown_rx) = oneshot::channel();

        let udp_count = Arc::clone(&udp_queries);
        let tcp_count = Arc::clone(&tcp_queries);
        tokio::spawn(async move {
            let mut buf = vec![0u8; 512];

            loop {
                tokio::select! {
                    _ = &mut shutdown_rx => {
                        break;
                    }
                    result = socket.recv_from(&mut buf) => {
                        if let Ok((len, peer)) = result {
                            udp_count.fetch_add(1, Ordering::SeqCst);
                            if let Some(response) = build_response(&buf[..len], udp) {
                                let _ = socket.send_to(&response, peer).await;
                            }
                        }
                    }
                    accepted = listener.accept() => {
                        if let Ok((stream, _)) = accepted {
                            tcp_count.fetch_add(1, Ordering::SeqCst);
                            tokio::spawn(serve_tcp(stream, tcp));
                        }
                    }
                }
            }
        });

        Ok(Self {
            addr,
            udp_queries,
            tcp_queries,
            shutdown_tx: Some(shutdown_tx),
        })
    }

    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    pub fn udp_queries(&self) -> usize {
        self.udp_queries.load(Ordering::SeqCst)
    }

    pub fn tcp_queries(&self) -> usize {
        self.tcp_queries.load(Ordering::SeqCst)
    }

    pub fn shutdown(mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

impl Drop for MockDnsServer {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

async fn serve_tcp(mut stream: tokio::net::TcpStream, reply: MockReply) {
    let mut len_buf = [0u8; 2];
    if stream.read_exact(&mut len_buf).await.is_err() {
        return;
    }
    let mut query = vec![0u8; u16::from_be_bytes(len_buf) as usize];
    if stream.read_exact(&mut query).await.is_err() {
        return;
    }
    if let Some(response) = build_response(&query, reply) {
        let _ = stream
            .write_all(&(response.len() as u16).to_be_bytes())
            .await;
        let _ = stream.write_all(&response).await;
        let _ = stream.flush().await;
    }
}

/// Echoes the query header and question; the question is assumed to be the
/// only thing after the header.
pub fn build_response(query: &[u8], reply: MockReply) -> Option<Vec<u8>> {
    if query.len() < 12 {
        return None;
    }

    let mut response = Vec::with_capacity(512);
    match reply {
        MockReply::Silent => return None,
        MockReply::WrongId => {
            let id = u16::from_be_bytes([query[0], query[1]]).wrapping_add(1);
            response.extend_from_slice(&id.to_be_bytes());
        }
        _ => response.extend_from_slice(&query[0..2]),
    }

    let (flags, rcode, answers) = match reply {
        MockReply::Address(_) => (0x81, 0x00, 1u16),
        MockReply::Truncated => (0x83, 0x00, 0),
        MockReply::Rcode(rcode) => (0x81, rcode, 0),
        MockReply::WrongId => (0x81, 0x00, 0),
        MockReply::Silent => unreachable!(),
    };
    response.push(flags);
    response.push(0x80 | rcode);

    response.extend_from_slice(&query[4..6]);
    response.extend_from_slice(&answers.to_be_bytes());
    response.extend_from_slice(&[0x00, 0x00]);
    response.extend_from_slice(&[0x00, 0x00]);
    response.extend_from_slice(&query[12..]);

    if let MockReply::Address(ip) = reply {
        response.extend_from_slice(&[
            0xc0, 0x0c,
            0x00, 0x01,
            0x00, 0x01,
            0x00, 0x00, 0x00, 0x3c,
            0x00, 0x04,
        ]);
        response.extend_from_slice(&ip);
    }

    Some(response)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_response_echoes_id_and_question() {
        let query = vec![
            0xab, 0xcd,
            0x01, 0x00,
            0x00, 0x01,
            0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
        ];

        let response = build_response(&query, MockReply::Address([192, 0, 2, 1])).unwrap();

        assert_eq!(response[0..2], [0xab, 0xcd]);
        assert_eq!(response[2], 0x81);
        assert_eq!(response[6..8], [0x00, 0x01]);
    }

    #[test]
    fn test_truncated_sets_tc_bit() {
        let query = vec![0u8; 12];
        let response = build_response(&query, MockReply::Truncated).unwrap();
        assert_eq!(response[2] & 0x02, 0x02);
    }
}
