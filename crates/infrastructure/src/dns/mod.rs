pub mod cache;
pub mod cache_maintenance;
pub mod forwarding;
pub mod registry;
pub mod resolver;
pub mod transport;

pub use cache::{CacheMetrics, Clock, EntryKey, ManualClock, RecordCache, SystemClock};
pub use forwarding::{MessageCodec, TcpSender, UdpSender};
pub use registry::CacheRegistry;
pub use resolver::{localhost_context, StubResolverBuilder};
pub use transport::{DnsTransport, TcpTransport, Transport, UdpTransport};
