pub mod message_codec;
pub mod sender;

pub use message_codec::MessageCodec;
pub use sender::{TcpSender, UdpSender};
