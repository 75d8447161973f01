mod cache_maintenance_port;
mod dns_sender;
mod resolver_cache;

pub use cache_maintenance_port::{CacheEvictionOutcome, CacheMaintenancePort};
pub use dns_sender::DnsSender;
pub use resolver_cache::{CacheProvider, IngestedResponse, ResolverCache};
