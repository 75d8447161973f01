pub mod cache_eviction;

pub use cache_eviction::{CacheEvictionJob, EvictionHandle};
