pub mod clock;
mod entry;
mod ingest;
mod insert;
mod key;
pub mod metrics;
mod port;
mod storage;
mod sweep;
mod walk;

pub use clock::{Clock, ManualClock, SystemClock};
pub use key::EntryKey;
pub use metrics::CacheMetrics;
pub use storage::RecordCache;
