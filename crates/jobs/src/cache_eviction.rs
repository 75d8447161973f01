use ferrous_resolv_application::ports::CacheMaintenancePort;
use std::sync::Weak;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info};

/// Periodically sweeps expired entries out of a cache.
///
/// The job only holds a weak reference and exits once the cache is gone.
/// It also stops when its cancellation token fires, which happens when the
/// returned [`EvictionHandle`] is dropped.
pub struct CacheEvictionJob {
    maintenance: Weak<dyn CacheMaintenancePort>,
    interval: Option<Duration>,
    shutdown: CancellationToken,
}

impl CacheEvictionJob {
    pub fn new(maintenance: Weak<dyn CacheMaintenancePort>) -> Self {
        Self {
            maintenance,
            interval: None,
            shutdown: CancellationToken::new(),
        }
    }

    /// `None` parks the job until an interval is set through the handle.
    pub fn with_interval(mut self, interval: Option<Duration>) -> Self {
        self.interval = interval;
        self
    }

    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.shutdown = token;
        self
    }

    /// Converts a minute count into a sweep interval; zero or negative
    /// disables sweeping.
    pub fn interval_from_minutes(minutes: i64) -> Option<Duration> {
        (minutes > 0).then(|| Duration::from_secs(minutes as u64 * 60))
    }

    /// Spawns the job on the current tokio runtime.
    pub fn start(self) -> EvictionHandle {
        let (interval_tx, interval_rx) = watch::channel(self.interval);
        let shutdown = self.shutdown.clone();

        info!(interval = ?self.interval, "Starting cache eviction job");
        let task = tokio::spawn(run(self.maintenance, interval_rx, self.shutdown));

        EvictionHandle {
            shutdown,
            interval_tx,
            task,
        }
    }
}

async fn run(
    maintenance: Weak<dyn CacheMaintenancePort>,
    mut interval_rx: watch::Receiver<Option<Duration>>,
    shutdown: CancellationToken,
) {
    loop {
        let interval = *interval_rx.borrow_and_update();

        let Some(interval) = interval else {
            tokio::select! {
                biased;
                _ = shutdown.cancelled() => break,
                changed = interval_rx.changed() => {
                    if changed.is_err() {
                        break;
                    }
                    continue;
                }
            }
        };

        tokio::select! {
            biased;
            _ = shutdown.cancelled() => break,
            changed = interval_rx.changed() => {
                if changed.is_err() {
                    break;
                }
                debug!("Cache eviction interval changed");
            }
            _ = tokio::time::sleep(interval) => {
                let Some(port) = maintenance.upgrade() else {
                    debug!("Cache dropped; eviction job exiting");
                    break;
                };
                match port.run_eviction_cycle().await {
                    Ok(outcome) => {
                        if outcome.entries_removed > 0 {
                            info!(
                                entries_removed = outcome.entries_removed,
                                names_scanned = outcome.names_scanned,
                                cache_size = outcome.cache_size,
                                "Cache eviction cycle completed"
                            );
                        }
                    }
                    Err(e) => {
                        error!(error = %e, "Cache eviction cycle failed");
                    }
                }
            }
        }
    }

    info!("CacheEvictionJob: shutting down");
}

/// Owner side of a running [`CacheEvictionJob`]. Dropping it stops the job.
pub struct EvictionHandle {
    shutdown: CancellationToken,
    interval_tx: watch::Sender<Option<Duration>>,
    task: JoinHandle<()>,
}

impl EvictionHandle {
    /// Changes the sweep interval, interrupting the current wait.
    pub fn set_interval(&self, interval: Option<Duration>) {
        self.interval_tx.send_replace(interval);
    }

    pub fn interval(&self) -> Option<Duration> {
        *self.interval_tx.borrow()
    }

    pub fn cancel(&self) {
        self.shutdown.cancel();
    }

    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }
}

impl Drop for EvictionHandle {
    fn drop(&mut self) {
        self.shutdown.cancel();
    }
}
