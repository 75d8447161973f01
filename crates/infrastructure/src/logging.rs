use ferrous_resolv_domain::LoggingConfig;
use tracing_subscriber::EnvFilter;

/// Installs a global `tracing` subscriber at the configured level.
///
/// `RUST_LOG` takes precedence over `config.level`. Calling this more than
/// once is harmless; only the first subscriber sticks.
pub fn init_logging(config: &LoggingConfig) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .try_init()
        .ok();
}
