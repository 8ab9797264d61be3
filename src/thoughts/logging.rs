use tracing_subscriber::EnvFilter;

pub const LOG_ENV: &str = "THOUGHTS_LOG";

/// `THOUGHTS_LOG` wins when set and valid. Otherwise `warn`, or `info` with
/// `verbose`.
pub fn filter_for(verbose: bool) -> EnvFilter {
    let fallback = if verbose { "info" } else { "warn" };
    EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(fallback))
}

/// Installs the stderr subscriber. Safe to call more than once; later calls
/// are ignored.
pub fn init_logging(verbose: bool) {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter_for(verbose))
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
