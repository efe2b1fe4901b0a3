use tracing_subscriber::EnvFilter;

/// Environment variable that overrides the log filter, e.g. `FERRISPEN_LOG=debug`.
pub const LOG_ENV: &str = "FERRISPEN_LOG";

/// Install the stderr subscriber. Safe to call more than once.
pub fn init_logging() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
