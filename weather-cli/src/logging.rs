use tracing_subscriber::{EnvFilter, filter::LevelFilter};

/// Install the global subscriber. `RUST_LOG` takes precedence over `level`.
///
/// Logs go to stderr so they never interleave with the dashboard on stdout.
pub fn init_logging(level: &str) {
    let (default_level, invalid) = match level.parse::<LevelFilter>() {
        Ok(parsed) => (parsed, false),
        Err(_) => (LevelFilter::WARN, true),
    };

    let filter = EnvFilter::builder()
        .with_default_directive(default_level.into())
        .from_env_lossy();

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    if invalid {
        tracing::warn!("Invalid log level '{}', defaulting to 'warn'", level);
    }
}
