use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize logging to stdout.
///
/// The log level can be controlled via the `level` parameter or the `RUST_LOG`
/// environment variable, which takes precedence when set.
pub fn init_logging(level: &str) -> color_eyre::Result<()> {
    let default_filter = format!("roundup_server={level},roundup_core=warn,tower_http=info");
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&default_filter));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stdout)
                .with_target(true)
                .with_thread_ids(false),
        )
        .try_init()?;

    tracing::debug!(filter = %default_filter, "logging initialized");
    Ok(())
}
