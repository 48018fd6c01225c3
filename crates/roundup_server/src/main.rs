mod api_conversion;
mod error;
mod handlers;
mod logging;
mod routes;
mod validation;

use std::net::SocketAddr;

use clap::Parser;
use color_eyre::eyre::WrapErr;
use roundup_core::SavingsConfig;

use crate::handlers::AppState;

/// HTTP service for round-up savings and retirement projections
#[derive(Parser, Debug)]
#[command(name = "roundup_server", version, about)]
struct Args {
    /// Port to listen on
    #[arg(short, long, env = "PORT", default_value_t = 5477)]
    port: u16,

    /// Address to bind
    #[arg(long, env = "HOST", default_value = "0.0.0.0")]
    host: String,

    /// Log level for this service (trace, debug, info, warn, error)
    #[arg(long, env = "LOG_LEVEL", default_value = "info")]
    log_level: String,

    /// IANA time zone used to read and render timestamps
    #[arg(long, env = "ROUNDUP_TIME_ZONE", default_value = "UTC")]
    time_zone: String,

    /// Maximum request body size in megabytes
    #[arg(long, default_value_t = 10)]
    body_limit_mb: usize,
}

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let args = Args::parse();
    logging::init_logging(&args.log_level)?;

    let config = SavingsConfig::default().with_time_zone(&args.time_zone);
    config.validate()?;
    let calendar = config.calendar()?;

    let state = AppState::new(config, calendar);
    let app = routes::app(state, args.body_limit_mb * 1024 * 1024);

    let addr: SocketAddr = format!("{}:{}", args.host, args.port)
        .parse()
        .wrap_err_with(|| format!("Invalid listen address {}:{}", args.host, args.port))?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .wrap_err_with(|| {
            format!(
                "Failed to bind {addr}; is port {} already in use? Set --port or PORT to pick another",
                args.port
            )
        })?;

    tracing::info!(
        address = %listener.local_addr()?,
        time_zone = %args.time_zone,
        "roundup_server listening"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("roundup_server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::error!("failed to listen for Ctrl-C: {err}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                tracing::error!("failed to listen for SIGTERM: {err}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("shutdown signal received");
}
