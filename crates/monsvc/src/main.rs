use anyhow::{Context, Result};
use clap::Parser;
use monsvc::cli::Cli;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Cli::parse().into_config();
    monsvc::logging::init(config.log_level);
    tracing::trace!("application entry checkpoint");

    let registry = config.registry();
    let listener = tokio::net::TcpListener::bind(config.bind)
        .await
        .with_context(|| format!("bind {}", config.bind))?;
    let addr = listener.local_addr().context("resolve listening address")?;
    tracing::info!("HTTP server listening on http://{addr}");
    tracing::info!("HTTP docs available at http://{addr}/docs/ (OpenAPI: /openapi.json)");
    tracing::debug!("status transition policy: {}", registry.policy().name());

    monsvc::http::serve(listener, registry, shutdown_signal())
        .await
        .with_context(|| format!("serve {addr}"))?;
    tracing::info!("HTTP server stopped");
    Ok(())
}

/// Resolves on Ctrl-C or SIGTERM.
async fn shutdown_signal() {
    let mut term =
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()).ok();
    tokio::select! {
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("Ctrl-C received, shutting down...");
        }
        _ = async {
            if let Some(ref mut t) = term { t.recv().await; }
        } => {
            tracing::info!("SIGTERM received, shutting down...");
        }
    }
}
