//! graphmusic server entry point.
//!
//! # Responsibility
//! - Load configuration, start logging, open the configured store.
//! - Serve the GraphQL router until Ctrl-C.
//!
//! # Invariants
//! - Any startup failure is fatal: it is reported and the process exits
//!   with a non-zero status.

use anyhow::{anyhow, Context};
use graphmusic_api::{build_schema, router, GRAPHQL_PATH};
use graphmusic_core::{connect, init_logging, MusicService, ServerConfig};
use log::{error, info};
use std::future::Future;
use std::net::SocketAddr;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = ServerConfig::from_env().context("failed to load configuration")?;
    init_logging(&config.log_level, config.log_dir.as_deref())
        .map_err(|err| anyhow!("failed to initialize logging: {err}"))?;

    if let Err(err) = run(config).await {
        error!("event=server_start module=server status=error error={err:#}");
        return Err(err);
    }
    Ok(())
}

async fn run(config: ServerConfig) -> anyhow::Result<()> {
    let repo = connect(&config.storage)
        .await
        .with_context(|| format!("failed to open {} store", config.storage.backend_name()))?;
    let app = router(build_schema(MusicService::new(repo)));

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;

    info!(
        "event=server_start module=server status=ok addr={addr} endpoint={GRAPHQL_PATH} backend={} version={}",
        config.storage.backend_name(),
        graphmusic_core::core_version()
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server terminated unexpectedly")?;

    info!("event=server_stop module=server status=ok");
    Ok(())
}

async fn shutdown_signal() {
    wait_for_shutdown(tokio::signal::ctrl_c()).await;
}

/// Resolves once `signal` fires; a listener that fails to install never resolves.
async fn wait_for_shutdown(signal: impl Future<Output = std::io::Result<()>>) {
    if let Err(err) = signal.await {
        error!("event=shutdown_signal module=server status=error error={err}");
        std::future::pending::<()>().await;
    }
}
