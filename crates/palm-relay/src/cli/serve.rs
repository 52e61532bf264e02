//! The `palm-relay serve` command.

use clap::Args;
use palm_relay_core::{server, Config, Relay};
use std::sync::Arc;
use tokio::net::TcpListener;

/// Arguments for the `serve` command.
#[derive(Args, Debug)]
pub struct ServeArgs {
    /// Interface to bind (overrides server.host)
    #[arg(long, env = "PALM_RELAY_HOST")]
    pub host: Option<String>,

    /// Port to bind (overrides server.port)
    #[arg(short, long, env = "PALM_RELAY_PORT")]
    pub port: Option<u16>,
}

/// Execute the serve command.
pub async fn execute(args: ServeArgs, mut config: Config) -> anyhow::Result<()> {
    if let Some(host) = args.host {
        config.server.host = host;
    }
    if let Some(port) = args.port {
        config.server.port = port;
    }

    let relay = Arc::new(Relay::from_config(&config)?);
    tracing::info!(
        provider = relay.provider_name(),
        model = relay.model(),
        route = %config.server.route,
        "Starting relay"
    );

    let app = server::router(relay, &config.server);
    let listener = TcpListener::bind((config.server.host.as_str(), config.server.port)).await?;
    server::serve(listener, app, shutdown_signal()).await?;

    tracing::info!("Relay stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("Failed to listen for shutdown signal: {e}");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
