use std::time::Duration;

use anyhow::Result;
use tokio::sync::watch;

use token_pulse::api;
use token_pulse::config::Config;

/// Headless listing API for running the dashboard against a separate process.
#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::load()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                config
                    .logging
                    .level
                    .parse()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"))
            }),
        )
        .init();

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    tokio::spawn(async move {
        tokio::signal::ctrl_c().await.ok();
        tracing::info!("Ctrl+C received");
        let _ = shutdown_tx.send(true);
    });

    let listener = api::bind(&config.api.bind_addr).await?;
    api::serve(listener, Duration::from_millis(config.api.latency_ms), shutdown_rx).await
}
