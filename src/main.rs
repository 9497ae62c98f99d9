use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::event::Event;
use tokio::sync::{mpsc, watch};

use token_pulse::api;
use token_pulse::app::App;
use token_pulse::config::Config;
use token_pulse::event::{ApiStatus, AppEvent};
use token_pulse::fetch::TokenSource;
use token_pulse::input::parse_main_command;
use token_pulse::runtime::listing_session::ListingSession;
use token_pulse::store::TokenStore;
use token_pulse::ui::{self, AppState};

#[tokio::main]
async fn main() -> Result<()> {
    let config = match Config::load() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load config: {:#}", e);
            eprintln!("Make sure config/default.toml exists or set TOKEN_PULSE_CONFIG");
            std::process::exit(1);
        }
    };

    // Log to file so it doesn't interfere with the TUI
    let log_file = std::fs::File::create(&config.logging.file)?;
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
        .with_writer(log_file)
        .with_ansi(false)
        .json()
        .init();

    let filters = config.ui.default_filters()?;
    let source = Arc::new(TokenSource::from_config(&config.source)?);
    tracing::info!(
        source = %source.describe(),
        interval_ms = config.feed.interval_ms,
        tab = filters.tab.slug(),
        time = filters.time.label(),
        "Starting token-pulse"
    );

    let (app_tx, mut app_rx) = mpsc::channel::<AppEvent>(256);
    let (shutdown_tx, shutdown_rx) = watch::channel(false);

    if config.api.embedded {
        let latency = Duration::from_millis(config.api.latency_ms);
        let api_tx = app_tx.clone();
        match api::bind(&config.api.bind_addr).await {
            Ok(listener) => {
                let _ = api_tx.send(AppEvent::Api(ApiStatus::Listening)).await;
                let api_shutdown = shutdown_rx.clone();
                tokio::spawn(async move {
                    if let Err(e) = api::serve(listener, latency, api_shutdown).await {
                        tracing::error!(error = %e, "Listing API failed");
                        let _ = api_tx.send(AppEvent::Error(format!("Listing API failed: {:#}", e))).await;
                    }
                    let _ = api_tx.send(AppEvent::Api(ApiStatus::Stopped)).await;
                });
            }
            Err(e) => {
                tracing::warn!(error = %e, "Listing API not started");
                let _ = api_tx
                    .send(AppEvent::LogMessage(format!("[WARN] Listing API not started: {:#}", e)))
                    .await;
            }
        }
    }

    // Ctrl+C handler
    let ctrl_c_shutdown = shutdown_tx.clone();
    tokio::spawn(async move {
        tokio::signal::ctrl_c().await.ok();
        tracing::info!("Ctrl+C received");
        let _ = ctrl_c_shutdown.send(true);
    });

    let store = TokenStore::new();
    let session = ListingSession::new(store, source.clone(), config.feed.clone(), app_tx.clone());
    let state = AppState::new(filters, config.ui.flash_dwell(), &source.describe());
    let mut app = App::new(state, session);
    app.state.push_log(format!("token-pulse started | source {}", source.describe()));
    app.reload();

    let mut terminal = ratatui::init();
    let refresh = Duration::from_millis(config.ui.refresh_rate_ms);

    loop {
        app.sync(Instant::now());
        terminal.draw(|frame| ui::render(frame, &app.state))?;

        // Handle input (non-blocking with timeout)
        if crossterm::event::poll(refresh)? {
            if let Event::Key(key) = crossterm::event::read()? {
                if let Some(cmd) = parse_main_command(&key.code) {
                    if app.handle_command(cmd) {
                        tracing::info!("User quit");
                        let _ = shutdown_tx.send(true);
                        break;
                    }
                }
            }
        }

        // Drain events from channel
        while let Ok(evt) = app_rx.try_recv() {
            app.handle_event(evt);
        }

        if *shutdown_rx.borrow() {
            break;
        }
    }

    app.shutdown();
    ratatui::restore();
    tracing::info!("Shutdown complete");
    println!("Goodbye! Check {} for details.", config.logging.file);
    Ok(())
}
