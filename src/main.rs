use omen::config::Config;
use omen::services::{DashboardService, SignalHistory, SignalNotifier};
use omen::AppState;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "omen=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = Arc::new(Config::from_env());
    info!("Starting Omen server on {}:{}", config.host, config.port);

    // Weight tables are compile-time constants; a bad edit must fail at
    // startup, not mid-cycle.
    omen::engine::scoring::verify_weights()?;

    // Open the signal history store, falling back to in-memory if the
    // file cannot be opened.
    let history = match SignalHistory::new(&config.history_db_path) {
        Ok(store) => Arc::new(store),
        Err(e) => {
            warn!(
                "Failed to open history database at {}: {}, using in-memory store",
                config.history_db_path, e
            );
            Arc::new(SignalHistory::new_in_memory()?)
        }
    };

    let notifier = Arc::new(SignalNotifier::new(
        config.notify_webhook_url.clone(),
        config.notify_cooldown_ms,
        Arc::clone(&history),
    ));
    if config.notify_webhook_url.is_none() {
        info!("No webhook configured, signals will be logged but not dispatched");
    }

    let dashboard = Arc::new(DashboardService::new(
        &config,
        notifier,
        Arc::clone(&history),
    ));

    // First cycle before serving, then the periodic cadences.
    if let Err(e) = dashboard.refresh().await {
        warn!("Initial refresh cycle failed: {}", e);
    }
    Arc::clone(&dashboard).spawn_cadences(&config);

    let state = AppState {
        config: Arc::clone(&config),
        dashboard,
        history,
    };

    // Build CORS layer
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Build the router
    let app = omen::api::router()
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    // Start the server
    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Omen server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
