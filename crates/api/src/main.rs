use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use steampulse_api::config::ServerConfig;
use steampulse_api::router::build_app_router;
use steampulse_api::state::AppState;
use steampulse_core::SyncConfig;
use steampulse_events::WebhookNotifier;
use steampulse_steam::{AchievementProvider, SteamClient};
use steampulse_sync::AchievementPoller;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "steampulse_api=debug,steampulse_sync=debug,tower_http=debug".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // --- Configuration ---
    let config = ServerConfig::from_env();
    tracing::info!(host = %config.host, port = %config.port, "Loaded server configuration");

    let sync_config = SyncConfig::from_env().expect("Steam account must be configured");
    tracing::info!(
        steam_user_id = %sync_config.steam_user_id,
        max_games = sync_config.max_games,
        poll_interval_secs = sync_config.poll_interval_secs,
        "Loaded sync configuration"
    );

    // --- Database ---
    let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");

    let pool = steampulse_db::create_pool(&database_url)
        .await
        .expect("Failed to connect to database");
    tracing::info!("Database connection pool created");

    steampulse_db::health_check(&pool)
        .await
        .expect("Database health check failed");
    tracing::info!("Database health check passed");

    steampulse_db::run_migrations(&pool)
        .await
        .expect("Failed to run database migrations");
    tracing::info!("Database migrations applied");

    // --- Steam client & notifier ---
    let provider: Arc<dyn AchievementProvider> =
        Arc::new(SteamClient::from_env().expect("Steam API credentials must be configured"));
    let notifier = Arc::new(WebhookNotifier::new());

    // --- Background poller ---
    let poller_cancel = tokio_util::sync::CancellationToken::new();
    let poller_handle = if sync_config.poller_enabled {
        let poller = AchievementPoller::new(
            pool.clone(),
            Arc::clone(&provider),
            Arc::clone(&notifier),
            sync_config.clone(),
        );
        let cancel = poller_cancel.clone();
        Some(tokio::spawn(async move { poller.run(cancel).await }))
    } else {
        tracing::info!("Poller disabled (ENABLE_POLLER=false)");
        None
    };

    // --- App state ---
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        sync_config: Arc::new(sync_config),
        provider,
        notifier,
    };

    // --- Router ---
    let app = build_app_router(state, &config);

    // --- Start server ---
    let addr = SocketAddr::new(
        config.host.parse().expect("Invalid HOST address"),
        config.port,
    );
    tracing::info!(%addr, "Starting server");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");

    // --- Post-shutdown cleanup ---
    tracing::info!("Server stopped accepting connections, cleaning up");

    if let Some(handle) = poller_handle {
        poller_cancel.cancel();
        let _ = tokio::time::timeout(Duration::from_secs(5), handle).await;
        tracing::info!("Achievement poller stopped");
    }

    tracing::info!("Graceful shutdown complete");
}

/// Wait for a termination signal to initiate graceful shutdown.
///
/// Handles both SIGINT (Ctrl-C) and SIGTERM (on Unix) so the server
/// shuts down cleanly whether stopped interactively or by a process
/// manager (e.g. systemd, Docker, Kubernetes).
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl-C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received SIGINT (Ctrl-C), starting graceful shutdown");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown");
        }
    }
}
