use anyhow::{Context, Result};
use enrol_db::{create_pool, run_migrations, MemoryUserStore, PgUserStore, UserStore};
use enrol_server::config::{load_config, StoreConfig};
use enrol_server::state::AppState;
use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    tracing::info!("Starting enrol server");

    // Load configuration
    let config_path =
        std::env::var("ENROL_CONFIG").unwrap_or_else(|_| "server-config.yaml".to_string());

    tracing::info!("Loading config from: {}", config_path);

    let config = load_config(&config_path)?;

    tracing::info!("Config loaded successfully");

    let store: Arc<dyn UserStore> = match &config.store {
        StoreConfig::Memory => {
            tracing::info!("Using in-memory user store");
            Arc::new(MemoryUserStore::new())
        }
        StoreConfig::Postgres {
            url,
            max_connections,
        } => {
            tracing::info!("Connecting to database...");
            let pool = create_pool(url, *max_connections)
                .await
                .context("Failed to create database pool")?;

            tracing::info!("Running database migrations...");
            run_migrations(&pool)
                .await
                .context("Failed to run migrations")?;

            Arc::new(PgUserStore::new(pool))
        }
    };

    if !config.auth.validate_lifetime {
        tracing::warn!("Token lifetime validation is disabled; expired tokens are accepted");
    }

    let listen = config.listen.clone();
    let state = AppState::new(store, config);

    // Build router
    let app = enrol_server::web::build_router(state);

    // Start server with graceful shutdown
    let listener = tokio::net::TcpListener::bind(&listen)
        .await
        .with_context(|| format!("Failed to bind to {}", listen))?;

    tracing::info!("Server listening on {}", listen);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
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

    tracing::info!("Shutdown signal received, stopping...");
}
