//! Serves the task list API over HTTP.
//!
//! Configuration is read from the environment (and a `.env` file when
//! present); see [`tasklist::config`] for the variables. `RUST_LOG` controls
//! log output.

use std::sync::Arc;

use mockable::DefaultClock;
use tasklist::api::create_router;
use tasklist::config::{AppConfig, StorageMode};
use tasklist::task::adapters::memory::InMemoryTaskRepository;
use tasklist::task::adapters::postgres::PostgresTaskRepository;
use tasklist::task::ports::TaskRepository;
use tasklist::task::services::TaskLifecycleService;
use tasklist::telemetry::init_tracing;
use tokio::net::TcpListener;
use tokio::signal;

/// Boxed error type for the main result.
type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[tokio::main]
async fn main() -> Result<(), BoxError> {
    dotenvy::dotenv().ok();
    init_tracing()?;

    let config = AppConfig::from_env().inspect_err(|error| {
        tracing::error!(%error, "configuration error");
    })?;
    tracing::info!(storage_mode = ?config.storage_mode, "configuration loaded");

    let repository = open_repository(&config).await?;
    let service = Arc::new(TaskLifecycleService::new(
        repository,
        Arc::new(DefaultClock),
    ));
    let application = create_router(service);

    let listener = TcpListener::bind(config.bind_address())
        .await
        .inspect_err(|error| {
            tracing::error!(%error, host = %config.host, port = config.port, "failed to bind");
        })?;
    match listener.local_addr() {
        Ok(address) => tracing::info!("listening on {address}"),
        Err(error) => tracing::warn!(%error, "could not determine local address"),
    }

    axum::serve(listener, application)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("server shutdown complete");
    Ok(())
}

async fn open_repository(config: &AppConfig) -> Result<Arc<dyn TaskRepository>, BoxError> {
    match config.storage_mode {
        StorageMode::InMemory => Ok(Arc::new(InMemoryTaskRepository::new())),
        StorageMode::Postgres => {
            let url = config
                .database_url
                .clone()
                .ok_or("DATABASE_URL is required when STORAGE_MODE=postgres")?;
            let pool_size = config.database_pool_size;
            let repository = tokio::task::spawn_blocking(move || {
                PostgresTaskRepository::connect(&url, pool_size)
            })
            .await??;
            repository.ensure_schema().await?;
            tracing::info!(pool_size, "connected to PostgreSQL");
            Ok(Arc::new(repository))
        }
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(error) = signal::ctrl_c().await {
            tracing::warn!(%error, "failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(error) => {
                tracing::warn!(%error, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => tracing::info!("received Ctrl+C, shutting down"),
        () = terminate => tracing::info!("received SIGTERM, shutting down"),
    }
}
