//! evocms server: multi-blog CMS core.
//!
//! Main entry point that wires all crates together and starts the server.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use tracing_subscriber::{EnvFilter, fmt};

use evocms_api::AppState;
use evocms_cache::CacheManager;
use evocms_core::config::AppConfig;
use evocms_core::error::AppError;
use evocms_database::{DatabasePool, MemoryBackend, Stores};
use evocms_worker::jobs::PruneHitsSessionsJob;
use evocms_worker::{CronScheduler, JobRegistry};

#[tokio::main]
async fn main() {
    let env = std::env::var("EVOCMS_ENV").unwrap_or_else(|_| "development".to_string());
    let config = match AppConfig::load(&env) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    init_logging(&config);
    tracing::info!("Configuration loaded (env: {})", env);

    if let Err(e) = run(config).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}

/// Initialize tracing/logging
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .with_thread_ids(true)
                .init();
        }
        _ => {
            fmt()
                .pretty()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
    }
}

/// Main server run function
async fn run(config: AppConfig) -> Result<(), AppError> {
    tracing::info!("Starting evocms v{}", env!("CARGO_PKG_VERSION"));

    // ── Step 1: Storage backend ──────────────────────────────────
    let (db_pool, stores) = if config.database.is_memory() {
        tracing::warn!("Using the in-memory backend; nothing survives a restart");
        (None, Stores::memory(Arc::new(MemoryBackend::new())))
    } else {
        let db_pool = DatabasePool::connect(&config.database).await?;
        evocms_database::migration::run_migrations(db_pool.pool()).await?;
        let stores = Stores::postgres(db_pool.pool().clone());
        (Some(db_pool), stores)
    };

    // ── Step 2: Cache and services ───────────────────────────────
    let cache = CacheManager::new(&config.cache);
    let state = AppState::new(config.clone(), db_pool.clone(), stores, cache);

    // ── Step 3: Scheduled tasks ──────────────────────────────────
    let mut scheduler = if config.worker.enabled {
        let mut registry = JobRegistry::new();
        registry.register(Arc::new(PruneHitsSessionsJob::new(Arc::clone(
            &state.hitlist,
        ))));

        let scheduler = CronScheduler::new(Arc::new(registry)).await?;
        scheduler.register_default_tasks(&config.worker).await?;
        scheduler.start().await?;
        Some(scheduler)
    } else {
        tracing::info!("Scheduled tasks disabled");
        None
    };

    // ── Step 4: HTTP server ──────────────────────────────────────
    let app = evocms_api::build_app(state);
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {addr}: {e}")))?;

    tracing::info!("evocms server listening on {}", addr);

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await
    .map_err(|e| AppError::internal(format!("Server error: {e}")))?;

    // ── Step 5: Shutdown ─────────────────────────────────────────
    if let Some(scheduler) = scheduler.as_mut() {
        let grace = Duration::from_secs(config.server.shutdown_grace_seconds);
        match tokio::time::timeout(grace, scheduler.shutdown()).await {
            Ok(result) => result?,
            Err(_) => tracing::warn!("Scheduler did not stop within {:?}", grace),
        }
    }
    if let Some(pool) = db_pool {
        pool.close().await;
    }

    tracing::info!("evocms server shut down gracefully");
    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {}", e);
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

    tracing::info!("Shutdown signal received, starting graceful shutdown...");
}
