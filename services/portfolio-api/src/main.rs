//! Art portfolio HTTP service entry point.
//!
//! # Purpose
//! Wires configuration, storage and the HTTP router, then serves until the
//! shutdown signal fires.
//!
//! # Notes
//! The `build_state` helper keeps wiring testable and minimizes main setup logic.
use anyhow::Context;
use portfolio_api::app::{AppState, build_router};
use portfolio_api::config::{PortfolioConfig, StorageBackend};
use portfolio_api::observability;
use portfolio_api::store::PortfolioStore;
use portfolio_api::store::memory::InMemoryStore;
use portfolio_api::store::mongo::MongoStore;
use std::future::Future;
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = PortfolioConfig::from_env().context("portfolio config")?;
    run_with_shutdown(config, async {
        let _ = tokio::signal::ctrl_c().await;
    })
    .await
}

async fn run_with_shutdown<F>(config: PortfolioConfig, shutdown: F) -> anyhow::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    observability::init_observability("portfolio-api");
    let state = build_state(&config.storage).await?;
    let backend = state.store.backend_name();
    if state.store.is_durable() {
        // The listener must come up even while the database is unreachable.
        let store = state.store.clone();
        tokio::spawn(async move {
            match store.health_check().await {
                Ok(()) => tracing::info!(backend, "MongoDB connected"),
                Err(err) => tracing::error!(backend, error = %err, "MongoDB connection error"),
            }
        });
    }

    let app = build_router(state);
    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("bind {}", config.bind_addr))?;
    let addr = listener.local_addr()?;
    tracing::info!(%addr, backend, "Server running on port {}", addr.port());
    axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(shutdown)
        .await?;
    tracing::info!("portfolio api stopped");
    Ok(())
}

async fn build_state(storage: &StorageBackend) -> anyhow::Result<AppState> {
    let store: Arc<dyn PortfolioStore + Send + Sync> = match storage {
        StorageBackend::Memory => Arc::new(InMemoryStore::new()),
        StorageBackend::Mongo(mongo) => Arc::new(
            MongoStore::connect(mongo)
                .await
                .context("invalid MongoDB connection string")?,
        ),
    };
    Ok(AppState { store })
}
