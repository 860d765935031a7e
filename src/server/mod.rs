use std::sync::Arc;
use std::time::Duration;

use axum::routing::get;
use axum::Router;
use tower_http::trace::TraceLayer;

use crate::adapters::heartrails::HeartRailsLookup;
use crate::adapters::memory::InMemoryAccessLogStore;
use crate::adapters::mysql::MySqlAccessLogStore;
use crate::config::AppConfig;
use crate::core::access_log::AccessLogService;
use crate::core::resolver::AddressResolver;
use crate::domain::ports::AccessLogStore;
use crate::utils::error::Result;
use crate::utils::validation::validate_bind_addr;

pub mod handlers;

/// Shared state for the router; services are stateless behind Arcs, so
/// cloning per request is cheap and lock-free.
#[derive(Clone)]
pub struct AppState {
    pub resolver: Arc<AddressResolver>,
    pub access_log: Arc<AccessLogService>,
}

/// Assemble the application router over the given state.
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::root))
        .route("/address", get(handlers::address))
        .route("/address/access_logs", get(handlers::access_logs))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Wire the real adapters, bind, and serve until a shutdown signal.
pub async fn run(config: &AppConfig) -> Result<()> {
    let store: Arc<dyn AccessLogStore> = if config.in_memory {
        tracing::warn!("using in-memory access log store; events are lost on shutdown");
        Arc::new(InMemoryAccessLogStore::new())
    } else {
        let store = MySqlAccessLogStore::connect(&config.database_url).await?;
        store.init_schema().await?;
        Arc::new(store)
    };

    let lookup = HeartRailsLookup::new(
        config.geocoder_url.clone(),
        Duration::from_secs(config.http_timeout_secs),
    )?;

    let state = AppState {
        resolver: Arc::new(AddressResolver::new(Arc::new(lookup))),
        access_log: Arc::new(AccessLogService::new(store)),
    };

    let addr = validate_bind_addr("bind_addr", &config.bind_addr)?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%addr, "listening");

    axum::serve(listener, app(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
        return;
    }
    tracing::info!("shutdown signal received");
}
