//! Venue Seating Engine - Seat template builder for the ticketing backend
//!
//! The engine is the backend service that:
//! - Registers venues and their halls
//! - Builds each hall's Floor -> Section -> Row -> Seat template in the background
//! - Persists venues and templates in SQLite (or in memory)

mod application;
mod domain;
mod infrastructure;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{routing::get, Router};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::infrastructure::config::AppConfig;
use crate::infrastructure::http;
use crate::infrastructure::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "venue_seating_engine=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Venue Seating Engine");

    // Load configuration
    let config = AppConfig::from_env()?;
    tracing::info!("Configuration loaded");
    tracing::info!("  Persistence: {}", config.persistence.backend);
    tracing::info!("  Template workers: {}", config.template_builds.workers);

    // Initialize application state
    let state = AppState::new(config).await?;
    let state = Arc::new(state);
    tracing::info!("Application state initialized");

    // Seat template build worker
    let template_worker = {
        let queue = state.template_build_queue.clone();
        tokio::spawn(async move {
            tracing::info!("Starting seat template build worker");
            queue.run_worker().await;
        })
    };

    // Cleanup worker (removes old finished build records)
    let cleanup_worker = {
        let queue = state.template_build_queue.clone();
        let retention_hours = state.config.template_builds.history_retention_hours;
        tokio::spawn(async move {
            tracing::info!("Starting template build cleanup worker");
            loop {
                let retention = std::time::Duration::from_secs(retention_hours * 3600);
                let removed = queue.cleanup(retention).await;
                if removed > 0 {
                    tracing::debug!("Removed {} finished template build records", removed);
                }

                // Run cleanup every hour
                tokio::time::sleep(tokio::time::Duration::from_secs(3600)).await;
            }
        })
    };

    tracing::info!("Background workers started");

    // Build the router
    let app = Router::new()
        .route("/health", get(health_check))
        .merge(http::create_routes())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state.clone());

    // Start the server
    let addr = SocketAddr::from(([0, 0, 0, 0], state.config.server_port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;

    let server = axum::serve(listener, app);

    // Wait for shutdown signal (Ctrl+C)
    tokio::select! {
        result = server => {
            if let Err(e) = result {
                tracing::error!("Server error: {}", e);
            }
        }
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("Shutdown signal received, stopping workers...");
            template_worker.abort();
            cleanup_worker.abort();
            tracing::info!("Workers stopped");
        }
    }

    Ok(())
}

async fn health_check() -> &'static str {
    "OK"
}
