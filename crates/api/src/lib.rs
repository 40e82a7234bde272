//! # Gym Manager API
//!
//! HTTP server for the gym membership manager: coach roster, private-training
//! ledger, annual-card roster, dashboard and a change-notification stream.
//!
//! ## Architecture
//!
//! - **Routes**: API endpoints and URL structure
//! - **Handlers**: request processing, delegating to `gym-db` repositories
//! - **Middleware**: error mapping
//! - **Notify**: broadcast of data-changed events
//! - **Reminder**: background task recomputing the dashboard and logging reminders
//! - **Config**: environment configuration

/// Configuration module for API settings
pub mod config;
/// Request handlers
pub mod handlers;
/// Error mapping
pub mod middleware;
pub mod notify;
pub mod reminder;
/// Route definitions and API endpoint structure
pub mod routes;

use std::{sync::Arc, time::Duration};

use axum::Router;
use eyre::{Result, WrapErr};
use gym_core::clock::{Clock, SystemClock};
use gym_db::DbPool;
use tokio::net::TcpListener;
use tower_http::{cors::CorsLayer, timeout::TimeoutLayer, trace::TraceLayer};
use tracing::info;

use crate::{config::ReminderSettings, notify::ChangeNotifier};

/// Shared application state that is accessible to all request handlers
pub struct ApiState {
    /// SQLite connection pool
    pub db_pool: DbPool,
    /// Source of "today" and "now"
    pub clock: Arc<dyn Clock>,
    pub notifier: ChangeNotifier,
    pub reminders: ReminderSettings,
}

impl ApiState {
    pub fn new(db_pool: DbPool, clock: Arc<dyn Clock>, reminders: ReminderSettings) -> Self {
        Self {
            db_pool,
            clock,
            notifier: ChangeNotifier::default(),
            reminders,
        }
    }
}

/// Builds the application router with all routes attached to `state`.
pub fn app(state: Arc<ApiState>) -> Router {
    Router::new()
        // Health check endpoints
        .merge(routes::health::routes())
        .merge(routes::coach::routes())
        .merge(routes::private_training::routes())
        .merge(routes::annual_card::routes())
        .merge(routes::dashboard::routes())
        // Change notification stream
        .merge(routes::events::routes())
        .with_state(state)
}

fn cors_layer(origins: &[String]) -> Result<CorsLayer> {
    let origins = origins
        .iter()
        .map(|origin| origin.parse::<axum::http::HeaderValue>().wrap_err_with(|| format!("Invalid CORS origin {origin}")))
        .collect::<Result<Vec<axum::http::HeaderValue>>>()?;

    Ok(CorsLayer::new()
        .allow_methods([
            axum::http::Method::GET,
            axum::http::Method::POST,
            axum::http::Method::PUT,
            axum::http::Method::DELETE,
            axum::http::Method::OPTIONS,
        ])
        .allow_headers([axum::http::header::CONTENT_TYPE, axum::http::header::ACCEPT])
        .allow_origin(origins))
}

/// Starts the API server and the background reminder task.
///
/// # Example
///
/// ```no_run
/// # async fn run() -> eyre::Result<()> {
/// let config = gym_api::config::ApiConfig::from_env()?;
/// let db_pool = gym_db::create_pool(&config.database_url).await?;
/// gym_api::start_server(config, db_pool).await?;
/// # Ok(())
/// # }
/// ```
pub async fn start_server(config: config::ApiConfig, db_pool: DbPool) -> Result<()> {
    let state = Arc::new(ApiState::new(db_pool, Arc::new(SystemClock), config.reminders));

    // Periodic dashboard recompute and daily expiry reminder
    tokio::spawn(reminder::run(state.clone()));

    let app = app(state).layer(
        tower::ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(TimeoutLayer::new(Duration::from_secs(config.request_timeout))),
    );

    // Apply CORS configuration if origins are specified
    let app = match &config.cors_origins {
        Some(origins) if !origins.is_empty() => app.layer(cors_layer(origins)?),
        _ => app,
    };

    let addr = config.server_addr();
    let listener = TcpListener::bind(&addr)
        .await
        .wrap_err_with(|| format!("binding {addr}"))?;
    info!("Server listening on http://{}", addr);
    axum::serve(listener, app).await?;

    Ok(())
}
