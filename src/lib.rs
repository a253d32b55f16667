//! Plant Tracker Server Library
//!
//! Users own plants; plants collect snapshots (photo + height records).
//! This module exports the core types, the router and the query layer for
//! the binary, tests and reuse.

pub mod config;
pub mod constants;
pub mod db;
pub mod error;
pub mod models;
pub mod routes;

pub use config::Config;
pub use error::{AppError, Result};

use axum::{
    http::{HeaderValue, Method},
    routing::get,
    Router,
};
use sqlx::PgPool;
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use routes::*;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub config: Config,
}

impl AppState {
    /// Create a new AppState with the given pool and configuration
    pub fn new(pool: PgPool, config: Config) -> Self {
        Self { pool, config }
    }
}

/// Build the application router.
///
/// Each resource path answers verbs it does not define with 405, and
/// unknown paths with 404, both as `{ "msg": ... }` bodies.
pub fn app(state: AppState) -> Router {
    let cors = cors_layer(&state.config.allowed_origins);

    Router::new()
        .route("/health", get(health_check).fallback(method_not_allowed))
        .route(
            "/api/users",
            get(list_users).post(create_user).fallback(method_not_allowed),
        )
        .route("/api/users/:user", get(get_user).fallback(method_not_allowed))
        .route(
            "/api/users/:user/plants",
            get(list_plants)
                .post(create_plant)
                .fallback(method_not_allowed),
        )
        .route(
            "/api/plants/:plant_id",
            get(get_plant)
                .delete(delete_plant)
                .fallback(method_not_allowed),
        )
        .route(
            "/api/plants/:plant_id/snapshots",
            get(list_snapshots)
                .post(create_snapshot)
                .fallback(method_not_allowed),
        )
        .fallback(route_not_found)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors),
        )
        .with_state(state)
}

fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin: {}", origin);
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST, Method::DELETE])
        .allow_headers(Any)
}
