//! Loppis marketplace library.
//!
//! Exposes the service internals for integration testing. The entry point
//! for running the server is the `loppis` binary.

pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod query;
pub mod routes;
pub mod state;
pub mod theme;

use axum::Router;

use crate::state::AppState;

/// Assemble the full application router.
pub fn app(state: AppState) -> Router {
    Router::new()
        .merge(routes::listings::router())
        .merge(routes::categories::router())
        .merge(routes::html::router())
        .merge(routes::health::router())
        .merge(routes::static_files::router())
        .with_state(state)
}
