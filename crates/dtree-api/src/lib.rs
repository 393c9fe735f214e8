//! dtree-api
//!
//! HTTP surface for dtree. Every decision tree that reaches a handler or a
//! store has already passed `dtree_core::validate_tree`.

pub mod config;
pub mod error;
pub mod extract;
pub mod request;
pub mod routes;
pub mod state;
pub mod store;

use axum::extract::DefaultBodyLimit;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::TraceLayer;

pub use crate::config::ApiConfig;
pub use crate::state::AppState;

/// Build the service router with all middleware applied.
pub fn build_router(state: AppState) -> Router {
    let body_limit = state.config.max_body_bytes;

    routes::router()
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(TraceLayer::new_for_http())
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .layer(CorsLayer::permissive())
        .with_state(state)
}
