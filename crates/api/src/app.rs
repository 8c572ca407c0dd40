//! HTTP API application wiring (Axum router + service wiring).
//!
//! Folder layout:
//! - `services.rs`: repository/payout wiring behind one `AppServices` handle
//! - `routes/`: HTTP routes + handlers
//! - `dto.rs`: request/response DTOs and JSON mapping helpers
//! - `errors.rs`: consistent error responses

use std::sync::Arc;

use axum::{routing::get, Extension, Router};

pub mod dto;
pub mod errors;
pub mod routes;
pub mod services;

use parceltrack_courier::PayoutPolicy;

/// Build the full HTTP router (public entrypoint used by `main.rs`).
pub fn build_app(payout_policy: PayoutPolicy) -> Router {
    let services = Arc::new(services::AppServices::new(payout_policy));

    Router::new()
        .route("/health", get(routes::system::health))
        .merge(routes::router())
        .layer(Extension(services))
}
