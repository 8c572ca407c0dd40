use axum::Router;

pub mod deliveries;
pub mod system;

/// Router for all delivery-tracking endpoints.
pub fn router() -> Router {
    Router::new().nest("/deliveries", deliveries::router())
}
