//! Router construction for the webhook server.

use std::sync::Arc;

use axum::{
    routing::get,
    Extension, Router,
};
use orderbot_core::FulfillmentService;
use tower_http::trace::TraceLayer;

use crate::handlers;

/// Build the axum router with all routes and middleware.
pub fn build_router(service: Arc<FulfillmentService>) -> Router {
    Router::new()
        .route(
            "/",
            get(handlers::health::default_text).post(handlers::webhook::fulfill),
        )
        .route("/health", get(handlers::health::health))
        .layer(TraceLayer::new_for_http())
        .layer(Extension(service))
}
