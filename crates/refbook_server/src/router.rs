//! Router construction for the refbook server.

use std::sync::Arc;

use axum::routing::get;
use axum::{Extension, Router};
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use refbook_core::service::RefbookService;

use crate::handlers::refbooks;

/// Build the axum router with all routes and middleware.
pub fn build_router(service: Arc<RefbookService>) -> Router {
    Router::new()
        .route("/refbooks/", get(refbooks::list_refbooks))
        .route("/refbooks/:id/elements", get(refbooks::list_elements))
        .route("/refbooks/:id/check_element", get(refbooks::check_element))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(
                    CorsLayer::new()
                        .allow_origin(Any)
                        .allow_methods(Any)
                        .allow_headers(Any),
                ),
        )
        .layer(Extension(service))
}
