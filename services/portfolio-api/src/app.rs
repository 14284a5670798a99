//! Portfolio HTTP application wiring.
//!
//! # Purpose
//! Builds the Axum router, configures middleware, and defines the shared
//! application state injected into handlers.
//!
//! # Notes
//! This module centralizes route composition to keep `main` small and testable.
use crate::api;
use crate::store::PortfolioStore;
use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::routing::get;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Largest accepted request body.
pub const BODY_LIMIT_BYTES: usize = 100 * 1024;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn PortfolioStore + Send + Sync>,
}

pub fn build_router(state: AppState) -> Router {
    let trace_layer =
        TraceLayer::new_for_http().make_span_with(|request: &axum::http::Request<_>| {
            tracing::info_span!(
                "http.request",
                method = %request.method(),
                uri = %request.uri(),
                version = ?request.version()
            )
        });

    Router::new()
        .route("/", get(api::system::liveness))
        .route("/api/health", get(api::system::health))
        .route("/api/openapi.json", get(api::openapi::openapi_json))
        .nest("/api/images", image_routes())
        .nest("/api/projects", project_routes())
        .layer(DefaultBodyLimit::max(BODY_LIMIT_BYTES))
        .layer(CorsLayer::permissive())
        .layer(trace_layer)
        .with_state(state)
}

fn image_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(api::images::list_images).post(api::images::create_image),
        )
        .route(
            "/:id",
            get(api::images::get_image)
                .put(api::images::update_image)
                .delete(api::images::delete_image),
        )
}

fn project_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(api::projects::list_projects).post(api::projects::create_project),
        )
        .route(
            "/:id",
            get(api::projects::get_project)
                .put(api::projects::update_project)
                .delete(api::projects::delete_project),
        )
}
