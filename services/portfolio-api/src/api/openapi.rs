//! OpenAPI schema aggregation for the portfolio API.
//!
//! # Purpose
//! Collects every route and schema type into a single OpenAPI document served
//! at `/api/openapi.json`.
use crate::api::{
    images, projects, system,
    types::{ErrorResponse, HealthStatus, MessageResponse},
};
use crate::model::{Image, ImagePayload, Project, ProjectPayload};
use axum::Json;
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "art-portfolio-api",
        version = "v1",
        description = "Art portfolio images and projects HTTP API"
    ),
    paths(
        system::liveness,
        system::health,
        images::list_images,
        images::get_image,
        images::create_image,
        images::update_image,
        images::delete_image,
        projects::list_projects,
        projects::get_project,
        projects::create_project,
        projects::update_project,
        projects::delete_project,
    ),
    components(schemas(
        Image,
        ImagePayload,
        Project,
        ProjectPayload,
        ErrorResponse,
        MessageResponse,
        HealthStatus,
    )),
    tags(
        (name = "system", description = "Liveness and health"),
        (name = "images", description = "Artwork images"),
        (name = "projects", description = "Portfolio projects")
    )
)]
pub struct ApiDoc;

pub(crate) async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
