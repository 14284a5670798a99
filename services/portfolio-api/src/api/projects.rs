//! Project API handlers.
//!
//! # Purpose
//! Implements project CRUD under `/api/projects`. Writes answer 400 for anything
//! other than a missing document; reads and deletes answer 500 when the store
//! fails or the id is not an ObjectId.
use crate::api::error::{
    ApiError, api_body_rejection, api_internal, api_not_found, api_write_error,
};
use crate::api::types::MessageResponse;
use crate::app::AppState;
use crate::model::{Project, ProjectPayload};
use crate::store::StoreError;
use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;

const NOT_FOUND: &str = "Project not found";

#[utoipa::path(
    get,
    path = "/api/projects",
    tag = "projects",
    responses(
        (status = 200, description = "All projects, newest first", body = [Project]),
        (status = 500, description = "Storage failure", body = crate::api::types::ErrorResponse)
    )
)]
pub(crate) async fn list_projects(
    State(state): State<AppState>,
) -> Result<Json<Vec<Project>>, ApiError> {
    let items = state
        .store
        .list_projects()
        .await
        .map_err(|err| api_internal("Error fetching projects", &err))?;
    Ok(Json(items))
}

#[utoipa::path(
    get,
    path = "/api/projects/{id}",
    tag = "projects",
    params(("id" = String, Path, description = "Project ObjectId (hex)")),
    responses(
        (status = 200, description = "Fetch project", body = Project),
        (status = 404, description = "Project not found", body = crate::api::types::ErrorResponse),
        (status = 500, description = "Malformed id or storage failure", body = crate::api::types::ErrorResponse)
    )
)]
pub(crate) async fn get_project(
    Path(id): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<Project>, ApiError> {
    match state.store.get_project(&id).await {
        Ok(project) => Ok(Json(project)),
        Err(StoreError::NotFound(_)) => Err(api_not_found(NOT_FOUND)),
        Err(err) => Err(api_internal("Error fetching project", &err)),
    }
}

#[utoipa::path(
    post,
    path = "/api/projects",
    tag = "projects",
    request_body = ProjectPayload,
    responses(
        (status = 201, description = "Project created", body = Project),
        (status = 400, description = "Validation or storage failure", body = crate::api::types::ErrorResponse)
    )
)]
pub(crate) async fn create_project(
    State(state): State<AppState>,
    body: Result<Json<ProjectPayload>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    const MESSAGE: &str = "Error creating project";
    let Json(payload) = body.map_err(|rejection| api_body_rejection(MESSAGE, rejection))?;
    match state.store.create_project(payload).await {
        Ok(created) => Ok((StatusCode::CREATED, Json(created))),
        Err(err) => Err(api_write_error(MESSAGE, &err)),
    }
}

#[utoipa::path(
    put,
    path = "/api/projects/{id}",
    tag = "projects",
    params(("id" = String, Path, description = "Project ObjectId (hex)")),
    request_body = ProjectPayload,
    responses(
        (status = 200, description = "Project updated", body = Project),
        (status = 400, description = "Validation failure or malformed id", body = crate::api::types::ErrorResponse),
        (status = 404, description = "Project not found", body = crate::api::types::ErrorResponse)
    )
)]
pub(crate) async fn update_project(
    Path(id): Path<String>,
    State(state): State<AppState>,
    body: Result<Json<ProjectPayload>, JsonRejection>,
) -> Result<Json<Project>, ApiError> {
    const MESSAGE: &str = "Error updating project";
    let Json(payload) = body.map_err(|rejection| api_body_rejection(MESSAGE, rejection))?;
    match state.store.update_project(&id, payload).await {
        Ok(updated) => Ok(Json(updated)),
        Err(StoreError::NotFound(_)) => Err(api_not_found(NOT_FOUND)),
        Err(err) => Err(api_write_error(MESSAGE, &err)),
    }
}

#[utoipa::path(
    delete,
    path = "/api/projects/{id}",
    tag = "projects",
    params(("id" = String, Path, description = "Project ObjectId (hex)")),
    responses(
        (status = 200, description = "Project deleted", body = MessageResponse),
        (status = 404, description = "Project not found", body = crate::api::types::ErrorResponse),
        (status = 500, description = "Malformed id or storage failure", body = crate::api::types::ErrorResponse)
    )
)]
pub(crate) async fn delete_project(
    Path(id): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<MessageResponse>, ApiError> {
    match state.store.delete_project(&id).await {
        Ok(()) => Ok(Json(MessageResponse {
            message: "Project deleted successfully".to_string(),
        })),
        Err(StoreError::NotFound(_)) => Err(api_not_found(NOT_FOUND)),
        Err(err) => Err(api_internal("Error deleting project", &err)),
    }
}
