//! Image API handlers.
//!
//! # Purpose
//! Implements image CRUD under `/api/images`. Writes answer 400 for anything
//! other than a missing document; reads and deletes answer 500 when the store
//! fails or the id is not an ObjectId.
use crate::api::error::{
    ApiError, api_body_rejection, api_internal, api_not_found, api_write_error,
};
use crate::api::types::MessageResponse;
use crate::app::AppState;
use crate::model::{Image, ImagePayload};
use crate::store::StoreError;
use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;

const NOT_FOUND: &str = "Image not found";

#[utoipa::path(
    get,
    path = "/api/images",
    tag = "images",
    responses(
        (status = 200, description = "All images, newest first", body = [Image]),
        (status = 500, description = "Storage failure", body = crate::api::types::ErrorResponse)
    )
)]
pub(crate) async fn list_images(
    State(state): State<AppState>,
) -> Result<Json<Vec<Image>>, ApiError> {
    let items = state
        .store
        .list_images()
        .await
        .map_err(|err| api_internal("Error fetching images", &err))?;
    Ok(Json(items))
}

#[utoipa::path(
    get,
    path = "/api/images/{id}",
    tag = "images",
    params(("id" = String, Path, description = "Image ObjectId (hex)")),
    responses(
        (status = 200, description = "Fetch image", body = Image),
        (status = 404, description = "Image not found", body = crate::api::types::ErrorResponse),
        (status = 500, description = "Malformed id or storage failure", body = crate::api::types::ErrorResponse)
    )
)]
pub(crate) async fn get_image(
    Path(id): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<Image>, ApiError> {
    match state.store.get_image(&id).await {
        Ok(image) => Ok(Json(image)),
        Err(StoreError::NotFound(_)) => Err(api_not_found(NOT_FOUND)),
        Err(err) => Err(api_internal("Error fetching image", &err)),
    }
}

#[utoipa::path(
    post,
    path = "/api/images",
    tag = "images",
    request_body = ImagePayload,
    responses(
        (status = 201, description = "Image created", body = Image),
        (status = 400, description = "Validation or storage failure", body = crate::api::types::ErrorResponse)
    )
)]
pub(crate) async fn create_image(
    State(state): State<AppState>,
    body: Result<Json<ImagePayload>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    const MESSAGE: &str = "Error creating image";
    let Json(payload) = body.map_err(|rejection| api_body_rejection(MESSAGE, rejection))?;
    match state.store.create_image(payload).await {
        Ok(created) => Ok((StatusCode::CREATED, Json(created))),
        Err(err) => Err(api_write_error(MESSAGE, &err)),
    }
}

#[utoipa::path(
    put,
    path = "/api/images/{id}",
    tag = "images",
    params(("id" = String, Path, description = "Image ObjectId (hex)")),
    request_body = ImagePayload,
    responses(
        (status = 200, description = "Image updated", body = Image),
        (status = 400, description = "Validation failure or malformed id", body = crate::api::types::ErrorResponse),
        (status = 404, description = "Image not found", body = crate::api::types::ErrorResponse)
    )
)]
pub(crate) async fn update_image(
    Path(id): Path<String>,
    State(state): State<AppState>,
    body: Result<Json<ImagePayload>, JsonRejection>,
) -> Result<Json<Image>, ApiError> {
    const MESSAGE: &str = "Error updating image";
    let Json(payload) = body.map_err(|rejection| api_body_rejection(MESSAGE, rejection))?;
    match state.store.update_image(&id, payload).await {
        Ok(updated) => Ok(Json(updated)),
        Err(StoreError::NotFound(_)) => Err(api_not_found(NOT_FOUND)),
        Err(err) => Err(api_write_error(MESSAGE, &err)),
    }
}

#[utoipa::path(
    delete,
    path = "/api/images/{id}",
    tag = "images",
    params(("id" = String, Path, description = "Image ObjectId (hex)")),
    responses(
        (status = 200, description = "Image deleted", body = MessageResponse),
        (status = 404, description = "Image not found", body = crate::api::types::ErrorResponse),
        (status = 500, description = "Malformed id or storage failure", body = crate::api::types::ErrorResponse)
    )
)]
pub(crate) async fn delete_image(
    Path(id): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<MessageResponse>, ApiError> {
    match state.store.delete_image(&id).await {
        Ok(()) => Ok(Json(MessageResponse {
            message: "Image deleted successfully".to_string(),
        })),
        Err(StoreError::NotFound(_)) => Err(api_not_found(NOT_FOUND)),
        Err(err) => Err(api_internal("Error deleting image", &err)),
    }
}
