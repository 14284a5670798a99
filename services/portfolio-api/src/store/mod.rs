//! Document store abstraction for portfolio resources.
//!
//! # Purpose
//! Defines the `PortfolioStore` trait consumed by the HTTP handlers and the
//! error type shared by every backend.
//!
//! # Key invariants
//! - Backends validate payloads with [`Resource::validate`] before writing, so
//!   a document missing a required field is never persisted.
//! - Identifiers are MongoDB ObjectIds; a string that is not one fails with
//!   [`StoreError::InvalidId`], never [`StoreError::NotFound`].
//! - `list_*` returns documents newest first.
use crate::model::{Image, ImagePayload, Project, ProjectPayload, Resource, ValidationError};
use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;
use thiserror::Error;

pub mod memory;
pub mod mongo;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("not found: {0}")]
    NotFound(String),
    #[error(
        "Cast to ObjectId failed for value \"{value}\" (type string) at path \"_id\" for model \"{model}\""
    )]
    InvalidId { model: &'static str, value: String },
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Unexpected(#[from] anyhow::Error),
}

impl From<mongodb::error::Error> for StoreError {
    fn from(err: mongodb::error::Error) -> Self {
        StoreError::Unexpected(err.into())
    }
}

pub type StoreResult<T> = Result<T, StoreError>;

#[async_trait]
pub trait PortfolioStore: Send + Sync {
    async fn list_images(&self) -> StoreResult<Vec<Image>>;
    async fn get_image(&self, id: &str) -> StoreResult<Image>;
    async fn create_image(&self, payload: ImagePayload) -> StoreResult<Image>;
    async fn update_image(&self, id: &str, payload: ImagePayload) -> StoreResult<Image>;
    async fn delete_image(&self, id: &str) -> StoreResult<()>;

    async fn list_projects(&self) -> StoreResult<Vec<Project>>;
    async fn get_project(&self, id: &str) -> StoreResult<Project>;
    async fn create_project(&self, payload: ProjectPayload) -> StoreResult<Project>;
    async fn update_project(&self, id: &str, payload: ProjectPayload) -> StoreResult<Project>;
    async fn delete_project(&self, id: &str) -> StoreResult<()>;

    async fn health_check(&self) -> StoreResult<()>;
    fn is_durable(&self) -> bool;
    fn backend_name(&self) -> &'static str;
}

/// Parse a client-supplied identifier for resource `R`.
pub(crate) fn parse_object_id<R: Resource>(id: &str) -> StoreResult<ObjectId> {
    ObjectId::parse_str(id).map_err(|_| StoreError::InvalidId {
        model: R::MODEL,
        value: id.to_string(),
    })
}
