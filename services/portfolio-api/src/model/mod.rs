//! Portfolio data model module.
//!
//! # Purpose
//! Re-exports the image and project documents, their write payloads, and the
//! schema validation shared by every store backend.
//!
//! # Notes
//! Validation lives with the schema rather than in a backend so the in-memory
//! and MongoDB stores reject exactly the same writes.
mod coerce;
mod image;
mod project;
mod validation;

pub use image::{Image, ImagePayload};
pub use project::{Project, ProjectPayload};
pub use validation::{ValidationError, WriteMode};

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde::de::DeserializeOwned;

/// A document type persisted in its own collection.
///
/// # What it does
/// Ties a stored document to its write payload and names the model and
/// collection used in messages and by the MongoDB backend.
///
/// # Invariants
/// - `create` and `merge` are only called with payloads that passed
///   `validate` for the matching [`WriteMode`].
pub trait Resource: Serialize + DeserializeOwned + Clone + Send + Sync + 'static {
    type Payload: Serialize + DeserializeOwned + Clone + Send + Sync + 'static;

    /// Model name as shown to clients, e.g. `Image`.
    const MODEL: &'static str;
    /// Backing collection name, e.g. `images`.
    const COLLECTION: &'static str;

    fn validate(payload: &Self::Payload, mode: WriteMode) -> Result<(), ValidationError>;
    fn create(payload: Self::Payload, id: String, now: DateTime<Utc>) -> Self;
    fn merge(&mut self, payload: Self::Payload, now: DateTime<Utc>);

    fn id(&self) -> &str;
    fn created_at(&self) -> DateTime<Utc>;
    fn updated_at(&self) -> DateTime<Utc>;
}
