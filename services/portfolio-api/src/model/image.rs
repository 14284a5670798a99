//! Image document and write payload.
//!
//! # Purpose
//! Defines a single artwork image as stored and returned by the API, and the
//! payload accepted by create/update requests.
use super::validation::RequiredFields;
use super::{Resource, ValidationError, WriteMode, coerce};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Serialize, Deserialize, ToSchema, Clone, PartialEq)]
pub struct Image {
    #[serde(rename = "_id")]
    pub id: String,
    pub title: String,
    pub artist: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub medium: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dimensions: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    pub image_url: String,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "updatedAt")]
    pub updated_at: DateTime<Utc>,
}

/// Fields accepted by `POST /api/images` and `PUT /api/images/:id`.
///
/// Each field is tri-state: `None` when absent from the body, `Some(None)` for
/// an explicit `null`, `Some(Some(v))` for a value. [`WriteMode`] decides which
/// ones must be present. Absent fields are skipped when serialized and nulls
/// serialize as `null`, so the payload doubles as a `$set`/`$unset` patch.
#[derive(Debug, Default, Serialize, Deserialize, ToSchema, Clone, PartialEq)]
pub struct ImagePayload {
    #[serde(
        default,
        deserialize_with = "coerce::optional_string",
        skip_serializing_if = "Option::is_none"
    )]
    #[schema(value_type = Option<String>)]
    pub title: Option<Option<String>>,
    #[serde(
        default,
        deserialize_with = "coerce::optional_string",
        skip_serializing_if = "Option::is_none"
    )]
    #[schema(value_type = Option<String>)]
    pub artist: Option<Option<String>>,
    #[serde(
        default,
        deserialize_with = "coerce::optional_integer",
        skip_serializing_if = "Option::is_none"
    )]
    #[schema(value_type = Option<i64>)]
    pub year: Option<Option<i64>>,
    #[serde(
        default,
        deserialize_with = "coerce::optional_string",
        skip_serializing_if = "Option::is_none"
    )]
    #[schema(value_type = Option<String>)]
    pub medium: Option<Option<String>>,
    #[serde(
        default,
        deserialize_with = "coerce::optional_string",
        skip_serializing_if = "Option::is_none"
    )]
    #[schema(value_type = Option<String>)]
    pub dimensions: Option<Option<String>>,
    #[serde(
        default,
        deserialize_with = "coerce::optional_string",
        skip_serializing_if = "Option::is_none"
    )]
    #[schema(value_type = Option<String>)]
    pub category: Option<Option<String>>,
    #[serde(
        default,
        deserialize_with = "coerce::optional_string",
        skip_serializing_if = "Option::is_none"
    )]
    #[schema(value_type = Option<String>)]
    pub description: Option<Option<String>>,
    #[serde(
        default,
        deserialize_with = "coerce::optional_string_list",
        skip_serializing_if = "Option::is_none"
    )]
    #[schema(value_type = Option<Vec<String>>)]
    pub tags: Option<Option<Vec<String>>>,
    #[serde(
        default,
        deserialize_with = "coerce::optional_string",
        skip_serializing_if = "Option::is_none"
    )]
    #[schema(value_type = Option<String>)]
    pub image_url: Option<Option<String>>,
}

impl Resource for Image {
    type Payload = ImagePayload;

    const MODEL: &'static str = "Image";
    const COLLECTION: &'static str = "images";

    fn validate(payload: &ImagePayload, mode: WriteMode) -> Result<(), ValidationError> {
        RequiredFields::new(Self::MODEL, mode)
            .check("title", &payload.title)
            .check("artist", &payload.artist)
            .check("image_url", &payload.image_url)
            .finish()
    }

    fn create(payload: ImagePayload, id: String, now: DateTime<Utc>) -> Self {
        Self {
            id,
            title: payload.title.flatten().unwrap_or_default(),
            artist: payload.artist.flatten().unwrap_or_default(),
            year: payload.year.flatten(),
            medium: payload.medium.flatten(),
            dimensions: payload.dimensions.flatten(),
            category: payload.category.flatten(),
            description: payload.description.flatten(),
            tags: payload.tags.flatten().unwrap_or_default(),
            image_url: payload.image_url.flatten().unwrap_or_default(),
            created_at: now,
            updated_at: now,
        }
    }

    fn merge(&mut self, payload: ImagePayload, now: DateTime<Utc>) {
        // Required fields were validated non-null before reaching here.
        if let Some(title) = payload.title.flatten() {
            self.title = title;
        }
        if let Some(artist) = payload.artist.flatten() {
            self.artist = artist;
        }
        if let Some(image_url) = payload.image_url.flatten() {
            self.image_url = image_url;
        }
        if let Some(year) = payload.year {
            self.year = year;
        }
        if let Some(medium) = payload.medium {
            self.medium = medium;
        }
        if let Some(dimensions) = payload.dimensions {
            self.dimensions = dimensions;
        }
        if let Some(category) = payload.category {
            self.category = category;
        }
        if let Some(description) = payload.description {
            self.description = description;
        }
        if let Some(tags) = payload.tags {
            self.tags = tags.unwrap_or_default();
        }
        self.updated_at = now;
    }

    fn id(&self) -> &str {
        &self.id
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }
}
