//! Project document and write payload.
use super::validation::RequiredFields;
use super::{Resource, ValidationError, WriteMode, coerce};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Serialize, Deserialize, ToSchema, Clone, PartialEq)]
pub struct Project {
    #[serde(rename = "_id")]
    pub id: String,
    pub title: String,
    pub title_description: String,
    #[serde(default)]
    pub tags: Vec<String>,
    pub cover_image: String,
    #[serde(default)]
    pub image_urls: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub video_url: Option<String>,
    #[serde(default)]
    pub techniques: Vec<String>,
    #[serde(default)]
    pub software_used: Vec<String>,
    pub description: String,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "updatedAt")]
    pub updated_at: DateTime<Utc>,
}

/// Fields accepted by `POST /api/projects` and `PUT /api/projects/:id`.
///
/// Tri-state like [`super::ImagePayload`]: absent, explicit `null`, or a value.
#[derive(Debug, Default, Serialize, Deserialize, ToSchema, Clone, PartialEq)]
pub struct ProjectPayload {
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
    pub title_description: Option<Option<String>>,
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
    pub cover_image: Option<Option<String>>,
    #[serde(
        default,
        deserialize_with = "coerce::optional_string_list",
        skip_serializing_if = "Option::is_none"
    )]
    #[schema(value_type = Option<Vec<String>>)]
    pub image_urls: Option<Option<Vec<String>>>,
    #[serde(
        default,
        deserialize_with = "coerce::optional_string",
        skip_serializing_if = "Option::is_none"
    )]
    #[schema(value_type = Option<String>)]
    pub video_url: Option<Option<String>>,
    #[serde(
        default,
        deserialize_with = "coerce::optional_string_list",
        skip_serializing_if = "Option::is_none"
    )]
    #[schema(value_type = Option<Vec<String>>)]
    pub techniques: Option<Option<Vec<String>>>,
    #[serde(
        default,
        deserialize_with = "coerce::optional_string_list",
        skip_serializing_if = "Option::is_none"
    )]
    #[schema(value_type = Option<Vec<String>>)]
    pub software_used: Option<Option<Vec<String>>>,
    #[serde(
        default,
        deserialize_with = "coerce::optional_string",
        skip_serializing_if = "Option::is_none"
    )]
    #[schema(value_type = Option<String>)]
    pub description: Option<Option<String>>,
}

impl Resource for Project {
    type Payload = ProjectPayload;

    const MODEL: &'static str = "Project";
    const COLLECTION: &'static str = "projects";

    fn validate(payload: &ProjectPayload, mode: WriteMode) -> Result<(), ValidationError> {
        RequiredFields::new(Self::MODEL, mode)
            .check("title", &payload.title)
            .check("title_description", &payload.title_description)
            .check("cover_image", &payload.cover_image)
            .check("description", &payload.description)
            .finish()
    }

    fn create(payload: ProjectPayload, id: String, now: DateTime<Utc>) -> Self {
        Self {
            id,
            title: payload.title.flatten().unwrap_or_default(),
            title_description: payload.title_description.flatten().unwrap_or_default(),
            tags: payload.tags.flatten().unwrap_or_default(),
            cover_image: payload.cover_image.flatten().unwrap_or_default(),
            image_urls: payload.image_urls.flatten().unwrap_or_default(),
            video_url: payload.video_url.flatten(),
            techniques: payload.techniques.flatten().unwrap_or_default(),
            software_used: payload.software_used.flatten().unwrap_or_default(),
            description: payload.description.flatten().unwrap_or_default(),
            created_at: now,
            updated_at: now,
        }
    }

    fn merge(&mut self, payload: ProjectPayload, now: DateTime<Utc>) {
        if let Some(title) = payload.title.flatten() {
            self.title = title;
        }
        if let Some(title_description) = payload.title_description.flatten() {
            self.title_description = title_description;
        }
        if let Some(cover_image) = payload.cover_image.flatten() {
            self.cover_image = cover_image;
        }
        if let Some(description) = payload.description.flatten() {
            self.description = description;
        }
        if let Some(video_url) = payload.video_url {
            self.video_url = video_url;
        }
        if let Some(tags) = payload.tags {
            self.tags = tags.unwrap_or_default();
        }
        if let Some(image_urls) = payload.image_urls {
            self.image_urls = image_urls.unwrap_or_default();
        }
        if let Some(techniques) = payload.techniques {
            self.techniques = techniques.unwrap_or_default();
        }
        if let Some(software_used) = payload.software_used {
            self.software_used = software_used.unwrap_or_default();
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_requires_four_fields() {
        let err = Project::validate(&ProjectPayload::default(), WriteMode::Create)
            .expect_err("empty payload");
        assert_eq!(
            err.missing,
            vec!["title", "title_description", "cover_image", "description"]
        );
    }

    #[test]
    fn update_rejects_blanked_description() {
        let err = Project::validate(
            &ProjectPayload {
                description: Some(Some(String::new())),
                ..ProjectPayload::default()
            },
            WriteMode::Update,
        )
        .expect_err("blank description");
        assert_eq!(err.missing, vec!["description"]);
    }

    #[test]
    fn list_fields_default_to_empty() {
        let payload: ProjectPayload = serde_json::from_value(serde_json::json!({
            "title": "Mural",
            "title_description": "Street piece",
            "cover_image": "https://example.com/cover.jpg",
            "description": "A wall",
            "software_used": "Procreate"
        }))
        .expect("payload");
        let project = Project::create(payload, "p1".to_string(), Utc::now());
        assert!(project.tags.is_empty());
        assert!(project.image_urls.is_empty());
        assert!(project.techniques.is_empty());
        assert_eq!(project.software_used, vec!["Procreate"]);
        assert_eq!(project.video_url, None);
    }

    #[test]
    fn null_patch_clears_lists_and_video() {
        let mut project = Project::create(
            serde_json::from_value(serde_json::json!({
                "title": "Reel",
                "title_description": "Motion work",
                "cover_image": "https://example.com/reel.jpg",
                "description": "Showreel",
                "video_url": "https://example.com/reel.mp4",
                "techniques": ["Rotoscope"]
            }))
            .expect("payload"),
            "p2".to_string(),
            Utc::now(),
        );
        let patch: ProjectPayload = serde_json::from_value(serde_json::json!({
            "video_url": null,
            "techniques": null
        }))
        .expect("patch");
        Project::validate(&patch, WriteMode::Update).expect("valid");
        project.merge(patch, Utc::now());
        assert_eq!(project.video_url, None);
        assert!(project.techniques.is_empty());
        assert_eq!(project.title, "Reel");

        let patch: ProjectPayload =
            serde_json::from_value(serde_json::json!({"cover_image": null})).expect("patch");
        let err = Project::validate(&patch, WriteMode::Update).expect_err("null cover");
        assert_eq!(err.missing, vec!["cover_image"]);
    }
}

