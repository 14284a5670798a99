//! MongoDB-backed implementation of the portfolio store.
//!
//! # What this module is
//! The durable backend: each resource type lives in its own collection (`images`, `projects`)
//! of the database named by the connection string.
//!
//! # Document layout
//! Stored documents use native BSON types: `_id` is an `ObjectId` and `createdAt`/`updatedAt` are
//! BSON dates. The API-facing structs (`Image`, `Project`) carry the id as a hex string and the
//! timestamps as `chrono` values, so every read and write goes through [`encode_document`] and
//! [`decode_document`]. Unknown fields in stored documents are ignored on read.
//!
//! # Consistency
//! - Every operation is a single-document command; updates use `findOneAndUpdate` with `$set`
//!   so a partial update never overwrites fields it does not mention. Fields sent as `null` go
//!   to `$unset`.
//! - Payloads are validated before any command is sent.
//! - Timestamps are truncated to milliseconds, the resolution of a BSON date, so the document
//!   returned by a write equals what a later read returns.
//!
//! # Operational notes
//! - `Client::with_uri_str` does not contact the server; an unreachable server surfaces on the
//!   first command after the driver's server selection timeout.
//! - Connection strings may contain credentials; never log them.
use super::{PortfolioStore, StoreError, StoreResult, parse_object_id};
use crate::config::MongoConfig;
use crate::model::{Image, ImagePayload, Project, ProjectPayload, Resource, WriteMode};
use anyhow::{Context, anyhow};
use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, Utc};
use futures::TryStreamExt;
use mongodb::bson::oid::ObjectId;
use mongodb::bson::{self, Bson, Document, doc};
use mongodb::options::ReturnDocument;
use mongodb::{Client, Collection, Database};

const TIMESTAMP_FIELDS: [&str; 2] = ["createdAt", "updatedAt"];

/// Durable portfolio store backed by MongoDB.
///
/// # Example
/// ```rust,no_run
/// use portfolio_api::config::MongoConfig;
/// use portfolio_api::store::mongo::MongoStore;
///
/// async fn open(config: MongoConfig) {
///     let _ = MongoStore::connect(&config).await;
/// }
/// ```
#[derive(Clone)]
pub struct MongoStore {
    database: Database,
}

impl MongoStore {
    /// Build a client for `config.uri` and select its database.
    ///
    /// # Errors
    /// - The connection string cannot be parsed or resolved.
    pub async fn connect(config: &MongoConfig) -> StoreResult<Self> {
        let client = Client::with_uri_str(&config.uri).await?;
        let database = client
            .default_database()
            .unwrap_or_else(|| client.database(&config.default_database));
        Ok(Self { database })
    }

    pub fn database_name(&self) -> &str {
        self.database.name()
    }

    fn collection<R: Resource>(&self) -> Collection<Document> {
        self.database.collection::<Document>(R::COLLECTION)
    }

    async fn list<R: Resource>(&self) -> StoreResult<Vec<R>> {
        let cursor = self
            .collection::<R>()
            .find(doc! {})
            .sort(doc! { "createdAt": -1, "_id": -1 })
            .await?;
        let documents: Vec<Document> = cursor.try_collect().await?;
        documents.into_iter().map(decode_document::<R>).collect()
    }

    async fn get<R: Resource>(&self, id: &str) -> StoreResult<R> {
        let oid = parse_object_id::<R>(id)?;
        match self.collection::<R>().find_one(doc! { "_id": oid }).await? {
            Some(document) => decode_document(document),
            None => Err(not_found::<R>(&oid)),
        }
    }

    async fn create<R: Resource>(&self, payload: R::Payload) -> StoreResult<R> {
        R::validate(&payload, WriteMode::Create)?;
        let oid = ObjectId::new();
        let created = R::create(payload, oid.to_hex(), now_millis());
        let document = encode_document(&created, oid)?;
        self.collection::<R>().insert_one(document).await?;
        Ok(created)
    }

    async fn update<R: Resource>(&self, id: &str, payload: R::Payload) -> StoreResult<R> {
        let oid = parse_object_id::<R>(id)?;
        R::validate(&payload, WriteMode::Update)?;
        let patch = bson::to_document(&payload)
            .with_context(|| format!("encode {} update", R::MODEL))?;
        let update = update_document(patch, now_millis());
        let updated = self
            .collection::<R>()
            .find_one_and_update(doc! { "_id": oid }, update)
            .return_document(ReturnDocument::After)
            .await?;
        match updated {
            Some(document) => decode_document(document),
            None => Err(not_found::<R>(&oid)),
        }
    }

    async fn delete<R: Resource>(&self, id: &str) -> StoreResult<()> {
        let oid = parse_object_id::<R>(id)?;
        let result = self
            .collection::<R>()
            .delete_one(doc! { "_id": oid })
            .await?;
        if result.deleted_count == 0 {
            return Err(not_found::<R>(&oid));
        }
        Ok(())
    }
}

#[async_trait]
impl PortfolioStore for MongoStore {
    async fn list_images(&self) -> StoreResult<Vec<Image>> {
        self.list().await
    }

    async fn get_image(&self, id: &str) -> StoreResult<Image> {
        self.get(id).await
    }

    async fn create_image(&self, payload: ImagePayload) -> StoreResult<Image> {
        self.create::<Image>(payload).await
    }

    async fn update_image(&self, id: &str, payload: ImagePayload) -> StoreResult<Image> {
        self.update::<Image>(id, payload).await
    }

    async fn delete_image(&self, id: &str) -> StoreResult<()> {
        self.delete::<Image>(id).await
    }

    async fn list_projects(&self) -> StoreResult<Vec<Project>> {
        self.list().await
    }

    async fn get_project(&self, id: &str) -> StoreResult<Project> {
        self.get(id).await
    }

    async fn create_project(&self, payload: ProjectPayload) -> StoreResult<Project> {
        self.create::<Project>(payload).await
    }

    async fn update_project(&self, id: &str, payload: ProjectPayload) -> StoreResult<Project> {
        self.update::<Project>(id, payload).await
    }

    async fn delete_project(&self, id: &str) -> StoreResult<()> {
        self.delete::<Project>(id).await
    }

    async fn health_check(&self) -> StoreResult<()> {
        self.database.run_command(doc! { "ping": 1 }).await?;
        Ok(())
    }

    fn is_durable(&self) -> bool {
        true
    }

    fn backend_name(&self) -> &'static str {
        "mongodb"
    }
}

fn not_found<R: Resource>(oid: &ObjectId) -> StoreError {
    StoreError::NotFound(format!("{} {}", R::MODEL, oid.to_hex()))
}

fn now_millis() -> DateTime<Utc> {
    let now = Utc::now();
    DateTime::from_timestamp_millis(now.timestamp_millis()).unwrap_or(now)
}

/// Split an encoded payload into `$set` for values and `$unset` for nulls.
pub(crate) fn update_document(patch: Document, now: DateTime<Utc>) -> Document {
    let mut set = Document::new();
    let mut unset = Document::new();
    for (field, value) in patch {
        match value {
            Bson::Null => {
                unset.insert(field, "");
            }
            value => {
                set.insert(field, value);
            }
        }
    }
    set.insert("updatedAt", bson::DateTime::from_millis(now.timestamp_millis()));
    let mut update = doc! { "$set": set };
    if !unset.is_empty() {
        update.insert("$unset", unset);
    }
    update
}

/// Convert an API document into its stored BSON form.
pub(crate) fn encode_document<R: Resource>(resource: &R, oid: ObjectId) -> StoreResult<Document> {
    let mut document = bson::to_document(resource)
        .with_context(|| format!("encode {} document", R::MODEL))?;
    document.insert("_id", oid);
    document.insert(
        "createdAt",
        bson::DateTime::from_millis(resource.created_at().timestamp_millis()),
    );
    document.insert(
        "updatedAt",
        bson::DateTime::from_millis(resource.updated_at().timestamp_millis()),
    );
    Ok(document)
}

/// Convert a stored BSON document into its API form.
///
/// Whole-number doubles are narrowed to integers because documents written by other clients
/// may store `year` as a double.
pub(crate) fn decode_document<R: Resource>(mut document: Document) -> StoreResult<R> {
    let oid = document
        .get_object_id("_id")
        .map_err(|_| anyhow!("{} document without an ObjectId _id", R::MODEL))?;
    document.insert("_id", oid.to_hex());
    for field in TIMESTAMP_FIELDS {
        if let Some(Bson::DateTime(value)) = document.get(field).cloned() {
            let at = DateTime::<Utc>::from_timestamp_millis(value.timestamp_millis())
                .ok_or_else(|| anyhow!("{field} out of range in {} document", R::MODEL))?;
            document.insert(field, at.to_rfc3339_opts(SecondsFormat::Millis, true));
        }
    }
    for (_, value) in document.iter_mut() {
        if let Bson::Double(number) = *value {
            if number.fract() == 0.0 && number.abs() < i64::MAX as f64 {
                *value = Bson::Int64(number as i64);
            }
        }
    }
    let decoded = bson::from_document(document)
        .with_context(|| format!("decode {} document", R::MODEL))?;
    Ok(decoded)
}
