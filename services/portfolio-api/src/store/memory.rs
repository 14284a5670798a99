//! In-memory implementation of the portfolio store.
//!
//! # Purpose
//! This store implements the `PortfolioStore` trait entirely in memory using `HashMap`s guarded
//! by `tokio::sync::RwLock`. It exists for:
//! - tests, where every test gets an isolated, empty store
//! - local development without a running MongoDB (`MONGO_URI=memory://`)
//!
//! # Durability and consistency
//! - **Not durable**: all documents are lost on process restart.
//! - **Single-process consistency**: writes to one collection are serialized by its write lock,
//!   which gives the same per-document atomicity the MongoDB backend relies on.
//!
//! # Identifiers and ordering
//! Documents are keyed by freshly generated ObjectIds so identifier handling (including the
//! malformed-id failure) matches the durable backend. Each insert also takes a per-collection
//! sequence number; listing orders by `createdAt` descending and breaks ties with that sequence,
//! newest first.
use super::{PortfolioStore, StoreError, StoreResult, parse_object_id};
use crate::model::{Image, ImagePayload, Project, ProjectPayload, Resource, WriteMode};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use mongodb::bson::oid::ObjectId;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

#[derive(Debug)]
struct Entry<R> {
    seq: u64,
    doc: R,
}

/// One collection of documents of type `R`.
#[derive(Debug)]
struct Collection<R> {
    next_seq: u64,
    docs: HashMap<ObjectId, Entry<R>>,
}

impl<R: Resource> Collection<R> {
    fn new() -> Self {
        Self {
            next_seq: 0,
            docs: HashMap::new(),
        }
    }

    fn list(&self) -> Vec<R> {
        let mut entries: Vec<&Entry<R>> = self.docs.values().collect();
        entries.sort_by(|a, b| {
            b.doc
                .created_at()
                .cmp(&a.doc.created_at())
                .then_with(|| b.seq.cmp(&a.seq))
        });
        entries.into_iter().map(|entry| entry.doc.clone()).collect()
    }

    fn get(&self, id: &ObjectId) -> StoreResult<R> {
        self.docs
            .get(id)
            .map(|entry| entry.doc.clone())
            .ok_or_else(|| not_found::<R>(id))
    }

    fn insert(&mut self, payload: R::Payload) -> StoreResult<R> {
        // Validation runs before an id is minted so rejected writes leave no trace.
        R::validate(&payload, WriteMode::Create)?;
        let id = ObjectId::new();
        let doc = R::create(payload, id.to_hex(), Utc::now());
        let seq = self.next_seq;
        self.next_seq += 1;
        self.docs.insert(
            id,
            Entry {
                seq,
                doc: doc.clone(),
            },
        );
        Ok(doc)
    }

    fn update(&mut self, id: &ObjectId, payload: R::Payload) -> StoreResult<R> {
        R::validate(&payload, WriteMode::Update)?;
        let entry = self.docs.get_mut(id).ok_or_else(|| not_found::<R>(id))?;
        let now = later_than(entry.doc.updated_at());
        entry.doc.merge(payload, now);
        Ok(entry.doc.clone())
    }

    fn remove(&mut self, id: &ObjectId) -> StoreResult<()> {
        self.docs
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| not_found::<R>(id))
    }
}

fn not_found<R: Resource>(id: &ObjectId) -> StoreError {
    StoreError::NotFound(format!("{} {}", R::MODEL, id.to_hex()))
}

/// Current time, nudged forward so `updatedAt` strictly increases on every write.
fn later_than(previous: DateTime<Utc>) -> DateTime<Utc> {
    let now = Utc::now();
    if now > previous {
        now
    } else {
        previous + chrono::Duration::microseconds(1)
    }
}

/// In-memory portfolio store.
///
/// Cloning is cheap and clones share the same collections, so a test can keep a handle to seed
/// or inspect documents while the router owns another.
#[derive(Clone)]
pub struct InMemoryStore {
    images: Arc<RwLock<Collection<Image>>>,
    projects: Arc<RwLock<Collection<Project>>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self {
            images: Arc::new(RwLock::new(Collection::new())),
            projects: Arc::new(RwLock::new(Collection::new())),
        }
    }
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PortfolioStore for InMemoryStore {
    async fn list_images(&self) -> StoreResult<Vec<Image>> {
        Ok(self.images.read().await.list())
    }

    async fn get_image(&self, id: &str) -> StoreResult<Image> {
        let id = parse_object_id::<Image>(id)?;
        self.images.read().await.get(&id)
    }

    async fn create_image(&self, payload: ImagePayload) -> StoreResult<Image> {
        self.images.write().await.insert(payload)
    }

    async fn update_image(&self, id: &str, payload: ImagePayload) -> StoreResult<Image> {
        let id = parse_object_id::<Image>(id)?;
        self.images.write().await.update(&id, payload)
    }

    async fn delete_image(&self, id: &str) -> StoreResult<()> {
        let id = parse_object_id::<Image>(id)?;
        self.images.write().await.remove(&id)
    }

    async fn list_projects(&self) -> StoreResult<Vec<Project>> {
        Ok(self.projects.read().await.list())
    }

    async fn get_project(&self, id: &str) -> StoreResult<Project> {
        let id = parse_object_id::<Project>(id)?;
        self.projects.read().await.get(&id)
    }

    async fn create_project(&self, payload: ProjectPayload) -> StoreResult<Project> {
        self.projects.write().await.insert(payload)
    }

    async fn update_project(&self, id: &str, payload: ProjectPayload) -> StoreResult<Project> {
        let id = parse_object_id::<Project>(id)?;
        self.projects.write().await.update(&id, payload)
    }

    async fn delete_project(&self, id: &str) -> StoreResult<()> {
        let id = parse_object_id::<Project>(id)?;
        self.projects.write().await.remove(&id)
    }

    async fn health_check(&self) -> StoreResult<()> {
        Ok(())
    }

    fn is_durable(&self) -> bool {
        false
    }

    fn backend_name(&self) -> &'static str {
        "memory"
    }
}
