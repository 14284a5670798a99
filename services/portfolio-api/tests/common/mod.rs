#![allow(dead_code)]

use async_trait::async_trait;
use axum::body::Body;
use axum::http::Request;
use portfolio_api::app::{AppState, build_router};
use portfolio_api::model::{Image, ImagePayload, Project, ProjectPayload};
use portfolio_api::store::memory::InMemoryStore;
use portfolio_api::store::{PortfolioStore, StoreError, StoreResult};
use std::sync::Arc;

pub type App = axum::routing::RouterIntoService<Body, ()>;

/// Router over a fresh, empty in-memory store.
pub fn app() -> App {
    app_with_store(Arc::new(InMemoryStore::new()))
}

pub fn app_with_store(store: Arc<dyn PortfolioStore + Send + Sync>) -> App {
    build_router(AppState { store }).into_service()
}

pub const STORE_DOWN: &str = "server selection timeout: no available servers";

/// Store whose every operation fails as an unreachable database would.
pub struct UnavailableStore;

fn unavailable<T>() -> StoreResult<T> {
    Err(StoreError::Unexpected(anyhow::anyhow!(STORE_DOWN)))
}

#[async_trait]
impl PortfolioStore for UnavailableStore {
    async fn list_images(&self) -> StoreResult<Vec<Image>> {
        unavailable()
    }

    async fn get_image(&self, _id: &str) -> StoreResult<Image> {
        unavailable()
    }

    async fn create_image(&self, _payload: ImagePayload) -> StoreResult<Image> {
        unavailable()
    }

    async fn update_image(&self, _id: &str, _payload: ImagePayload) -> StoreResult<Image> {
        unavailable()
    }

    async fn delete_image(&self, _id: &str) -> StoreResult<()> {
        unavailable()
    }

    async fn list_projects(&self) -> StoreResult<Vec<Project>> {
        unavailable()
    }

    async fn get_project(&self, _id: &str) -> StoreResult<Project> {
        unavailable()
    }

    async fn create_project(&self, _payload: ProjectPayload) -> StoreResult<Project> {
        unavailable()
    }

    async fn update_project(&self, _id: &str, _payload: ProjectPayload) -> StoreResult<Project> {
        unavailable()
    }

    async fn delete_project(&self, _id: &str) -> StoreResult<()> {
        unavailable()
    }

    async fn health_check(&self) -> StoreResult<()> {
        unavailable()
    }

    fn is_durable(&self) -> bool {
        true
    }

    fn backend_name(&self) -> &'static str {
        "unavailable"
    }
}

pub fn empty_request(method: &str, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .expect("request")
}

pub async fn read_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body");
    serde_json::from_slice(&bytes).expect("json")
}

pub async fn read_text(response: axum::response::Response) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body");
    String::from_utf8(bytes.to_vec()).expect("utf8")
}

pub fn timestamp(value: &serde_json::Value, field: &str) -> chrono::DateTime<chrono::Utc> {
    let text = value[field].as_str().expect("timestamp string");
    chrono::DateTime::parse_from_rfc3339(text)
        .expect("rfc3339")
        .with_timezone(&chrono::Utc)
}
