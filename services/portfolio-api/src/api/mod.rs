//! Portfolio HTTP API module.
//!
//! # Purpose
//! Exposes the route handler modules for images, projects, liveness and the
//! OpenAPI document, plus the shared error and response types.
pub mod error;
pub mod images;
pub mod openapi;
pub mod projects;
pub mod system;
pub mod types;
