//! Art portfolio service library crate.
//!
//! # Purpose
//! Exposes the HTTP API, configuration, data model and storage backends for
//! use by the binary and tests.
pub mod api;
pub mod app;
pub mod config;
pub mod model;
pub mod observability;
pub mod store;
