use anyhow::{Context, Result};
use std::net::{Ipv4Addr, SocketAddr};

pub const DEFAULT_MONGO_URI: &str = "mongodb://localhost:27017/art-portfolio";
pub const DEFAULT_DATABASE: &str = "art-portfolio";
pub const DEFAULT_PORT: u16 = 5000;
/// `MONGO_URI` scheme that selects the in-memory store.
pub const MEMORY_URI_SCHEME: &str = "memory://";

// Portfolio service configuration sourced from environment variables.
#[derive(Debug, Clone)]
pub struct PortfolioConfig {
    pub bind_addr: SocketAddr,
    pub storage: StorageBackend,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageBackend {
    Memory,
    Mongo(MongoConfig),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MongoConfig {
    pub uri: String,
    /// Used when the connection string names no database.
    pub default_database: String,
}

impl PortfolioConfig {
    pub fn from_env() -> Result<Self> {
        let port = match std::env::var("PORT") {
            Ok(value) => value
                .trim()
                .parse::<u16>()
                .with_context(|| format!("parse PORT: {value}"))?,
            Err(_) => DEFAULT_PORT,
        };
        let uri = std::env::var("MONGO_URI").unwrap_or_else(|_| DEFAULT_MONGO_URI.to_string());
        Ok(Self {
            bind_addr: SocketAddr::from((Ipv4Addr::UNSPECIFIED, port)),
            storage: StorageBackend::from_uri(&uri),
        })
    }
}

impl StorageBackend {
    pub fn from_uri(uri: &str) -> Self {
        if uri.starts_with(MEMORY_URI_SCHEME) {
            return StorageBackend::Memory;
        }
        StorageBackend::Mongo(MongoConfig {
            uri: uri.to_string(),
            default_database: DEFAULT_DATABASE.to_string(),
        })
    }
}
