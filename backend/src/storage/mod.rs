//! Persistence backends for the roster.
//!
//! Every backend stores the same thing, an ordered list of [`Entry`] values,
//! and the store picks one at startup from [`Config`]. Only the postgres
//! backend is authoritative on reads; the other two are written through and
//! trusted from the in-memory copy.

pub mod file;
pub mod memory;
pub mod postgres;

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use shared::models::Entry;
use thiserror::Error;
use tracing::{error, info};
use crate::config::Config;

pub use file::FileBackend;
pub use memory::MemoryBackend;
pub use postgres::PostgresBackend;

#[derive(Debug, Error)]
pub enum BackendError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
    #[error("Backend not configured: {0}")]
    NotConfigured(String),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum BackendKind {
    #[default]
    Memory,
    File,
    Postgres,
}

impl BackendKind {
    pub fn as_str(self) -> &'static str {
        match self {
            BackendKind::Memory => "memory",
            BackendKind::File => "file",
            BackendKind::Postgres => "postgres",
        }
    }
}

impl fmt::Display for BackendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BackendKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "memory" | "mem" => Ok(BackendKind::Memory),
            "file" | "json" => Ok(BackendKind::File),
            "postgres" | "postgresql" | "database" | "db" => Ok(BackendKind::Postgres),
            other => Err(format!("unknown storage backend '{other}'")),
        }
    }
}

#[rocket::async_trait]
pub trait Backend: Send + Sync {
    fn kind(&self) -> BackendKind;

    async fn load(&self) -> Result<Vec<Entry>, BackendError>;

    /// Persists the roster after `changed` was upserted into it.
    async fn save(&self, roster: &[Entry], changed: &Entry) -> Result<(), BackendError>;

    async fn clear(&self) -> Result<(), BackendError>;

    /// Whether listing must go back to the backend instead of the cached roster.
    fn reads_through(&self) -> bool {
        false
    }

    /// Whether entries carry a last-update timestamp.
    fn stamps_entries(&self) -> bool {
        false
    }
}

pub async fn open(config: &Config) -> Arc<dyn Backend> {
    info!(backend = %config.storage, "Opening roster storage");
    match config.storage {
        BackendKind::Memory => Arc::new(MemoryBackend),
        BackendKind::File => Arc::new(FileBackend::new(&config.data_file)),
        BackendKind::Postgres => match config.database_url.as_deref() {
            Some(url) => Arc::new(PostgresBackend::connect(url).await),
            None => {
                error!("DATABASE_URL is not set; roster storage is unavailable until it is configured");
                Arc::new(PostgresBackend::unconfigured())
            }
        },
    }
}
