use std::io::ErrorKind;
use std::path::PathBuf;
use shared::models::Entry;
use tokio::fs;
use tracing::{debug, info};
use super::{Backend, BackendError, BackendKind};

/// Stores the whole roster as one pretty-printed JSON array.
///
/// Every save rewrites the file from scratch, so the cost of a submit grows
/// with the roster. That is fine for the handful of entries this service
/// expects and there is no batching.
#[derive(Debug, Clone)]
pub struct FileBackend {
    path: PathBuf,
}

impl FileBackend {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Sibling file the roster is written to before being renamed over the
    /// real one, so a crash mid-write never leaves a half-written roster.
    fn staging_path(&self) -> PathBuf {
        let mut name = self.path.file_name().unwrap_or_default().to_os_string();
        name.push(".tmp");
        self.path.with_file_name(name)
    }

    async fn write(&self, roster: &[Entry]) -> Result<(), BackendError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).await?;
        }
        let body = serde_json::to_string_pretty(roster)?;
        let staging = self.staging_path();
        fs::write(&staging, body).await?;
        fs::rename(&staging, &self.path).await?;
        debug!(path = %self.path.display(), entries = roster.len(), "Roster file written");
        Ok(())
    }
}

#[rocket::async_trait]
impl Backend for FileBackend {
    fn kind(&self) -> BackendKind {
        BackendKind::File
    }

    async fn load(&self) -> Result<Vec<Entry>, BackendError> {
        let raw = match fs::read_to_string(&self.path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                info!(path = %self.path.display(), "No roster file yet, starting empty");
                return Ok(Vec::new());
            }
            Err(e) => return Err(e.into()),
        };
        Ok(serde_json::from_str(&raw)?)
    }

    async fn save(&self, roster: &[Entry], _changed: &Entry) -> Result<(), BackendError> {
        self.write(roster).await
    }

    async fn clear(&self) -> Result<(), BackendError> {
        self.write(&[]).await
    }
}
