use shared::models::Entry;
use super::{Backend, BackendError, BackendKind};

/// Keeps nothing beyond the store's own copy; a restart starts empty.
#[derive(Debug, Default, Clone, Copy)]
pub struct MemoryBackend;

#[rocket::async_trait]
impl Backend for MemoryBackend {
    fn kind(&self) -> BackendKind {
        BackendKind::Memory
    }

    async fn load(&self) -> Result<Vec<Entry>, BackendError> {
        Ok(Vec::new())
    }

    async fn save(&self, _roster: &[Entry], _changed: &Entry) -> Result<(), BackendError> {
        Ok(())
    }

    async fn clear(&self) -> Result<(), BackendError> {
        Ok(())
    }
}
