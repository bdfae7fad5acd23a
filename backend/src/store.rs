use std::sync::Arc;
use shared::{
    models::{Entry, SubmitRequest},
    roster::{upsert, Upsert},
    validation::{validate_submission, ChoicePolicy, ValidationError},
};
use time::OffsetDateTime;
use tokio::sync::Mutex;
use tracing::{debug, error, info};
use crate::storage::{Backend, BackendError, BackendKind};

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Invalid entry: {0}")]
    Invalid(#[from] ValidationError),
    #[error("Backend error: {0}")]
    Backend(#[from] BackendError),
}

/// Owns the roster and writes every change through to the backend.
///
/// The lock is held across the backend call, so submits and resets run one
/// at a time and a failed write leaves the roster as it was.
pub struct RosterStore {
    roster: Mutex<Vec<Entry>>,
    backend: Arc<dyn Backend>,
    policy: ChoicePolicy,
}

impl RosterStore {
    /// Loads the persisted roster. A backend that cannot be read is logged
    /// and the store starts empty.
    pub async fn open(backend: Arc<dyn Backend>, policy: ChoicePolicy) -> Self {
        let roster = match backend.load().await {
            Ok(roster) => {
                info!(backend = %backend.kind(), entries = roster.len(), "Roster loaded");
                roster
            }
            Err(e) => {
                error!(backend = %backend.kind(), error = %e, "Failed to load roster, starting empty");
                Vec::new()
            }
        };

        Self {
            roster: Mutex::new(roster),
            backend,
            policy,
        }
    }

    pub fn policy(&self) -> ChoicePolicy {
        self.policy
    }

    pub fn backend_kind(&self) -> BackendKind {
        self.backend.kind()
    }

    pub async fn submit(&self, request: SubmitRequest) -> Result<Vec<Entry>, StoreError> {
        let mut entry = validate_submission(request, self.policy)?;
        if self.backend.stamps_entries() {
            entry = entry.stamped(OffsetDateTime::now_utc());
        }

        let mut roster = self.roster.lock().await;
        let mut next = roster.clone();
        let outcome = upsert(&mut next, entry);
        let changed = &next[outcome.position()];

        if let Err(e) = self.backend.save(&next, changed).await {
            error!(name = %changed.name, error = %e, "Failed to persist entry");
            return Err(e.into());
        }

        match outcome {
            Upsert::Inserted(i) => debug!(name = %next[i].name, size = next.len(), "Entry added"),
            Upsert::Replaced(i) => debug!(name = %next[i].name, size = next.len(), "Entry replaced"),
        }

        *roster = next;

        if self.backend.reads_through() {
            let fresh = self.backend.load().await.map_err(|e| {
                error!(backend = %self.backend.kind(), error = %e, "Failed to re-read roster after save");
                StoreError::from(e)
            })?;
            *roster = fresh;
        }

        Ok(roster.clone())
    }

    pub async fn list(&self) -> Result<Vec<Entry>, StoreError> {
        if self.backend.reads_through() {
            return self.backend.load().await.map_err(|e| {
                error!(backend = %self.backend.kind(), error = %e, "Failed to fetch roster");
                e.into()
            });
        }
        Ok(self.roster.lock().await.clone())
    }

    pub async fn reset(&self) -> Result<(), StoreError> {
        let mut roster = self.roster.lock().await;
        if let Err(e) = self.backend.clear().await {
            error!(error = %e, "Failed to clear roster");
            return Err(e.into());
        }
        info!(removed = roster.len(), "Roster reset");
        roster.clear();
        Ok(())
    }
}
