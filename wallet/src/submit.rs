//! The submit pipeline: load, decode, de-duplicate, validate, dispatch,
//! record.
//!
//! All bookkeeping writes and the dispatch itself happen under a
//! per-artifact-id lock, so two concurrent submits of the same file cannot
//! both reach the network. The artifact file is never modified; retrying a
//! failed attempt means running the same command on the same file again.

use std::collections::HashMap;
use std::path::Path;
use std::sync::{Arc, Mutex};

use wisp_artifact::TransactionArtifact;
use wisp_relay::{Dispatcher, RelayMode};
use wisp_store::{StoreError, SubmissionOutcome, SubmissionRecord, SubmissionStore};
use wisp_types::ArtifactId;
use wisp_validation::Validator;

use crate::error::SubmitError;

/// Result of a successful submit invocation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The transaction was dispatched and acknowledged on this attempt.
    Accepted(SubmissionRecord),
    /// The artifact had already been accepted earlier; nothing was sent.
    AlreadyAccepted(SubmissionRecord),
}

impl SubmitOutcome {
    pub fn record(&self) -> &SubmissionRecord {
        match self {
            Self::Accepted(r) | Self::AlreadyAccepted(r) => r,
        }
    }
}

/// Orchestrates one submission attempt end to end.
pub struct Submitter {
    store: Arc<dyn SubmissionStore>,
    validator: Validator,
    dispatcher: Dispatcher,
    // One async mutex per artifact id, created on first contact. The map
    // itself is guarded by a plain mutex held only while cloning the entry.
    locks: Mutex<HashMap<ArtifactId, Arc<tokio::sync::Mutex<()>>>>,
}

impl Submitter {
    pub fn new(
        store: Arc<dyn SubmissionStore>,
        validator: Validator,
        dispatcher: Dispatcher,
    ) -> Self {
        Self {
            store,
            validator,
            dispatcher,
            locks: Mutex::new(HashMap::new()),
        }
    }

    /// Read an artifact file and submit it in the given relay mode.
    pub async fn submit_file(
        &self,
        path: &Path,
        mode: RelayMode,
    ) -> Result<SubmitOutcome, SubmitError> {
        let bytes = std::fs::read(path).map_err(|source| SubmitError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let artifact = wisp_artifact::decode(&bytes)?;
        self.submit(&artifact, &bytes, mode).await
    }

    /// Submit an already-decoded artifact.
    ///
    /// `encoded` must be the serialized form of `artifact`; peers receive
    /// the bytes, not the decoded structure.
    pub async fn submit(
        &self,
        artifact: &TransactionArtifact,
        encoded: &[u8],
        mode: RelayMode,
    ) -> Result<SubmitOutcome, SubmitError> {
        let id = artifact.id;
        let lock = self.lock_for(id);
        let _guard = lock.lock().await;

        if self.store.is_duplicate(&id)? {
            tracing::info!(artifact = %id, "already accepted, skipping dispatch");
            self.store.record(id, SubmissionOutcome::Duplicate)?;
            let accepted = self.accepted_record(&id)?;
            return Ok(SubmitOutcome::AlreadyAccepted(accepted));
        }

        // Claim the attempt before doing anything externally visible. A
        // crash between here and the final record leaves a Pending entry,
        // which a later resubmit of the same file overrides.
        self.store.record(id, SubmissionOutcome::Pending)?;

        if let Err(e) = self.validator.validate(artifact) {
            tracing::warn!(artifact = %id, error = %e, "artifact failed validation");
            self.store.record(id, SubmissionOutcome::Rejected(e.to_string()))?;
            return Err(e.into());
        }

        if let Err(e) = self.dispatcher.dispatch(id, encoded, mode).await {
            tracing::warn!(artifact = %id, error = %e, "dispatch failed");
            self.store.record(id, SubmissionOutcome::Rejected(e.to_string()))?;
            return Err(e.into());
        }

        let record = self.store.record(id, SubmissionOutcome::Accepted)?;
        tracing::info!(artifact = %id, "submission accepted");
        Ok(SubmitOutcome::Accepted(record))
    }

    fn lock_for(&self, id: ArtifactId) -> Arc<tokio::sync::Mutex<()>> {
        let mut locks = match self.locks.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        // Reclaim entries no submission holds anymore (strong count 1 means
        // the map is the only owner), so the map does not grow with every
        // artifact id ever seen.
        locks.retain(|_, lock| Arc::strong_count(lock) > 1);
        Arc::clone(locks.entry(id).or_default())
    }

    #[cfg(test)]
    fn lock_map_len(&self) -> usize {
        match self.locks.lock() {
            Ok(guard) => guard.len(),
            Err(poisoned) => poisoned.into_inner().len(),
        }
    }

    fn accepted_record(&self, id: &ArtifactId) -> Result<SubmissionRecord, SubmitError> {
        let history = self.store.history(id)?;
        history
            .into_iter()
            .find(|r| r.outcome.is_accepted())
            .ok_or_else(|| {
                SubmitError::Store(StoreError::Corruption(format!(
                    "artifact {id} flagged duplicate but has no accepted record"
                )))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use wisp_store::MemoryStore;
    use wisp_types::NetworkId;
    use wisp_validation::{NullChainView, Validator};

    fn submitter() -> Submitter {
        Submitter::new(
            Arc::new(MemoryStore::new()),
            Validator::new(NetworkId::Dev, Arc::new(NullChainView)),
            wisp_relay::Dispatcher::new(vec![], Duration::from_millis(100)),
        )
    }

    #[tokio::test]
    async fn lock_map_reclaims_released_entries() {
        let s = submitter();
        let first = ArtifactId::random();

        let lock = s.lock_for(first);
        {
            let _guard = lock.lock().await;
            assert_eq!(s.lock_map_len(), 1);
            // A held lock must survive another id's arrival.
            s.lock_for(ArtifactId::random());
            assert_eq!(s.lock_map_len(), 2);
        }
        drop(lock);

        // Both earlier entries are idle now; the next call purges them.
        s.lock_for(ArtifactId::random());
        assert_eq!(s.lock_map_len(), 1);
    }

    #[tokio::test]
    async fn same_id_shares_one_lock_while_held() {
        let s = submitter();
        let id = ArtifactId::random();
        let a = s.lock_for(id);
        let b = s.lock_for(id);
        assert!(Arc::ptr_eq(&a, &b));
    }
}
