//! In-memory store backend.
//!
//! Does not survive restart; intended for tests and for ephemeral dev runs
//! where bookkeeping loss is acceptable.

use std::collections::HashMap;
use std::sync::Mutex;

use wisp_types::{ArtifactId, Timestamp};

use crate::{StoreError, SubmissionOutcome, SubmissionRecord, SubmissionStore};

#[derive(Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<ArtifactId, Vec<SubmissionRecord>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SubmissionStore for MemoryStore {
    fn record(
        &self,
        id: ArtifactId,
        outcome: SubmissionOutcome,
    ) -> Result<SubmissionRecord, StoreError> {
        let mut entries = self.entries.lock().expect("store mutex poisoned");
        let history = entries.entry(id).or_default();
        if outcome.is_accepted() && history.iter().any(|r| r.outcome.is_accepted()) {
            return Err(StoreError::Duplicate(id.to_string()));
        }
        let record = SubmissionRecord {
            artifact_id: id,
            attempted_at: Timestamp::now(),
            outcome,
        };
        history.push(record.clone());
        Ok(record)
    }

    fn lookup(&self, id: &ArtifactId) -> Result<Option<SubmissionRecord>, StoreError> {
        let entries = self.entries.lock().expect("store mutex poisoned");
        Ok(entries.get(id).and_then(|h| h.last().cloned()))
    }

    fn is_duplicate(&self, id: &ArtifactId) -> Result<bool, StoreError> {
        let entries = self.entries.lock().expect("store mutex poisoned");
        Ok(entries
            .get(id)
            .is_some_and(|h| h.iter().any(|r| r.outcome.is_accepted())))
    }

    fn history(&self, id: &ArtifactId) -> Result<Vec<SubmissionRecord>, StoreError> {
        let entries = self.entries.lock().expect("store mutex poisoned");
        Ok(entries.get(id).cloned().unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_returns_latest() {
        let store = MemoryStore::new();
        let id = ArtifactId::random();
        store.record(id, SubmissionOutcome::Pending).unwrap();
        store
            .record(id, SubmissionOutcome::Rejected("no peers".into()))
            .unwrap();

        let latest = store.lookup(&id).unwrap().unwrap();
        assert_eq!(latest.outcome, SubmissionOutcome::Rejected("no peers".into()));
        assert_eq!(store.history(&id).unwrap().len(), 2);
    }

    #[test]
    fn unknown_id_has_no_records() {
        let store = MemoryStore::new();
        let id = ArtifactId::random();
        assert!(store.lookup(&id).unwrap().is_none());
        assert!(!store.is_duplicate(&id).unwrap());
        assert!(store.history(&id).unwrap().is_empty());
    }

    #[test]
    fn duplicate_tracks_accepted_only() {
        let store = MemoryStore::new();
        let id = ArtifactId::random();

        store.record(id, SubmissionOutcome::Pending).unwrap();
        store
            .record(id, SubmissionOutcome::Rejected("timeout".into()))
            .unwrap();
        assert!(!store.is_duplicate(&id).unwrap());

        store.record(id, SubmissionOutcome::Accepted).unwrap();
        assert!(store.is_duplicate(&id).unwrap());
    }

    #[test]
    fn second_accepted_is_refused() {
        let store = MemoryStore::new();
        let id = ArtifactId::random();
        store.record(id, SubmissionOutcome::Accepted).unwrap();
        assert!(matches!(
            store.record(id, SubmissionOutcome::Accepted),
            Err(StoreError::Duplicate(_))
        ));
        // The failed record must not have been appended.
        assert_eq!(store.history(&id).unwrap().len(), 1);
    }

    #[test]
    fn duplicate_outcome_can_still_be_recorded() {
        let store = MemoryStore::new();
        let id = ArtifactId::random();
        store.record(id, SubmissionOutcome::Accepted).unwrap();
        store.record(id, SubmissionOutcome::Duplicate).unwrap();
        assert_eq!(store.history(&id).unwrap().len(), 2);
        assert!(store.is_duplicate(&id).unwrap());
    }
}
