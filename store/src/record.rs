//! Submission record model.

use serde::{Deserialize, Serialize};
use wisp_types::{ArtifactId, Timestamp};

/// Outcome of one submission attempt.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SubmissionOutcome {
    /// Attempt claimed, dispatch not yet acknowledged. A process dying
    /// mid-dispatch leaves this behind; a later resubmit retries.
    Pending,
    /// A peer explicitly acknowledged the transaction.
    Accepted,
    /// Dispatch failed; safe to retry with the same unmodified file.
    Rejected(String),
    /// The artifact was already accepted earlier; this attempt was a no-op.
    Duplicate,
}

impl SubmissionOutcome {
    pub fn is_accepted(&self) -> bool {
        matches!(self, Self::Accepted)
    }
}

/// One bookkeeping entry tying an artifact id to an attempt outcome.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionRecord {
    pub artifact_id: ArtifactId,
    pub attempted_at: Timestamp,
    pub outcome: SubmissionOutcome,
}
