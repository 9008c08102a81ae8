//! Local transaction store: submission bookkeeping keyed by artifact id.
//!
//! The store is the sole de-duplication guard between an artifact file and
//! the network: once an artifact has an `Accepted` record, resubmitting the
//! same file is a no-op. Double-broadcast is not a double-spend (the kernel
//! is identical) but it wastes peer bandwidth and can trip peers'
//! already-known penalty heuristics.
//!
//! Every backend implements [`SubmissionStore`]. The store is append-only
//! per id for audit purposes; lookups return the latest state. Records are
//! never deleted automatically; retention is the operator's call.

pub mod error;
pub mod file;
pub mod memory;
pub mod record;

pub use error::StoreError;
pub use file::FileStore;
pub use memory::MemoryStore;
pub use record::{SubmissionOutcome, SubmissionRecord};

use wisp_types::ArtifactId;

/// Trait for submission bookkeeping storage.
///
/// Implementations are internally synchronized: all methods take `&self`
/// and record/lookup on the same artifact id are linearizable.
pub trait SubmissionStore: Send + Sync {
    /// Append a record for this artifact id, stamped with the current time.
    ///
    /// Fails with [`StoreError::Duplicate`] when asked to record a second
    /// `Accepted` outcome for the same id; this is the single enforcement
    /// point for the at-most-one-accepted invariant.
    fn record(
        &self,
        id: ArtifactId,
        outcome: SubmissionOutcome,
    ) -> Result<SubmissionRecord, StoreError>;

    /// Latest record for an artifact id, if any attempt was ever made.
    fn lookup(&self, id: &ArtifactId) -> Result<Option<SubmissionRecord>, StoreError>;

    /// True iff an `Accepted` record exists for this id.
    fn is_duplicate(&self, id: &ArtifactId) -> Result<bool, StoreError>;

    /// Full attempt history for an id, oldest first.
    fn history(&self, id: &ArtifactId) -> Result<Vec<SubmissionRecord>, StoreError>;
}
