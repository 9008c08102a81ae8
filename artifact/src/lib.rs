//! Portable transaction artifact: the file carried from the air-gapped
//! signing machine to the online submitting machine.
//!
//! An artifact wraps one finalized, fully-signed transaction together with
//! its immutable identifier, the network it was finalized against, and an
//! optional slate trailer left over from the negotiation phase. Once the
//! offline finalize step has written an artifact, the signed body is never
//! mutated again; resubmission re-reads the file, it never edits it.

pub mod codec;
pub mod error;
pub mod slate;
pub mod transaction;

pub use codec::{decode, encode, CODEC_VERSION};
pub use error::DecodeError;
pub use slate::SlateTrailer;
pub use transaction::{Input, KernelFeatures, Output, Transaction, TxKernel};

use serde::{Deserialize, Serialize};
use wisp_types::{ArtifactId, NetworkId};

/// A finalized, fully-signed transaction ready for broadcast.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionArtifact {
    /// Unique identifier, assigned at finalize time and immutable.
    pub id: ArtifactId,
    /// Network the transaction was finalized against.
    pub network: NetworkId,
    /// The signed transaction body.
    pub tx: Transaction,
    /// Negotiation leftovers from the finalize phase. Carried opaquely;
    /// validation and relay ignore it.
    pub slate: Option<SlateTrailer>,
}
