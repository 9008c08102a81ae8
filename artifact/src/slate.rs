//! Slate negotiation trailer.

use serde::{Deserialize, Serialize};

/// Leftover metadata from the slate-negotiation phase that produced the
/// transaction. Written by the finalize step for audit purposes; the
/// submission pipeline carries it through the codec untouched and otherwise
/// ignores it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlateTrailer {
    /// Slate format version used during negotiation.
    pub slate_version: u16,
    /// Number of parties that participated in building the transaction.
    pub num_participants: u8,
}
