//! Read-only chain-state oracle.

use thiserror::Error;

/// The chain-height oracle could not answer.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("chain state unavailable: {0}")]
pub struct ChainViewError(pub String);

/// Read-only view of the hosting node's chain state.
///
/// Injected into the validator explicitly so tests can substitute a fixed
/// height; nothing in this workspace reaches for ambient node state.
pub trait ChainView: Send + Sync {
    /// Current best-chain tip height.
    fn chain_height(&self) -> Result<u64, ChainViewError>;
}

/// A chain view pinned to a fixed height.
#[derive(Clone, Copy, Debug)]
pub struct FixedChainView(pub u64);

impl ChainView for FixedChainView {
    fn chain_height(&self) -> Result<u64, ChainViewError> {
        Ok(self.0)
    }
}

/// A chain view with no chain behind it.
///
/// Used when the submitting process has no tip information; height-locked
/// kernels cannot be policy-checked against it and fail validation instead
/// of silently passing.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullChainView;

impl ChainView for NullChainView {
    fn chain_height(&self) -> Result<u64, ChainViewError> {
        Err(ChainViewError("no chain tip available".into()))
    }
}
