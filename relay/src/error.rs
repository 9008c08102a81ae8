use thiserror::Error;

/// Transport-level failure talking to a single peer.
#[derive(Debug, Error)]
pub enum PeerError {
    #[error("peer unreachable: {0}")]
    Unreachable(String),
}

/// Dispatch failure for one submission attempt.
///
/// All variants are transient: the attempt can be retried by re-invoking
/// submit with the same unmodified file. The dispatcher never retries
/// internally; retry policy belongs to the operator.
#[derive(Debug, Error)]
pub enum RelayError {
    #[error("no peers available for dispatch")]
    NoPeersAvailable,

    #[error("peer rejected transaction: {0}")]
    PeerRejected(String),

    #[error("dispatch timed out")]
    Timeout,
}
