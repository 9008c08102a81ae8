use thiserror::Error;

/// Reasons a loaded artifact is refused before dispatch.
///
/// All variants are fatal to the attempt and never bypassed: a transaction
/// failing the signature or balance checks must never reach the relay
/// dispatcher.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("bad structure: {0}")]
    BadStructure(String),

    #[error("kernel {index} signature does not verify against its excess")]
    BadSignature { index: usize },

    #[error("kernel excess does not balance the transaction commitments")]
    BalanceMismatch,

    #[error("height policy violation: {0}")]
    HeightPolicyViolation(String),
}
