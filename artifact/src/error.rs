use thiserror::Error;

/// Errors decoding a transaction artifact from bytes.
///
/// All of these are fatal to the submission attempt and never retried
/// automatically: the operator must obtain a corrected file from the
/// offline side.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DecodeError {
    #[error("input is truncated")]
    Truncated,

    #[error("unsupported artifact version {found} (this build supports {supported})")]
    VersionMismatch { found: u16, supported: u16 },

    #[error("malformed artifact: {0}")]
    Malformed(String),
}
