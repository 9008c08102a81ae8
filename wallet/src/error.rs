use std::path::PathBuf;
use thiserror::Error;

/// Anything that can go wrong handling one submit invocation.
///
/// Each category maps to a distinct process exit code so scripts driving
/// the CLI can tell an unusable file from a transient relay failure.
#[derive(Debug, Error)]
pub enum SubmitError {
    #[error("cannot read artifact file {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error(transparent)]
    Decode(#[from] wisp_artifact::DecodeError),

    #[error(transparent)]
    Validation(#[from] wisp_validation::ValidationError),

    #[error(transparent)]
    Relay(#[from] wisp_relay::RelayError),

    #[error(transparent)]
    Store(#[from] wisp_store::StoreError),
}

impl SubmitError {
    /// Process exit code for this error category (0 is success).
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Io { .. } => 1,
            Self::Decode(_) => 2,
            Self::Validation(_) => 3,
            Self::Relay(_) => 4,
            Self::Store(_) => 5,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn exit_codes_are_distinct_and_nonzero() {
        let errors = [
            SubmitError::Io {
                path: "x".into(),
                source: std::io::Error::new(std::io::ErrorKind::NotFound, "missing"),
            },
            SubmitError::Decode(wisp_artifact::DecodeError::Truncated),
            SubmitError::Validation(wisp_validation::ValidationError::BalanceMismatch),
            SubmitError::Relay(wisp_relay::RelayError::NoPeersAvailable),
            SubmitError::Store(wisp_store::StoreError::Backend("io".into())),
        ];
        let codes: HashSet<i32> = errors.iter().map(|e| e.exit_code()).collect();
        assert_eq!(codes.len(), errors.len());
        assert!(!codes.contains(&0));
    }
}
