use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("artifact {0} already has an accepted record")]
    Duplicate(String),

    #[error("storage backend error: {0}")]
    Backend(String),

    #[error("serialization error: {0}")]
    Serialization(String),

    #[error("store is corrupted: {0}")]
    Corruption(String),
}
