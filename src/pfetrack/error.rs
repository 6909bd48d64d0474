use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    /// The raw value at a key is present but is not valid JSON for the
    /// expected collection shape. Never auto-repaired; reads keep failing
    /// until the key is cleared or re-imported.
    #[error("corrupt data at key '{key}': {source}")]
    Corrupt {
        key: &'static str,
        source: serde_json::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The backing store refused the write (quota, disabled, simulated).
    #[error("storage unavailable: {0}")]
    Unavailable(String),

    /// A mutation violated a model invariant and was rejected.
    #[error("invalid operation: {0}")]
    Invalid(String),
}

pub type Result<T> = std::result::Result<T, StoreError>;
