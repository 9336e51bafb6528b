use std::path::PathBuf;

/// Errors produced by the record store.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: u32 },

    #[error("no {entity} ids left to assign")]
    IdsExhausted { entity: &'static str },

    #[error("invalid input: {0}")]
    Validation(String),

    #[error("data file {} is corrupt: {reason}", .path.display())]
    DataCorruption { path: PathBuf, reason: String },

    #[error("failed to access {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type StoreResult<T> = Result<T, StoreError>;
