use store::StoreError;

/// Everything here is a value returned to the caller; no engine error is
/// fatal to the process.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("unknown action kind: {0}")]
    UnknownActionKind(String),
    #[error("malformed stats: {field} is negative ({value})")]
    MalformedStats { field: &'static str, value: i64 },
    #[error("user {0} not found")]
    UserNotFound(i64),
    #[error("store error: {0}")]
    Store(#[from] StoreError),
}

pub type Result<T> = std::result::Result<T, EngineError>;
