pub type Result<T, E = AppError> = std::result::Result<T, E>;

#[derive(thiserror::Error, Debug)]
pub enum AppError {
    #[error("configuration error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("store error: {0}")]
    Store(#[source] anyhow::Error),
    #[error("not found: {0}")]
    NotFound(&'static str),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl AppError {
    pub fn store(err: impl Into<anyhow::Error>) -> Self {
        Self::Store(err.into())
    }
}
