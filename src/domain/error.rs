use thiserror::Error;

#[derive(Error, Debug)]
pub enum DirectoryError {
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    /// Transport failure reported by a non-reqwest source.
    #[error("transport error: {0}")]
    Transport(String),

    #[error("invalid data format: {0}")]
    InvalidFormat(String),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("no venue matches {0:?}")]
    NotFound(String),
}

impl DirectoryError {
    /// Transport and HTTP-status failures are worth retrying; a payload with
    /// the wrong shape will have the wrong shape next time too.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            DirectoryError::Http(_) | DirectoryError::Transport(_)
        )
    }
}
