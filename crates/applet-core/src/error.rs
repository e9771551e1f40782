use thiserror::Error;

#[derive(Debug, Error)]
pub enum FeedError {
    #[error("not initialized: run 'applets init'")]
    NotInitialized,

    #[error("applet not found: {0}")]
    AppletNotFound(u64),

    #[error("service not found: {0}")]
    ServiceNotFound(u64),

    #[error("invalid slug '{0}': must be lowercase alphanumeric with underscores")]
    InvalidSlug(String),

    #[error("invalid catalog: {0}")]
    InvalidCatalog(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, FeedError>;
