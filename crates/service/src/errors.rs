use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("io error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed content: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("expected a JSON array of questions, got {0}")]
    NotACollection(&'static str),
    #[error("database error: {0}")]
    Db(#[from] sea_orm::DbErr),
    #[error("model error: {0}")]
    Model(#[from] models::errors::ModelError),
}

impl StoreError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io { path: path.into(), source }
    }

    /// Storage that was never written; expected on first run.
    pub fn is_missing(&self) -> bool {
        matches!(self, Self::Io { source, .. } if source.kind() == std::io::ErrorKind::NotFound)
    }
}
