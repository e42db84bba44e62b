use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("artifact not found: {file_name}")]
    NotFound { file_name: String },

    #[error("invalid artifact file name: {0}")]
    InvalidFileName(String),

    #[error("failed to create output directory {path}: {source}")]
    CreateDir {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("I/O error on {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid assessment record: {0}")]
    InvalidRecord(#[from] healthpro_core::error::CoreError),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl StorageError {
    pub(crate) fn io(path: &std::path::Path, source: std::io::Error) -> Self {
        StorageError::Io {
            path: path.display().to_string(),
            source,
        }
    }
}
