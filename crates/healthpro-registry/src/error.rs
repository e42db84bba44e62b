use thiserror::Error;

#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("failed to read report definitions from {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse report definitions ({origin}): {source}")]
    Parse {
        origin: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("duplicate report definition for assessment type '{0}'")]
    Duplicate(String),

    #[error("invalid report definition '{assessment_id}': {message}")]
    Invalid {
        assessment_id: String,
        message: String,
    },
}
