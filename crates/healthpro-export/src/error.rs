use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("no report definition for assessment type: {assessment_id}")]
    ConfigMissing { assessment_id: String },

    #[error("no assessment data for session: {session_id}")]
    DataMissing { session_id: String },

    #[error("assessment record has no session_id")]
    MissingSessionId,

    #[error("template rendering failed: {0}")]
    TemplateRender(String),

    #[error("template parse error: {0}")]
    TemplateParse(String),

    #[error("PDF rendering failed: {0}")]
    RenderFailure(String),

    #[error("PDF rendering timed out after {seconds}s")]
    RenderTimeout { seconds: u64 },

    #[error("artifact storage error: {0}")]
    Storage(#[from] healthpro_storage::error::StorageError),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl From<tera::Error> for ExportError {
    fn from(e: tera::Error) -> Self {
        ExportError::TemplateRender(e.to_string())
    }
}
