use tracing::{info, warn};

use healthpro_core::models::artifact::ReportArtifact;
use healthpro_registry::Registry;
use healthpro_storage::records::RecordRepository;

use crate::error::ExportError;
use crate::pipeline::ReportPipeline;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedReport {
    pub artifact: ReportArtifact,
    pub assessment_id: String,
}

/// Resolve a session to its record and definition, then generate (or reuse)
/// its report.
///
/// Fails with `DataMissing` when the session has no record and with
/// `ConfigMissing` when the record's assessment type has no definition. In
/// both cases the renderer is never invoked and nothing is written.
pub async fn generate_for_session(
    records: &dyn RecordRepository,
    registry: &Registry,
    pipeline: &ReportPipeline,
    session_id: &str,
) -> Result<GeneratedReport, ExportError> {
    let record = records
        .get(session_id)
        .await?
        .ok_or_else(|| ExportError::DataMissing {
            session_id: session_id.to_string(),
        })?;

    let assessment_id = record.assessment_id().unwrap_or_default().to_string();
    let Some(definition) = registry.lookup(&assessment_id) else {
        warn!(session_id, assessment_id = %assessment_id, "no report definition for assessment type");
        return Err(ExportError::ConfigMissing { assessment_id });
    };

    let artifact = pipeline.generate(&record, definition).await?;
    info!(
        session_id,
        assessment_id = %assessment_id,
        file_name = %artifact.file_name,
        "report ready"
    );
    Ok(GeneratedReport {
        artifact,
        assessment_id,
    })
}
