use axum::Json;
use axum::extract::{Path, State};
use axum::http::header;
use axum::response::IntoResponse;
use serde::{Deserialize, Serialize};

use healthpro_core::artifact_names;
use healthpro_core::models::artifact::SessionSummary;
use healthpro_export::service::generate_for_session;

use crate::error::ApiError;
use crate::state::AppState;

#[derive(Deserialize)]
pub struct GenerateRequest {
    #[serde(default)]
    pub session_id: Option<String>,
}

#[derive(Serialize)]
pub struct GenerateResponse {
    pub success: bool,
    pub message: String,
    pub session_id: String,
    pub assessment_id: String,
    pub file_name: String,
    pub download_url: String,
}

/// Generate (or reuse) the PDF report for a session.
pub async fn generate_report(
    State(state): State<AppState>,
    Json(req): Json<GenerateRequest>,
) -> Result<Json<GenerateResponse>, ApiError> {
    let session_id = req
        .session_id
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| ApiError::BadRequest("session_id is required".to_string()))?;

    let report = generate_for_session(
        state.records.as_ref(),
        &state.registry,
        &state.pipeline,
        session_id,
    )
    .await?;

    let file_name = report.artifact.file_name;
    Ok(Json(GenerateResponse {
        success: true,
        message: "PDF report generated successfully".to_string(),
        session_id: report.artifact.session_id,
        assessment_id: report.assessment_id,
        download_url: format!("/api/reports/download/{file_name}"),
        file_name,
    }))
}

/// Stream a previously generated report as an attachment.
pub async fn download_report(
    State(state): State<AppState>,
    Path(file_name): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    if !artifact_names::is_safe_file_name(&file_name) {
        return Err(ApiError::BadRequest("Invalid file name".to_string()));
    }

    let bytes = state.pipeline.store().read(&file_name).await?;
    Ok((
        [
            (header::CONTENT_TYPE, artifact_names::CONTENT_TYPE.to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{file_name}\""),
            ),
        ],
        bytes,
    ))
}

pub async fn list_sessions(State(state): State<AppState>) -> Result<Json<Vec<SessionSummary>>, ApiError> {
    let sessions = state.records.list_sessions().await?;
    Ok(Json(sessions))
}
