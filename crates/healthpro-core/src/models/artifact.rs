use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// A rendered report persisted in the artifact directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ReportArtifact {
    pub file_name: String,
    pub file_path: String,
    pub session_id: String,
}

/// How artifact file names are derived for a session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum NamingScheme {
    /// `report_<session>.pdf`: one artifact per session, reused forever.
    #[default]
    Session,
    /// `report_<session>_<unix millis>.pdf`: one artifact per generation.
    Timestamped,
}

/// Summary row for the session picker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct SessionSummary {
    pub session_id: String,
    pub assessment_id: Option<String>,
    pub timestamp: Option<serde_json::Value>,
    pub accuracy: Option<serde_json::Value>,
}
