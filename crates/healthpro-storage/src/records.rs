use std::collections::BTreeMap;
use std::future::Future;
use std::path::Path;
use std::pin::Pin;

use healthpro_core::models::artifact::SessionSummary;
use healthpro_core::models::record::AssessmentRecord;
use tracing::info;

use crate::error::StorageError;

type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Read access to assessment records.
///
/// The report engine receives this as a capability; where records actually
/// live is the implementor's business.
///
/// Methods return boxed futures for dyn compatibility.
pub trait RecordRepository: Send + Sync {
    /// Fetch the record for a session. `Ok(None)` when there is none.
    fn get(&self, session_id: &str) -> BoxFuture<'_, Result<Option<AssessmentRecord>, StorageError>>;

    /// One summary row per known session.
    fn list_sessions(&self) -> BoxFuture<'_, Result<Vec<SessionSummary>, StorageError>>;
}

/// Records held in memory, optionally loaded from a JSON array file.
#[derive(Debug, Clone, Default)]
pub struct JsonRecordStore {
    records: BTreeMap<String, AssessmentRecord>,
}

impl JsonRecordStore {
    /// Index records by session id. Records without one are skipped.
    pub fn from_records(records: impl IntoIterator<Item = AssessmentRecord>) -> Self {
        let records = records
            .into_iter()
            .filter_map(|r| r.session_id().map(str::to_string).map(|id| (id, r)))
            .collect();
        Self { records }
    }

    /// Load a JSON array of assessment records.
    pub fn load(path: &Path) -> Result<Self, StorageError> {
        let contents = std::fs::read_to_string(path).map_err(|e| StorageError::io(path, e))?;
        let records: Vec<AssessmentRecord> = serde_json::from_str(&contents)?;
        let store = Self::from_records(records);
        info!(path = %path.display(), records = store.len(), "loaded assessment records");
        Ok(store)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl RecordRepository for JsonRecordStore {
    fn get(&self, session_id: &str) -> BoxFuture<'_, Result<Option<AssessmentRecord>, StorageError>> {
        let found = self.records.get(session_id).cloned();
        Box::pin(async move { Ok(found) })
    }

    fn list_sessions(&self) -> BoxFuture<'_, Result<Vec<SessionSummary>, StorageError>> {
        Box::pin(async move {
            Ok(self
                .records
                .iter()
                .map(|(session_id, record)| SessionSummary {
                    session_id: session_id.clone(),
                    assessment_id: record.assessment_id().map(str::to_string),
                    timestamp: record.as_value().get("timestamp").cloned(),
                    accuracy: record.as_value().get("accuracy").cloned(),
                })
                .collect())
        })
    }
}
