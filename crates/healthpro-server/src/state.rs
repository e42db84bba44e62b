use std::sync::Arc;

use healthpro_export::pipeline::ReportPipeline;
use healthpro_registry::Registry;
use healthpro_storage::records::RecordRepository;

/// Shared application state, injected into all route handlers via Axum state.
#[derive(Clone)]
pub struct AppState {
    pub records: Arc<dyn RecordRepository>,
    pub registry: Arc<Registry>,
    pub pipeline: Arc<ReportPipeline>,
}
