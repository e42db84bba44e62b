use std::fmt;
use std::path::Path;
use std::sync::{Arc, Mutex};

use jiff::Zoned;
use tracing::{debug, info, warn};

use healthpro_core::artifact_names;
use healthpro_core::models::artifact::{NamingScheme, ReportArtifact};
use healthpro_core::models::definition::ReportDefinition;
use healthpro_core::models::record::AssessmentRecord;
use healthpro_storage::artifacts::ArtifactStore;

use crate::document::assemble_document;
use crate::error::ExportError;
use crate::pdf::{DocumentRenderer, RenderJob};
use crate::render::render_report_html;
use crate::styles::PageOptions;

/// Lifecycle of one render.
///
/// `Idle → BuildingHtml → AwaitingLayout → Paginating → Written → Closed`,
/// with any step able to drop into `Failed → Closed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderStage {
    Idle,
    BuildingHtml,
    AwaitingLayout,
    Paginating,
    Written,
    Failed,
    Closed,
}

impl fmt::Display for RenderStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            RenderStage::Idle => "idle",
            RenderStage::BuildingHtml => "building_html",
            RenderStage::AwaitingLayout => "awaiting_layout",
            RenderStage::Paginating => "paginating",
            RenderStage::Written => "written",
            RenderStage::Failed => "failed",
            RenderStage::Closed => "closed",
        };
        f.write_str(s)
    }
}

/// Tracks and logs the stage of one render. Dropping it closes the run.
#[derive(Debug)]
pub struct RenderProgress {
    session_id: String,
    file_name: String,
    stages: Mutex<Vec<RenderStage>>,
}

impl RenderProgress {
    pub fn new(session_id: impl Into<String>, file_name: impl Into<String>) -> Self {
        Self {
            session_id: session_id.into(),
            file_name: file_name.into(),
            stages: Mutex::new(vec![RenderStage::Idle]),
        }
    }

    pub fn advance(&self, stage: RenderStage) {
        debug!(
            session_id = %self.session_id,
            file_name = %self.file_name,
            %stage,
            "render stage"
        );
        if let Ok(mut stages) = self.stages.lock() {
            stages.push(stage);
        }
    }

    pub fn fail(&self, error: &ExportError) {
        warn!(
            session_id = %self.session_id,
            file_name = %self.file_name,
            error = %error,
            "report render failed"
        );
        self.advance(RenderStage::Failed);
    }

    pub fn current(&self) -> RenderStage {
        self.history().last().copied().unwrap_or(RenderStage::Idle)
    }

    /// Every stage entered so far, oldest first.
    pub fn history(&self) -> Vec<RenderStage> {
        self.stages.lock().map(|s| s.clone()).unwrap_or_default()
    }
}

impl Drop for RenderProgress {
    fn drop(&mut self) {
        self.advance(RenderStage::Closed);
    }
}

/// Renders documents into the artifact directory, at most once per file
/// name.
pub struct ReportPipeline {
    store: ArtifactStore,
    renderer: Arc<dyn DocumentRenderer>,
    page: PageOptions,
    naming: NamingScheme,
}

impl ReportPipeline {
    pub fn new(
        store: ArtifactStore,
        renderer: Arc<dyn DocumentRenderer>,
        page: PageOptions,
        naming: NamingScheme,
    ) -> Self {
        Self {
            store,
            renderer,
            page,
            naming,
        }
    }

    pub fn store(&self) -> &ArtifactStore {
        &self.store
    }

    pub fn naming(&self) -> NamingScheme {
        self.naming
    }

    /// Generate (or reuse) the artifact for `record`, stamped with the
    /// current local time.
    pub async fn generate(
        &self,
        record: &AssessmentRecord,
        definition: &ReportDefinition,
    ) -> Result<ReportArtifact, ExportError> {
        self.generate_at(record, definition, &Zoned::now()).await
    }

    /// Generate (or reuse) the artifact for `record` as of `now`.
    ///
    /// If a file with the computed name already exists it is returned
    /// untouched and the renderer is never launched. Otherwise the report is
    /// rendered into a staging file and published atomically; when two
    /// renders race for the same name the first one to publish wins.
    pub async fn generate_at(
        &self,
        record: &AssessmentRecord,
        definition: &ReportDefinition,
        now: &Zoned,
    ) -> Result<ReportArtifact, ExportError> {
        let session_id = record.session_id().ok_or(ExportError::MissingSessionId)?;
        let file_name =
            artifact_names::report_file_name(session_id, self.naming, now.timestamp().as_millisecond());
        let artifact = ReportArtifact {
            file_path: self.store.path_for(&file_name).display().to_string(),
            file_name: file_name.clone(),
            session_id: session_id.to_string(),
        };

        self.store.ensure_dir().await?;
        if self.store.exists(&file_name).await? {
            info!(session_id, file_name = %file_name, "report already exists, reusing");
            return Ok(artifact);
        }

        let progress = RenderProgress::new(session_id, file_name.as_str());
        let staged = self.store.staging_path(&file_name);
        let result = self
            .render_new(record, definition, now, &staged, &file_name, &progress)
            .await;

        match &result {
            Ok(()) => progress.advance(RenderStage::Written),
            Err(e) => {
                self.store.discard(&staged).await;
                progress.fail(e);
            }
        }
        result.map(|()| artifact)
    }

    async fn render_new(
        &self,
        record: &AssessmentRecord,
        definition: &ReportDefinition,
        now: &Zoned,
        staged: &Path,
        file_name: &str,
        progress: &RenderProgress,
    ) -> Result<(), ExportError> {
        progress.advance(RenderStage::BuildingHtml);
        let document = assemble_document(record, definition, now);
        let html = render_report_html(&document, &self.page)?;

        self.renderer
            .render_to_file(RenderJob {
                html: &html,
                page: &self.page,
                dest: staged,
                progress,
            })
            .await?;

        self.store.commit(staged, file_name).await?;
        Ok(())
    }
}
