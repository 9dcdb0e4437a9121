//! carta: menu document generation and export.
//!
//! The pipeline: a read-only [`MenuCatalog`] snapshot is planned into a
//! deterministic page sequence, each page is laid out once as a display
//! list, rendered through one of two must-agree backends, captured to a
//! bitmap, and assembled into a paginated document. Promotional exports
//! run the same pipeline under a transient price adjustment that never
//! touches the catalog.
//!
//! [`MenuStudio`] is the high-level entry point; the member crates expose
//! each stage for direct use.

pub use carta_assets::{AssetSource, FilesystemAssetSource, InMemoryAssetSource};
pub use carta_export::{
    ExportError, ExportEvent, ExportOrchestrator, ExportRequest, ExportScope, ExportSummary,
    JobOutcome,
};
pub use carta_menu::{BrandingRecord, MenuCatalog, VenueBranding, VenueKind};
pub use carta_plan::{DocumentPlan, Page, plan};
pub use carta_pricing::PriceAdjustment;
pub use carta_render::PreviewSession;
pub use carta_types::PageSizePreset;

use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;

/// The main error enum for high-level operations.
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("Snapshot parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Export error: {0}")]
    Export(#[from] ExportError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// One venue's menu, branding and asset store, ready to preview and
/// export.
pub struct MenuStudio {
    orchestrator: ExportOrchestrator,
    source: Arc<dyn AssetSource>,
}

impl MenuStudio {
    pub fn new(
        catalog: MenuCatalog,
        branding: VenueBranding,
        source: Arc<dyn AssetSource>,
    ) -> Self {
        let orchestrator = ExportOrchestrator::new(catalog, branding, source.clone());
        Self { orchestrator, source }
    }

    /// Loads a studio from snapshot JSON: the catalog plus a raw branding
    /// record (venue classification happens here, once).
    pub fn from_json(
        catalog_json: &str,
        branding_json: &str,
        source: Arc<dyn AssetSource>,
    ) -> Result<Self, PipelineError> {
        let catalog: MenuCatalog = serde_json::from_str(catalog_json)?;
        let record: BrandingRecord = serde_json::from_str(branding_json)?;
        Ok(Self::new(catalog, VenueBranding::from_record(record), source))
    }

    pub fn orchestrator(&self) -> &ExportOrchestrator {
        &self.orchestrator
    }

    /// Opens an interactive preview over the unadjusted document plan.
    pub async fn open_preview(&self) -> PreviewSession {
        let plan = carta_plan::plan(self.orchestrator.catalog(), None);
        PreviewSession::open(
            plan,
            self.orchestrator.branding().clone(),
            self.source.clone(),
        )
        .await
    }

    /// Runs a document export and writes the artifact into `out_dir` under
    /// its deterministic name. Returns the summary and the artifact path.
    pub async fn export_into(
        &self,
        request: &ExportRequest,
        out_dir: &Path,
    ) -> Result<(ExportSummary, PathBuf), PipelineError> {
        let (summary, mut document) = self.orchestrator.export_document(request).await?;
        let path = out_dir.join(&summary.artifact_name);
        document
            .save(&path)
            .map_err(|e| PipelineError::Io(std::io::Error::other(e.to_string())))?;
        Ok((summary, path))
    }

    /// The "export all pages as document" command.
    pub async fn export_full_menu(&self, out_dir: &Path) -> Result<(ExportSummary, PathBuf), PipelineError> {
        self.export_into(&ExportRequest::all_pages(), out_dir).await
    }

    /// The "export all pages with promotional adjustment" command.
    pub async fn export_promotional(
        &self,
        percent: f64,
        out_dir: &Path,
    ) -> Result<(ExportSummary, PathBuf), PipelineError> {
        self.export_into(&ExportRequest::promotional(percent), out_dir)
            .await
    }

    /// The "export current page as image" command: one page as PNG bytes.
    pub async fn export_page_image(
        &self,
        page_index: usize,
        scale: f32,
    ) -> Result<Vec<u8>, PipelineError> {
        Ok(self
            .orchestrator
            .export_page_image(page_index, scale, None)
            .await?)
    }

    /// The flat delivery-platform feed for the catalog.
    pub fn delivery_feed(&self) -> String {
        carta_export::delivery_feed(self.orchestrator.catalog())
    }
}
