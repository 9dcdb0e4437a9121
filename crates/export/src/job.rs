use crate::host::OffscreenHost;
use crate::{ExportError, naming};
use carta_assets::AssetSource;
use carta_menu::{MenuCatalog, VenueBranding};
use carta_pdf_composer::assemble;
use carta_plan::plan;
use carta_pricing::PriceAdjustment;
use carta_raster::CaptureError;
use carta_render::ExportSurface;
use carta_types::PageSizePreset;
use log::{info, warn};
use lopdf::Document;
use std::sync::Arc;
use std::sync::atomic::AtomicBool;

/// Which pages a job targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportScope {
    CurrentPage(usize),
    AllPages,
}

/// Everything one export action needs. Created per user command and
/// discarded with the job.
#[derive(Debug, Clone)]
pub struct ExportRequest {
    pub scope: ExportScope,
    pub preset: PageSizePreset,
    /// Capture scale over the logical surface size.
    pub scale: f32,
    /// A promotional adjustment scoped to this job only.
    pub adjustment: Option<PriceAdjustment>,
}

impl ExportRequest {
    pub fn all_pages() -> Self {
        Self {
            scope: ExportScope::AllPages,
            preset: PageSizePreset::FullMenu,
            scale: 2.0,
            adjustment: None,
        }
    }

    pub fn current_page(index: usize) -> Self {
        Self {
            scope: ExportScope::CurrentPage(index),
            ..Self::all_pages()
        }
    }

    pub fn promotional(percent: f64) -> Self {
        Self {
            adjustment: Some(PriceAdjustment::new(percent)),
            ..Self::all_pages()
        }
    }

    pub fn with_scale(mut self, scale: f32) -> Self {
        self.scale = scale;
        self
    }

    pub fn with_preset(mut self, preset: PageSizePreset) -> Self {
        self.preset = preset;
        self
    }
}

/// Final classification of a finished job.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobOutcome {
    /// Every targeted page made it into the document.
    Completed,
    /// Some pages failed and were skipped; the document holds the rest.
    PartiallyCompleted,
    /// No page was usable. Surfaced as [`ExportError::JobFailed`].
    Failed,
}

/// One skipped page and why.
#[derive(Debug)]
pub struct PageFailure {
    pub page_index: usize,
    pub error: CaptureError,
}

/// What a finished job reports back.
#[derive(Debug)]
pub struct ExportSummary {
    pub outcome: JobOutcome,
    pub total_pages: usize,
    pub embedded_pages: usize,
    pub failures: Vec<PageFailure>,
    /// Deterministic artifact file name for this job.
    pub artifact_name: String,
}

/// Progress notifications emitted while a job runs. Best-effort: the
/// summary is authoritative, events exist for progress UI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportEvent {
    Started { total: usize },
    PageFinished {
        page_index: usize,
        succeeded: bool,
        completed: usize,
        total: usize,
    },
    Finished { outcome: JobOutcome },
}

/// Runs export jobs against one catalog snapshot.
///
/// Jobs are strictly sequential per page and exclusive per orchestrator;
/// the offscreen host slot rejects a second concurrent job.
pub struct ExportOrchestrator {
    catalog: MenuCatalog,
    branding: VenueBranding,
    source: Arc<dyn AssetSource>,
    slot: Arc<AtomicBool>,
    events_tx: async_channel::Sender<ExportEvent>,
    events_rx: async_channel::Receiver<ExportEvent>,
}

impl ExportOrchestrator {
    pub fn new(
        catalog: MenuCatalog,
        branding: VenueBranding,
        source: Arc<dyn AssetSource>,
    ) -> Self {
        let (events_tx, events_rx) = async_channel::bounded(64);
        Self {
            catalog,
            branding,
            source,
            slot: Arc::new(AtomicBool::new(false)),
            events_tx,
            events_rx,
        }
    }

    pub fn catalog(&self) -> &MenuCatalog {
        &self.catalog
    }

    pub fn branding(&self) -> &VenueBranding {
        &self.branding
    }

    /// A receiver for progress events. May be called any number of times;
    /// every receiver sees the same stream.
    pub fn subscribe(&self) -> async_channel::Receiver<ExportEvent> {
        self.events_rx.clone()
    }

    fn emit(&self, event: ExportEvent) {
        // Nobody draining the channel must never stall the job.
        let _ = self.events_tx.try_send(event);
    }

    /// Runs a document export job to completion and returns the summary
    /// together with the assembled document.
    pub async fn export_document(
        &self,
        request: &ExportRequest,
    ) -> Result<(ExportSummary, Document), ExportError> {
        let plan = plan(&self.catalog, request.adjustment);
        let targets: Vec<usize> = match request.scope {
            ExportScope::AllPages => (0..plan.len()).collect(),
            ExportScope::CurrentPage(index) => {
                if index >= plan.len() {
                    return Err(ExportError::PageOutOfRange(index));
                }
                vec![index]
            }
        };

        let host = OffscreenHost::acquire(self.slot.clone())?;
        let handle = host.handle();
        let total = targets.len();
        info!(
            "export job started: {} page(s), preset {:?}, adjustment {:?}",
            total, request.preset, request.adjustment
        );
        self.emit(ExportEvent::Started { total });

        let mut bitmaps = Vec::with_capacity(total);
        let mut failures = Vec::new();
        for (done, &page_index) in targets.iter().enumerate() {
            let Some(page) = plan.get(page_index) else {
                continue;
            };
            let surface =
                ExportSurface::build(page_index, page, &self.branding, self.source.as_ref()).await;
            let succeeded = match handle.capture(&surface, request.scale) {
                Ok(bitmap) => {
                    bitmaps.push(bitmap);
                    true
                }
                Err(error) => {
                    warn!("page {} capture failed, skipping: {}", page_index, error);
                    failures.push(PageFailure { page_index, error });
                    false
                }
            };
            self.emit(ExportEvent::PageFinished {
                page_index,
                succeeded,
                completed: done + 1,
                total,
            });
        }
        drop(host);

        if bitmaps.is_empty() {
            self.emit(ExportEvent::Finished { outcome: JobOutcome::Failed });
            return Err(ExportError::JobFailed { failures });
        }

        let document = assemble(&bitmaps, request.preset)?;
        let outcome = if failures.is_empty() {
            JobOutcome::Completed
        } else {
            JobOutcome::PartiallyCompleted
        };
        self.emit(ExportEvent::Finished { outcome });
        info!(
            "export job finished: {:?}, {}/{} pages embedded",
            outcome,
            bitmaps.len(),
            total
        );

        Ok((
            ExportSummary {
                outcome,
                total_pages: total,
                embedded_pages: bitmaps.len(),
                failures,
                artifact_name: naming::artifact_name(&self.branding, request),
            },
            document,
        ))
    }

    /// Captures one page as a PNG (the "export current page as image"
    /// command). A capture failure here fails the whole action; there is
    /// no other page to fall back on.
    pub async fn export_page_image(
        &self,
        page_index: usize,
        scale: f32,
        adjustment: Option<PriceAdjustment>,
    ) -> Result<Vec<u8>, ExportError> {
        let plan = plan(&self.catalog, adjustment);
        let page = plan
            .get(page_index)
            .ok_or(ExportError::PageOutOfRange(page_index))?;

        let host = OffscreenHost::acquire(self.slot.clone())?;
        let handle = host.handle();
        let surface =
            ExportSurface::build(page_index, page, &self.branding, self.source.as_ref()).await;
        let bitmap = handle.capture(&surface, scale)?;
        Ok(bitmap.to_png()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use carta_assets::InMemoryAssetSource;
    use carta_menu::{MenuCategory, MenuItem, Price};

    fn seven_item_catalog() -> MenuCatalog {
        let mut catalog = MenuCatalog::empty();
        catalog.starters.categories.push(MenuCategory {
            title: "Small Plates".to_string(),
            icon: None,
            items: (0..7)
                .map(|i| MenuItem {
                    name: format!("Item {}", i),
                    description: None,
                    badges: Default::default(),
                    dietary: None,
                    spice_level: None,
                    calories: None,
                    discount_note: None,
                    price: Price::Single("₹100".to_string()),
                })
                .collect(),
        });
        catalog
    }

    fn orchestrator(catalog: MenuCatalog, branding: VenueBranding) -> ExportOrchestrator {
        ExportOrchestrator::new(catalog, branding, Arc::new(InMemoryAssetSource::new()))
    }

    #[tokio::test]
    async fn test_full_export_of_seven_items_yields_five_pages() {
        // Cover + intro + two content pages (6 + 1 items) + outro.
        let orch = orchestrator(seven_item_catalog(), VenueBranding::house());
        let request = ExportRequest::all_pages().with_scale(1.0);
        let (summary, document) = orch.export_document(&request).await.unwrap();

        assert_eq!(summary.outcome, JobOutcome::Completed);
        assert_eq!(summary.total_pages, 5);
        assert_eq!(summary.embedded_pages, 5);
        assert!(summary.failures.is_empty());
        assert_eq!(document.get_pages().len(), 5);
    }

    #[tokio::test]
    async fn test_one_bad_page_yields_partially_completed() {
        // A logo that settles to undecodable bytes poisons only the cover.
        let source = InMemoryAssetSource::new();
        source.add("logo.png", b"definitely not an image".to_vec());
        let branding = VenueBranding::new("Bay Leaf", None, Some("logo.png".to_string()));
        let orch =
            ExportOrchestrator::new(seven_item_catalog(), branding, Arc::new(source));

        let request = ExportRequest::all_pages().with_scale(1.0);
        let (summary, document) = orch.export_document(&request).await.unwrap();

        assert_eq!(summary.outcome, JobOutcome::PartiallyCompleted);
        assert_eq!(summary.failures.len(), 1);
        assert_eq!(summary.failures[0].page_index, 0);
        assert_eq!(summary.embedded_pages, 4);
        assert_eq!(document.get_pages().len(), 4);
    }

    #[tokio::test]
    async fn test_all_captures_failing_fails_the_job() {
        let orch = orchestrator(seven_item_catalog(), VenueBranding::house());
        // A scale the rasterizer rejects makes every capture fail.
        let request = ExportRequest::all_pages().with_scale(-1.0);
        let result = orch.export_document(&request).await;
        match result {
            Err(ExportError::JobFailed { failures }) => assert_eq!(failures.len(), 5),
            other => panic!("expected JobFailed, got {:?}", other.map(|(s, _)| s)),
        }
    }

    #[tokio::test]
    async fn test_promotional_export_never_mutates_catalog() {
        let catalog = seven_item_catalog();
        let before = catalog.clone();
        let orch = orchestrator(catalog, VenueBranding::house());
        let request = ExportRequest::promotional(15.0).with_scale(1.0);
        orch.export_document(&request).await.unwrap();
        assert_eq!(*orch.catalog(), before);
    }

    #[tokio::test]
    async fn test_current_page_scope_exports_one_page() {
        let orch = orchestrator(seven_item_catalog(), VenueBranding::house());
        let request = ExportRequest::current_page(2).with_scale(1.0);
        let (summary, document) = orch.export_document(&request).await.unwrap();
        assert_eq!(summary.total_pages, 1);
        assert_eq!(document.get_pages().len(), 1);
    }

    #[tokio::test]
    async fn test_out_of_range_page_is_rejected() {
        let orch = orchestrator(seven_item_catalog(), VenueBranding::house());
        let request = ExportRequest::current_page(99).with_scale(1.0);
        assert!(matches!(
            orch.export_document(&request).await,
            Err(ExportError::PageOutOfRange(99))
        ));
    }

    #[tokio::test]
    async fn test_progress_events_fire_per_page() {
        let orch = orchestrator(seven_item_catalog(), VenueBranding::house());
        let events = orch.subscribe();
        let request = ExportRequest::all_pages().with_scale(1.0);
        orch.export_document(&request).await.unwrap();

        let mut collected = Vec::new();
        while let Ok(event) = events.try_recv() {
            collected.push(event);
        }
        assert_eq!(collected.first(), Some(&ExportEvent::Started { total: 5 }));
        assert_eq!(
            collected.last(),
            Some(&ExportEvent::Finished { outcome: JobOutcome::Completed })
        );
        let page_events = collected
            .iter()
            .filter(|e| matches!(e, ExportEvent::PageFinished { .. }))
            .count();
        assert_eq!(page_events, 5);
    }

    #[tokio::test]
    async fn test_page_image_export_produces_png() {
        let orch = orchestrator(seven_item_catalog(), VenueBranding::house());
        let png = orch.export_page_image(0, 1.0, None).await.unwrap();
        let decoded = image::load_from_memory(&png).unwrap();
        assert_eq!(decoded.width(), 794);
        assert_eq!(decoded.height(), 1123);
    }
}
