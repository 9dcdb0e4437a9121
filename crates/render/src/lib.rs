//! The two renderer backends.
//!
//! Both the interactive [`PreviewSession`] and the headless
//! [`ExportSurface`] consume the display list produced by
//! `carta_layout::lay_out_page` and hand pixels to the same painter. There
//! is exactly one layout description per page, so the preview a user
//! navigates and the document they export cannot disagree.

use carta_assets::{AssetSource, SettledAssets, settle};
use carta_layout::{PageLayout, lay_out_page};
use carta_menu::VenueBranding;
use carta_plan::{DocumentPlan, Page};
use carta_raster::{Bitmap, CaptureError, FontLibrary, paint};
use log::debug;
use std::sync::Arc;

/// A page ready to rasterize: its display list plus whatever assets
/// settled for it.
#[derive(Debug)]
pub struct Surface {
    pub page_index: usize,
    pub layout: PageLayout,
    pub assets: SettledAssets,
}

/// Lays out one page and settles its embedded assets.
pub async fn build_surface(
    page_index: usize,
    page: &Page,
    branding: &VenueBranding,
    source: &dyn AssetSource,
) -> Surface {
    let layout = lay_out_page(page, branding);
    let assets = settle(&layout.asset_refs, source).await;
    debug!(
        "surface for page {} built: {} elements, {}/{} assets settled",
        page_index,
        layout.elements.len(),
        assets.resolved_count(),
        layout.asset_refs.len()
    );
    Surface { page_index, layout, assets }
}

/// The interactive backend: one mounted surface for the page currently on
/// screen, rebuilt on every page switch.
pub struct PreviewSession {
    plan: DocumentPlan,
    branding: VenueBranding,
    source: Arc<dyn AssetSource>,
    surface: Surface,
}

impl PreviewSession {
    /// Opens the session on the first page of the plan. Plans always have
    /// at least a cover and an outro, so there is a page to show.
    pub async fn open(
        plan: DocumentPlan,
        branding: VenueBranding,
        source: Arc<dyn AssetSource>,
    ) -> Self {
        let first = plan
            .get(0)
            .expect("a document plan always contains a cover page");
        let surface = build_surface(0, first, &branding, source.as_ref()).await;
        Self { plan, branding, source, surface }
    }

    pub fn page_count(&self) -> usize {
        self.plan.len()
    }

    pub fn current_index(&self) -> usize {
        self.surface.page_index
    }

    /// Switches to `index`, rebuilding the mounted surface. Out-of-range
    /// indices leave the session where it was.
    pub async fn goto(&mut self, index: usize) -> bool {
        let Some(page) = self.plan.get(index) else {
            return false;
        };
        self.surface = build_surface(index, page, &self.branding, self.source.as_ref()).await;
        true
    }

    pub async fn next(&mut self) -> bool {
        self.goto(self.current_index() + 1).await
    }

    pub async fn prev(&mut self) -> bool {
        match self.current_index().checked_sub(1) {
            Some(index) => self.goto(index).await,
            None => false,
        }
    }

    /// Renders the mounted page.
    pub fn render(&self, scale: f32, fonts: &FontLibrary) -> Result<Bitmap, CaptureError> {
        paint(&self.surface.layout, &self.surface.assets, scale, fonts)
    }
}

/// The headless export backend: a detached surface for exactly one page,
/// captured once and then dropped. It takes a planned [`Page`], never the
/// catalog, so any price adjustment is already baked into what it renders.
pub struct ExportSurface {
    surface: Surface,
}

impl ExportSurface {
    pub async fn build(
        page_index: usize,
        page: &Page,
        branding: &VenueBranding,
        source: &dyn AssetSource,
    ) -> Self {
        Self {
            surface: build_surface(page_index, page, branding, source).await,
        }
    }

    pub fn page_index(&self) -> usize {
        self.surface.page_index
    }

    pub fn capture(&self, scale: f32, fonts: &FontLibrary) -> Result<Bitmap, CaptureError> {
        paint(&self.surface.layout, &self.surface.assets, scale, fonts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use carta_assets::InMemoryAssetSource;
    use carta_menu::{MenuCatalog, MenuCategory, MenuItem, Price};

    fn sample_catalog() -> MenuCatalog {
        let mut catalog = MenuCatalog::empty();
        catalog.starters.categories.push(MenuCategory {
            title: "Chaat".to_string(),
            icon: None,
            items: vec![MenuItem {
                name: "Papdi Chaat".to_string(),
                description: Some("Crisp wafers, yogurt, tamarind".to_string()),
                badges: Default::default(),
                dietary: None,
                spice_level: Some(1),
                calories: None,
                discount_note: None,
                price: Price::Single("₹140".to_string()),
            }],
        });
        catalog
    }

    #[tokio::test]
    async fn test_preview_and_export_pixels_agree() {
        let catalog = sample_catalog();
        let branding = VenueBranding::house();
        let plan = carta_plan::plan(&catalog, None);
        let source: Arc<dyn AssetSource> = Arc::new(InMemoryAssetSource::new());
        let fonts = FontLibrary::empty();

        let mut preview = PreviewSession::open(plan.clone(), branding.clone(), source.clone()).await;
        for index in 0..plan.len() {
            assert!(preview.goto(index).await);
            let page = plan.get(index).unwrap();
            let export = ExportSurface::build(index, page, &branding, source.as_ref()).await;

            let interactive = preview.render(1.0, &fonts).unwrap();
            let headless = export.capture(1.0, &fonts).unwrap();
            assert_eq!(interactive, headless, "backends diverged on page {}", index);
        }
    }

    #[tokio::test]
    async fn test_preview_navigation_rebuilds_surface() {
        let plan = carta_plan::plan(&sample_catalog(), None);
        let total = plan.len();
        let source: Arc<dyn AssetSource> = Arc::new(InMemoryAssetSource::new());
        let mut preview = PreviewSession::open(plan, VenueBranding::house(), source).await;

        assert_eq!(preview.current_index(), 0);
        assert!(preview.next().await);
        assert_eq!(preview.current_index(), 1);
        assert!(preview.prev().await);
        assert_eq!(preview.current_index(), 0);
        assert!(!preview.prev().await);
        assert!(!preview.goto(total).await);
        assert_eq!(preview.current_index(), 0);
    }

    #[tokio::test]
    async fn test_export_surface_is_detached_from_catalog() {
        // The export backend only ever sees a planned page; adjusting the
        // plan does not touch the catalog the page came from.
        let catalog = sample_catalog();
        let before = catalog.clone();
        let plan = carta_plan::plan(&catalog, Some(carta_pricing::PriceAdjustment::new(25.0)));
        let source = InMemoryAssetSource::new();
        let page = plan.get(2).unwrap();
        let _surface = ExportSurface::build(2, page, &VenueBranding::house(), &source).await;
        assert_eq!(catalog, before);
    }
}
