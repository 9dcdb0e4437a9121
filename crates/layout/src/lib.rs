//! Pure page layout.
//!
//! [`lay_out_page`] maps one planned page plus the venue branding to a flat
//! display list of positioned elements on a fixed 794x1123 logical surface.
//! It is a pure function: no clocks, no I/O, no shared state. Both renderer
//! backends (the interactive preview and the headless export path) consume
//! the same display list, so they cannot drift apart.

mod context;
mod elements;
mod palette;
mod templates;

pub use elements::{
    FontWeight, ImageElement, LayoutElement, PositionedElement, RectElement, RuleElement,
    TextAlign, TextElement,
};
pub use palette::PaletteSpec;

use carta_menu::VenueBranding;
use carta_plan::Page;
use carta_types::Size;

/// Logical surface size shared by every page template.
pub const PAGE_SIZE: Size = Size::new(794.0, 1123.0);

/// The laid-out form of one page: an ordered display list plus the asset
/// references the page embeds (resolved later by the asset waiter).
#[derive(Debug, Clone, PartialEq)]
pub struct PageLayout {
    pub size: Size,
    pub elements: Vec<PositionedElement>,
    pub asset_refs: Vec<String>,
}

/// Lays out a single page. Deterministic for identical inputs.
pub fn lay_out_page(page: &Page, branding: &VenueBranding) -> PageLayout {
    let spec = palette::resolve(page.palette());
    match page {
        Page::Cover { .. } => templates::cover(branding, spec),
        Page::Intro { .. } => templates::intro(branding, spec),
        Page::Content(content) => templates::content(content, branding, spec),
        Page::Outro { .. } => templates::outro(branding, spec),
    }
}
