//! Read-only menu catalog snapshot and venue branding record.
//!
//! Snapshots arrive as camelCase JSON produced by the upstream menu editor.
//! This crate only models the data; nothing here mutates a catalog.

pub mod branding;
pub mod catalog;

pub use branding::{BrandingRecord, VenueBranding, VenueKind};
pub use catalog::{
    Badges, Dietary, MenuCatalog, MenuCategory, MenuItem, MenuSection, Price, SectionKind,
    SizeTier,
};
