//! Rasterization: display list in, bitmap out.
//!
//! [`paint`] executes a page's display list into an RGBA bitmap at a target
//! scale. Failures are typed so the export job can skip a bad page and keep
//! going; nothing here panics on malformed input.

mod bitmap;
mod fonts;
mod painter;

pub use bitmap::Bitmap;
pub use fonts::FontLibrary;
pub use painter::paint;

use thiserror::Error;

/// Errors from a single capture attempt. All of these are non-fatal at the
/// job level: the orchestrator records the page and moves on.
#[derive(Error, Debug)]
pub enum CaptureError {
    /// The offscreen host backing the capture was released before the
    /// capture ran.
    #[error("Offscreen host is gone; capture has nothing to render into")]
    HostMissing,

    #[error("Capture scale {0} is not usable")]
    InvalidScale(f32),

    #[error("Could not allocate a {width}x{height} surface")]
    Allocation { width: u32, height: u32 },

    #[error("Embedded asset '{path}' could not be decoded: {message}")]
    BadAsset { path: String, message: String },

    #[error("Bitmap encoding failed: {0}")]
    Encode(String),
}
