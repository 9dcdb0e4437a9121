//! Export jobs.
//!
//! An export job walks its target pages strictly one at a time: build the
//! headless surface, wait for its assets to settle, capture, append. The
//! sequential shape is deliberate backpressure; high-resolution captures
//! are memory-hungry and must never overlap. A failed capture is recorded
//! and skipped, and only a job with zero usable pages fails as a whole.

mod feed;
mod host;
mod job;
mod naming;

pub use feed::{DeliveryRecord, delivery_feed, delivery_records};
pub use host::{HostHandle, OffscreenHost};
pub use job::{
    ExportEvent, ExportOrchestrator, ExportRequest, ExportScope, ExportSummary, JobOutcome,
    PageFailure,
};
pub use naming::artifact_name;

use carta_pdf_composer::AssemblyError;
use carta_raster::CaptureError;
use thiserror::Error;

/// Job-level export failures. Per-page capture problems are not errors at
/// this level; they live in the job summary.
#[derive(Error, Debug)]
pub enum ExportError {
    #[error("Another export job is already running against this catalog")]
    JobAlreadyRunning,

    #[error("Page {0} is outside the document plan")]
    PageOutOfRange(usize),

    #[error("Export failed: all {} page capture(s) failed", .failures.len())]
    JobFailed { failures: Vec<PageFailure> },

    #[error("Assembly failed: {0}")]
    Assembly(#[from] AssemblyError),

    #[error("Capture failed: {0}")]
    Capture(#[from] CaptureError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
