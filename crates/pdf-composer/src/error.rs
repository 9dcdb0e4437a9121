use thiserror::Error;

/// Assembly failures are fatal for the export job: if the document cannot
/// be put together there is no artifact to hand back.
#[derive(Error, Debug)]
pub enum AssemblyError {
    #[error("Nothing to assemble: no usable pages were captured")]
    Empty,

    #[error(
        "Bitmap {page_index} aspect {bitmap_aspect:.4} does not fit the page aspect {page_aspect:.4}"
    )]
    AspectRatio {
        page_index: usize,
        bitmap_aspect: f32,
        page_aspect: f32,
    },

    #[error("Image encoding failed: {0}")]
    Encode(String),

    #[error("PDF write failed: {0}")]
    Pdf(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<lopdf::Error> for AssemblyError {
    fn from(err: lopdf::Error) -> Self {
        AssemblyError::Pdf(err.to_string())
    }
}
