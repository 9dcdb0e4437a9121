pub mod color;
pub mod geometry;
pub mod page_size;
pub mod palette;

pub use color::Color;
pub use geometry::{Rect, Size};
pub use page_size::PageSizePreset;
pub use palette::Palette;
