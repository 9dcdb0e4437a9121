use crate::geometry::Size;
use serde::{Deserialize, Serialize};

/// Output page size for document assembly.
///
/// The preset is always an explicit input to the assembler; it is never
/// inferred from the bitmaps being assembled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PageSizePreset {
    /// A4 portrait, the standard full menu format.
    FullMenu,
    /// A5 portrait, a compact handout format.
    CompactHandout,
}

impl PageSizePreset {
    /// Page dimensions in PDF points (1/72 inch).
    pub fn dimensions_pt(self) -> Size {
        match self {
            PageSizePreset::FullMenu => Size::new(595.28, 841.89),
            PageSizePreset::CompactHandout => Size::new(419.53, 595.28),
        }
    }
}

impl Default for PageSizePreset {
    fn default() -> Self {
        PageSizePreset::FullMenu
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presets_are_portrait() {
        for preset in [PageSizePreset::FullMenu, PageSizePreset::CompactHandout] {
            let size = preset.dimensions_pt();
            assert!(size.height > size.width);
        }
    }

    #[test]
    fn test_preset_aspect_close_to_surface_aspect() {
        // Rendered surfaces are 794x1123; both presets must accept them.
        let surface_aspect = 794.0 / 1123.0;
        for preset in [PageSizePreset::FullMenu, PageSizePreset::CompactHandout] {
            let ratio: f32 = preset.dimensions_pt().aspect_ratio();
            assert!((ratio - surface_aspect).abs() < 0.01);
        }
    }
}
