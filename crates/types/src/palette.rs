use serde::{Deserialize, Serialize};

/// Color scheme tag carried by every planned page.
///
/// Each menu section gets its own palette; the cover, intro and outro pages
/// use the brand palette. Resolution of a tag into concrete colors happens
/// in the layout crate so that both renderer backends see identical values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Palette {
    /// Cover, intro and outro pages.
    Brand,
    /// Starters section.
    Ember,
    /// Mains section.
    Terracotta,
    /// Beverages section.
    Lagoon,
    /// Sides section.
    Olive,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_palette_serde_round_trip() {
        let json = serde_json::to_string(&Palette::Terracotta).unwrap();
        assert_eq!(json, "\"terracotta\"");
        let back: Palette = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Palette::Terracotta);
    }
}
