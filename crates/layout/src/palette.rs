use carta_types::{Color, Palette};

/// Concrete colors behind a palette tag. Both renderer backends read these
/// through [`resolve`], so a tag always means the same ink everywhere.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaletteSpec {
    /// Page background.
    pub page: Color,
    /// Header band and chip fill.
    pub band: Color,
    /// Headings and prices.
    pub heading: Color,
    /// Body copy.
    pub body: Color,
    /// Accents: badges, discount notes, spice markers.
    pub accent: Color,
    /// De-emphasized copy: calories, taglines.
    pub muted: Color,
}

pub fn resolve(palette: Palette) -> PaletteSpec {
    match palette {
        Palette::Brand => PaletteSpec {
            page: Color::rgb(250, 246, 238),
            band: Color::rgb(38, 34, 30),
            heading: Color::rgb(38, 34, 30),
            body: Color::rgb(74, 69, 63),
            accent: Color::rgb(176, 110, 43),
            muted: Color::gray(142),
        },
        Palette::Ember => PaletteSpec {
            page: Color::rgb(252, 247, 241),
            band: Color::rgb(166, 62, 42),
            heading: Color::rgb(110, 38, 24),
            body: Color::rgb(72, 60, 54),
            accent: Color::rgb(198, 88, 44),
            muted: Color::gray(140),
        },
        Palette::Terracotta => PaletteSpec {
            page: Color::rgb(251, 245, 238),
            band: Color::rgb(146, 84, 56),
            heading: Color::rgb(98, 54, 34),
            body: Color::rgb(70, 58, 50),
            accent: Color::rgb(184, 112, 60),
            muted: Color::gray(140),
        },
        Palette::Lagoon => PaletteSpec {
            page: Color::rgb(244, 249, 249),
            band: Color::rgb(32, 104, 112),
            heading: Color::rgb(22, 72, 78),
            body: Color::rgb(54, 66, 68),
            accent: Color::rgb(46, 140, 150),
            muted: Color::gray(140),
        },
        Palette::Olive => PaletteSpec {
            page: Color::rgb(248, 249, 242),
            band: Color::rgb(96, 108, 50),
            heading: Color::rgb(66, 76, 34),
            body: Color::rgb(62, 66, 50),
            accent: Color::rgb(128, 142, 64),
            muted: Color::gray(140),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_each_palette_resolves_distinct_band() {
        let bands: Vec<Color> = [
            Palette::Brand,
            Palette::Ember,
            Palette::Terracotta,
            Palette::Lagoon,
            Palette::Olive,
        ]
        .iter()
        .map(|p| resolve(*p).band)
        .collect();
        for (i, a) in bands.iter().enumerate() {
            for b in &bands[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }
}
