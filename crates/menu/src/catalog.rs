use carta_types::Palette;
use serde::{Deserialize, Serialize};

/// A single dish or drink on the menu.
///
/// The price form is a tagged choice: exactly one of a flat price, a
/// half/full pair, or an ordered list of size tiers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuItem {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub badges: Badges,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dietary: Option<Dietary>,
    /// 0 (none) to 3 (fiery). Values above 3 are rendered as 3.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spice_level: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub calories: Option<u32>,
    /// Free-form promotional note ("20% off after 10pm").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discount_note: Option<String>,
    pub price: Price,
}

/// Highlight ribbons attached to an item.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Badges {
    #[serde(default)]
    pub chef_special: bool,
    #[serde(default)]
    pub best_seller: bool,
    #[serde(default)]
    pub premium: bool,
    #[serde(default)]
    pub top_shelf: bool,
}

impl Badges {
    pub fn is_empty(&self) -> bool {
        !(self.chef_special || self.best_seller || self.premium || self.top_shelf)
    }

    /// Ribbon captions in display order.
    pub fn labels(&self) -> Vec<&'static str> {
        let mut labels = Vec::new();
        if self.chef_special {
            labels.push("CHEF'S SPECIAL");
        }
        if self.best_seller {
            labels.push("BESTSELLER");
        }
        if self.premium {
            labels.push("PREMIUM");
        }
        if self.top_shelf {
            labels.push("TOP SHELF");
        }
        labels
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Dietary {
    Veg,
    NonVeg,
    Egg,
}

impl Dietary {
    pub fn label(self) -> &'static str {
        match self {
            Dietary::Veg => "veg",
            Dietary::NonVeg => "non-veg",
            Dietary::Egg => "egg",
        }
    }
}

/// The price form of an item. Prices are formatted strings straight from the
/// editor ("₹1,200", "₹95", "$12.50 "); arithmetic on them preserves every
/// surrounding character.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Price {
    Single(String),
    HalfFull { half: String, full: String },
    Tiered(Vec<SizeTier>),
}

impl Price {
    /// The one price string a flat record export carries. Half/full items
    /// report the full price; tiered items report their first tier.
    pub fn primary(&self) -> &str {
        match self {
            Price::Single(price) => price,
            Price::HalfFull { full, .. } => full,
            Price::Tiered(tiers) => tiers.first().map(|t| t.price.as_str()).unwrap_or(""),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SizeTier {
    pub label: String,
    pub price: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuCategory {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(default)]
    pub items: Vec<MenuItem>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuSection {
    pub title: String,
    #[serde(default)]
    pub categories: Vec<MenuCategory>,
}

impl MenuSection {
    pub fn empty(title: &str) -> Self {
        Self {
            title: title.to_string(),
            categories: Vec::new(),
        }
    }
}

/// The fixed set of named sections every catalog carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SectionKind {
    Starters,
    Mains,
    Beverages,
    Sides,
}

impl SectionKind {
    /// Canonical document order.
    pub const ORDER: [SectionKind; 4] = [
        SectionKind::Starters,
        SectionKind::Mains,
        SectionKind::Beverages,
        SectionKind::Sides,
    ];

    pub fn palette(self) -> Palette {
        match self {
            SectionKind::Starters => Palette::Ember,
            SectionKind::Mains => Palette::Terracotta,
            SectionKind::Beverages => Palette::Lagoon,
            SectionKind::Sides => Palette::Olive,
        }
    }
}

/// A read-only snapshot of the venue's whole menu.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuCatalog {
    pub starters: MenuSection,
    pub mains: MenuSection,
    pub beverages: MenuSection,
    pub sides: MenuSection,
}

impl MenuCatalog {
    /// Sections in canonical document order.
    pub fn sections(&self) -> [(SectionKind, &MenuSection); 4] {
        [
            (SectionKind::Starters, &self.starters),
            (SectionKind::Mains, &self.mains),
            (SectionKind::Beverages, &self.beverages),
            (SectionKind::Sides, &self.sides),
        ]
    }

    pub fn empty() -> Self {
        Self {
            starters: MenuSection::empty("Starters"),
            mains: MenuSection::empty("Mains"),
            beverages: MenuSection::empty("Beverages"),
            sides: MenuSection::empty("Sides"),
        }
    }
}
