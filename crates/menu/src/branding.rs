use serde::{Deserialize, Serialize};

/// Name of the stock venue that ships with the product demo. A branding
/// record for it gets the house treatment (tagline under the wordmark,
/// stock cover art); every other venue is `Custom`.
pub const HOUSE_VENUE_NAME: &str = "The Copper Kettle";

/// Whether a branding record is the stock demo venue or an operator's own.
///
/// Resolved exactly once when the record is built. Render code matches on
/// this tag and never re-derives the answer from the venue name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum VenueKind {
    House,
    Custom,
}

/// The venue identity a document is rendered under.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VenueBranding {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
    /// Asset reference for the venue logo, resolvable by an `AssetSource`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo: Option<String>,
    pub slug: String,
    pub kind: VenueKind,
}

impl VenueBranding {
    /// Builds a branding record, classifying the venue and deriving the
    /// slug in one place.
    pub fn new(name: impl Into<String>, subtitle: Option<String>, logo: Option<String>) -> Self {
        let name = name.into();
        let kind = if name == HOUSE_VENUE_NAME {
            VenueKind::House
        } else {
            VenueKind::Custom
        };
        let slug = slug::slugify(&name);
        Self {
            name,
            subtitle,
            logo,
            slug,
            kind,
        }
    }

    /// The stock demo venue.
    pub fn house() -> Self {
        Self::new(
            HOUSE_VENUE_NAME,
            Some("Kitchen & Bar".to_string()),
            None,
        )
    }

    /// Builds a branding record from a raw snapshot file entry, running
    /// classification exactly once at load time.
    pub fn from_record(record: BrandingRecord) -> Self {
        Self::new(record.name, record.subtitle, record.logo)
    }
}

/// The branding entry as it appears in snapshot files: identity only, no
/// derived fields. Classification and slug happen on load.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BrandingRecord {
    pub name: String,
    #[serde(default)]
    pub subtitle: Option<String>,
    #[serde(default)]
    pub logo: Option<String>,
}
