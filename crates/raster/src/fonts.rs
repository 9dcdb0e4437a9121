use carta_layout::FontWeight;
use once_cell::sync::Lazy;
use std::fmt;
use std::sync::Arc;

/// Font faces the painter draws glyphs with.
///
/// Face bytes are discovered from the system once per process (see
/// [`FontLibrary::shared`]). A library without faces is valid: text then
/// degrades to empty space, which headless CI environments rely on.
#[derive(Default, Clone)]
pub struct FontLibrary {
    regular: Option<Arc<Vec<u8>>>,
    bold: Option<Arc<Vec<u8>>>,
}

impl fmt::Debug for FontLibrary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FontLibrary")
            .field("regular", &self.regular.is_some())
            .field("bold", &self.bold.is_some())
            .finish()
    }
}

impl FontLibrary {
    /// A library with no faces at all; text is skipped during painting.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Builds a library from explicit face bytes.
    pub fn from_faces(regular: Option<Vec<u8>>, bold: Option<Vec<u8>>) -> Self {
        Self {
            regular: regular.map(Arc::new),
            bold: bold.map(Arc::new),
        }
    }

    /// Discovers a sans-serif pair from the system font database.
    #[cfg(feature = "system-fonts")]
    pub fn discover() -> Self {
        let mut db = fontdb::Database::new();
        db.load_system_fonts();
        let find = |weight: fontdb::Weight| -> Option<Arc<Vec<u8>>> {
            let query = fontdb::Query {
                families: &[fontdb::Family::SansSerif],
                weight,
                stretch: fontdb::Stretch::Normal,
                style: fontdb::Style::Normal,
            };
            let id = db.query(&query)?;
            db.with_face_data(id, |data, _| Arc::new(data.to_vec()))
        };
        let library = Self {
            regular: find(fontdb::Weight::NORMAL),
            bold: find(fontdb::Weight::BOLD),
        };
        if library.regular.is_none() {
            log::warn!("no system sans-serif face found; text will not be painted");
        }
        library
    }

    #[cfg(not(feature = "system-fonts"))]
    pub fn discover() -> Self {
        Self::empty()
    }

    /// The process-wide library, discovered on first use.
    pub fn shared() -> &'static FontLibrary {
        static SHARED: Lazy<FontLibrary> = Lazy::new(FontLibrary::discover);
        &SHARED
    }

    /// Face bytes for a weight; bold falls back to regular.
    pub fn face_data(&self, weight: FontWeight) -> Option<&Arc<Vec<u8>>> {
        match weight {
            FontWeight::Bold => self.bold.as_ref().or(self.regular.as_ref()),
            FontWeight::Regular => self.regular.as_ref(),
        }
    }

    pub fn has_faces(&self) -> bool {
        self.regular.is_some() || self.bold.is_some()
    }
}
