//! Deterministic page planning.
//!
//! [`plan`] turns a catalog snapshot into the ordered page sequence of one
//! document: a cover, an intro, the content pages of every section in
//! canonical order, and a closing outro. The same inputs always produce a
//! structurally identical plan, which makes plans safe to recompute, cache,
//! and compare in golden tests.

use carta_menu::{MenuCatalog, MenuItem};
use carta_pricing::PriceAdjustment;
use carta_types::Palette;
use itertools::Itertools;
use log::debug;
use std::borrow::Cow;

/// Items a single content page can carry.
pub const ITEMS_PER_PAGE: usize = 6;

/// One planned page. Every variant carries the palette it renders under.
#[derive(Debug, Clone, PartialEq)]
pub enum Page {
    Cover { palette: Palette },
    Intro { palette: Palette },
    Content(ContentPage),
    /// The closing page; doubles as the back cover of the printed document.
    Outro { palette: Palette },
}

impl Page {
    pub fn palette(&self) -> Palette {
        match self {
            Page::Cover { palette }
            | Page::Intro { palette }
            | Page::Outro { palette } => *palette,
            Page::Content(content) => content.palette,
        }
    }
}

/// A page of at most [`ITEMS_PER_PAGE`] items under one category heading.
#[derive(Debug, Clone, PartialEq)]
pub struct ContentPage {
    pub section_title: String,
    pub category_title: String,
    pub items: Vec<MenuItem>,
    /// True for the second and later pages of a category whose items
    /// overflow a single page.
    pub continues: bool,
    pub palette: Palette,
}

impl ContentPage {
    /// Category heading as rendered: continuation pages get a suffix.
    pub fn display_title(&self) -> Cow<'_, str> {
        if self.continues {
            Cow::Owned(format!("{} (contd.)", self.category_title))
        } else {
            Cow::Borrowed(&self.category_title)
        }
    }
}

/// The ordered page sequence of one document. A pure derived value of
/// `(catalog, adjustment)`; recompute it rather than mutating it.
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentPlan {
    pages: Vec<Page>,
}

impl DocumentPlan {
    pub fn pages(&self) -> &[Page] {
        &self.pages
    }

    pub fn len(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Page> {
        self.pages.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Page> {
        self.pages.iter()
    }
}

/// Builds the page sequence for `catalog`, applying `adjustment` to every
/// price when present. The catalog itself is never modified; adjusted items
/// are copies living only inside the returned plan.
pub fn plan(catalog: &MenuCatalog, adjustment: Option<PriceAdjustment>) -> DocumentPlan {
    let mut pages = Vec::new();
    pages.push(Page::Cover { palette: Palette::Brand });
    pages.push(Page::Intro { palette: Palette::Brand });

    for (kind, section) in catalog.sections() {
        let palette = kind.palette();
        let mut section_pages = 0usize;
        for category in &section.categories {
            if category.items.is_empty() {
                continue;
            }
            let items: Vec<MenuItem> = match adjustment {
                Some(adj) => category
                    .items
                    .iter()
                    .map(|item| carta_pricing::adjust_item(item, adj.percent))
                    .collect(),
                None => category.items.clone(),
            };
            let chunks = items.into_iter().chunks(ITEMS_PER_PAGE);
            for (chunk_index, chunk) in (&chunks).into_iter().enumerate() {
                pages.push(Page::Content(ContentPage {
                    section_title: section.title.clone(),
                    category_title: category.title.clone(),
                    items: chunk.collect(),
                    continues: chunk_index > 0,
                    palette,
                }));
                section_pages += 1;
            }
        }
        debug!("planned {} content page(s) for {:?}", section_pages, kind);
    }

    pages.push(Page::Outro { palette: Palette::Brand });
    DocumentPlan { pages }
}
