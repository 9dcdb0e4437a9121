//! The fixed page template catalog: cover, intro, content, outro.
//!
//! Every function here is a pure mapping from (page data, branding) to a
//! display list. Measurements are in logical surface units.

use crate::PAGE_SIZE;
use crate::PageLayout;
use crate::context::{LayoutContext, TextLine, line_height};
use crate::elements::{LayoutElement, RectElement, TextAlign};
use crate::palette::PaletteSpec;
use carta_menu::{Dietary, MenuItem, Price, VenueBranding, VenueKind};
use carta_plan::ContentPage;
use carta_types::{Color, Rect};

const MARGIN: f32 = 56.0;
const HEADER_HEIGHT: f32 = 120.0;
const ACCENT_BAND: f32 = 10.0;
const LOGO_EDGE: f32 = 160.0;
const DIET_MARKER: f32 = 12.0;
const CHIP_HEIGHT: f32 = 16.0;
const TIER_COLUMN_WIDTH: f32 = 96.0;
const DESCRIPTION_MAX_LINES: usize = 2;

fn page_shell(spec: PaletteSpec) -> LayoutContext {
    let mut page = LayoutContext::new(Rect::new(0.0, 0.0, PAGE_SIZE.width, PAGE_SIZE.height));
    page.push_at(
        0.0,
        0.0,
        PAGE_SIZE.width,
        PAGE_SIZE.height,
        LayoutElement::Rect(RectElement { fill: spec.page, corner_radius: 0.0 }),
    );
    page
}

fn finish(page: LayoutContext) -> PageLayout {
    let (elements, asset_refs) = page.into_parts();
    PageLayout { size: PAGE_SIZE, elements, asset_refs }
}

fn diet_color(dietary: Dietary) -> Color {
    match dietary {
        Dietary::Veg => Color::rgb(46, 125, 50),
        Dietary::NonVeg => Color::rgb(183, 28, 28),
        Dietary::Egg => Color::rgb(221, 164, 56),
    }
}

pub fn cover(branding: &VenueBranding, spec: PaletteSpec) -> PageLayout {
    let mut page = page_shell(spec);
    page.band(ACCENT_BAND, spec.band);

    let mut body = LayoutContext::new(Rect::new(
        MARGIN,
        0.0,
        PAGE_SIZE.width - MARGIN * 2.0,
        PAGE_SIZE.height,
    ));
    body.advance(260.0);
    if let Some(logo) = &branding.logo {
        body.centered_image(logo, LOGO_EDGE, LOGO_EDGE);
        body.advance(28.0);
    }
    body.line(
        TextLine::new(&branding.name, 42.0, spec.heading)
            .bold()
            .align(TextAlign::Center),
    );
    body.advance(6.0);
    if let Some(subtitle) = &branding.subtitle {
        body.line(TextLine::new(subtitle, 17.0, spec.muted).align(TextAlign::Center));
    }
    body.advance(18.0);
    match branding.kind {
        VenueKind::House => {
            // The stock venue ships with a sample-card marker under the
            // wordmark; operator venues never show it.
            body.line(
                TextLine::new("H O U S E   S A M P L E   C A R D", 12.0, spec.accent)
                    .align(TextAlign::Center),
            );
        }
        VenueKind::Custom => {}
    }
    page.merge(body);

    page.text_at(
        0.0,
        PAGE_SIZE.height - 96.0,
        PAGE_SIZE.width,
        TextLine::new("M E N U", 15.0, spec.accent).align(TextAlign::Center),
    );
    page.push_at(
        0.0,
        PAGE_SIZE.height - ACCENT_BAND,
        PAGE_SIZE.width,
        ACCENT_BAND,
        LayoutElement::Rect(RectElement { fill: spec.band, corner_radius: 0.0 }),
    );
    finish(page)
}

pub fn intro(branding: &VenueBranding, spec: PaletteSpec) -> PageLayout {
    let mut page = page_shell(spec);
    page.band(ACCENT_BAND, spec.band);

    let mut body = LayoutContext::new(Rect::new(
        MARGIN,
        0.0,
        PAGE_SIZE.width - MARGIN * 2.0,
        PAGE_SIZE.height,
    ));
    body.advance(180.0);
    body.line(
        TextLine::new("Welcome", 30.0, spec.heading)
            .bold()
            .align(TextAlign::Center),
    );
    body.advance(10.0);
    body.rule(spec.accent);
    body.advance(26.0);
    let welcome = format!(
        "{} is delighted to have you at the table. Every plate is prepared \
         fresh to order from seasonal produce, and our kitchen is happy to \
         adapt dishes to your taste.",
        branding.name
    );
    body.paragraph(TextLine::new(&welcome, 14.0, spec.body).align(TextAlign::Center));
    body.advance(20.0);
    body.paragraph(
        TextLine::new(
            "Please let our staff know about any allergies or dietary \
             preferences before ordering.",
            12.0,
            spec.muted,
        )
        .align(TextAlign::Center),
    );
    page.merge(body);
    finish(page)
}

pub fn content(content: &ContentPage, branding: &VenueBranding, spec: PaletteSpec) -> PageLayout {
    let mut page = page_shell(spec);

    // Header band: section over category, light on dark.
    page.push_at(
        0.0,
        0.0,
        PAGE_SIZE.width,
        HEADER_HEIGHT,
        LayoutElement::Rect(RectElement { fill: spec.band, corner_radius: 0.0 }),
    );
    let section_caps = content.section_title.to_uppercase();
    page.text_at(
        0.0,
        26.0,
        PAGE_SIZE.width,
        TextLine::new(&section_caps, 13.0, spec.page).align(TextAlign::Center),
    );
    page.text_at(
        0.0,
        52.0,
        PAGE_SIZE.width,
        TextLine::new(&content.display_title(), 28.0, spec.page)
            .bold()
            .align(TextAlign::Center),
    );

    let mut body = LayoutContext::new(Rect::new(
        MARGIN,
        HEADER_HEIGHT + 28.0,
        PAGE_SIZE.width - MARGIN * 2.0,
        PAGE_SIZE.height - HEADER_HEIGHT - 28.0 - 64.0,
    ));
    for (index, item) in content.items.iter().enumerate() {
        if index > 0 {
            body.advance(10.0);
            body.rule(Color::gray(222));
            body.advance(12.0);
        }
        item_block(&mut body, item, spec);
    }
    page.merge(body);

    // Footer: venue sign-off.
    page.text_at(
        0.0,
        PAGE_SIZE.height - 44.0,
        PAGE_SIZE.width,
        TextLine::new(&branding.name, 11.0, spec.muted).align(TextAlign::Center),
    );
    finish(page)
}

fn item_block(body: &mut LayoutContext, item: &MenuItem, spec: PaletteSpec) {
    let width = body.bounds().width;
    let name_size = 15.0;
    let row_y = body.cursor_y();

    // Dietary marker sits in front of the name.
    let name_x = if let Some(dietary) = item.dietary {
        body.push_at(
            0.0,
            row_y + 3.0,
            DIET_MARKER,
            DIET_MARKER,
            LayoutElement::Rect(RectElement {
                fill: diet_color(dietary),
                corner_radius: 2.0,
            }),
        );
        DIET_MARKER + 8.0
    } else {
        0.0
    };

    body.text_at(
        name_x,
        row_y,
        width - name_x,
        TextLine::new(&item.name, name_size, spec.heading).bold(),
    );
    if let Price::Single(price) = &item.price {
        body.text_at(
            0.0,
            row_y,
            width,
            TextLine::new(price, name_size, spec.heading)
                .bold()
                .align(TextAlign::Right),
        );
    }
    body.advance(line_height(name_size) + 2.0);

    let labels = item.badges.labels();
    if !labels.is_empty() {
        let mut x = name_x;
        let chip_y = body.cursor_y();
        for label in labels {
            let chip_width = label.chars().count() as f32 * 6.2 + 16.0;
            body.push_at(
                x,
                chip_y,
                chip_width,
                CHIP_HEIGHT,
                LayoutElement::Rect(RectElement { fill: spec.accent, corner_radius: 3.0 }),
            );
            body.text_at(
                x,
                chip_y + 2.0,
                chip_width,
                TextLine::new(label, 9.0, spec.page).align(TextAlign::Center),
            );
            x += chip_width + 8.0;
        }
        body.advance(CHIP_HEIGHT + 6.0);
    }

    match &item.price {
        Price::Single(_) => {}
        Price::HalfFull { half, full } => {
            tier_row(body, &[("HALF", half.as_str()), ("FULL", full.as_str())], spec);
        }
        Price::Tiered(tiers) => {
            let columns: Vec<(&str, &str)> = tiers
                .iter()
                .map(|tier| (tier.label.as_str(), tier.price.as_str()))
                .collect();
            tier_row(body, &columns, spec);
        }
    }

    if let Some(description) = &item.description {
        let desc_size = 11.0;
        let per_line = crate::context::max_chars(width, desc_size);
        for line in crate::context::wrap(description, per_line)
            .into_iter()
            .take(DESCRIPTION_MAX_LINES)
        {
            body.line(TextLine::new(&line, desc_size, spec.body));
        }
    }

    let mut meta = Vec::new();
    if let Some(level) = item.spice_level.filter(|l| *l > 0) {
        meta.push("●".repeat(level.min(3) as usize));
    }
    if let Some(calories) = item.calories {
        meta.push(format!("{} kcal", calories));
    }
    if !meta.is_empty() {
        body.line(TextLine::new(&meta.join("  ·  "), 10.0, spec.muted));
    }

    if let Some(note) = &item.discount_note {
        body.line(TextLine::new(note, 11.0, spec.accent).italic());
    }
}

/// A row of size-tier columns: label over price, left to right in source
/// order. Serves both tiered items and half/full pairs.
fn tier_row(body: &mut LayoutContext, columns: &[(&str, &str)], spec: PaletteSpec) {
    let count = columns.len().max(1) as f32;
    let column_width = TIER_COLUMN_WIDTH.min(body.bounds().width / count);
    let label_y = body.cursor_y();
    let price_y = label_y + line_height(9.0);
    for (index, (label, price)) in columns.iter().enumerate() {
        let x = index as f32 * column_width;
        body.text_at(
            x,
            label_y,
            column_width,
            TextLine::new(label, 9.0, spec.muted).align(TextAlign::Center),
        );
        body.text_at(
            x,
            price_y,
            column_width,
            TextLine::new(price, 13.0, spec.heading)
                .bold()
                .align(TextAlign::Center),
        );
    }
    body.advance(line_height(9.0) + line_height(13.0) + 4.0);
}

pub fn outro(branding: &VenueBranding, spec: PaletteSpec) -> PageLayout {
    let mut page = page_shell(spec);
    page.band(ACCENT_BAND, spec.band);

    let mut body = LayoutContext::new(Rect::new(
        MARGIN,
        0.0,
        PAGE_SIZE.width - MARGIN * 2.0,
        PAGE_SIZE.height,
    ));
    body.advance(420.0);
    body.line(
        TextLine::new("Thank You", 34.0, spec.heading)
            .bold()
            .align(TextAlign::Center),
    );
    body.advance(8.0);
    body.rule(spec.accent);
    body.advance(24.0);
    body.line(TextLine::new(&branding.name, 16.0, spec.body).align(TextAlign::Center));
    if let Some(subtitle) = &branding.subtitle {
        body.line(TextLine::new(subtitle, 13.0, spec.muted).align(TextAlign::Center));
    }
    body.advance(12.0);
    let handle = format!("@{}", branding.slug);
    body.line(TextLine::new(&handle, 12.0, spec.accent).align(TextAlign::Center));
    page.merge(body);

    page.push_at(
        0.0,
        PAGE_SIZE.height - ACCENT_BAND,
        PAGE_SIZE.width,
        ACCENT_BAND,
        LayoutElement::Rect(RectElement { fill: spec.band, corner_radius: 0.0 }),
    );
    finish(page)
}
