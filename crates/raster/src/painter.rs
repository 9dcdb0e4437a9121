use crate::{Bitmap, CaptureError, FontLibrary};
use carta_assets::SettledAssets;
use carta_layout::{ImageElement, LayoutElement, PageLayout, PositionedElement, TextAlign, TextElement};
use carta_types::Color;
use log::{debug, warn};
use tiny_skia::{FillRule, Paint, PathBuilder, Pixmap, PixmapPaint, Transform};

/// Captures beyond this scale would allocate absurd surfaces; treat them as
/// caller bugs rather than trying.
const MAX_SCALE: f32 = 8.0;

/// Executes a display list into an RGBA bitmap of `layout.size * scale`.
///
/// Images come from `assets`; a reference that never settled paints as
/// empty space, while bytes that settled but cannot be decoded are a typed
/// capture failure. Text needs a face from `fonts` and is skipped without
/// one.
pub fn paint(
    layout: &PageLayout,
    assets: &SettledAssets,
    scale: f32,
    fonts: &FontLibrary,
) -> Result<Bitmap, CaptureError> {
    if !scale.is_finite() || scale <= 0.0 || scale > MAX_SCALE {
        return Err(CaptureError::InvalidScale(scale));
    }
    let width = (layout.size.width * scale).round() as u32;
    let height = (layout.size.height * scale).round() as u32;
    let mut pixmap =
        Pixmap::new(width, height).ok_or(CaptureError::Allocation { width, height })?;
    pixmap.fill(tiny_skia::Color::WHITE);

    for el in &layout.elements {
        match &el.element {
            LayoutElement::Rect(rect) => {
                fill_rect(
                    &mut pixmap,
                    el.x * scale,
                    el.y * scale,
                    el.width * scale,
                    el.height * scale,
                    rect.fill,
                );
            }
            LayoutElement::Rule(rule) => {
                // Rules stay visible at small scales.
                fill_rect(
                    &mut pixmap,
                    el.x * scale,
                    el.y * scale,
                    el.width * scale,
                    (el.height * scale).max(1.0),
                    rule.color,
                );
            }
            LayoutElement::Text(text) => {
                draw_text(&mut pixmap, el, text, scale, fonts);
            }
            LayoutElement::Image(img) => {
                draw_image(&mut pixmap, el, img, assets, scale)?;
            }
        }
    }

    Ok(unpremultiply(pixmap))
}

fn skia_color(color: Color) -> tiny_skia::Color {
    tiny_skia::Color::from_rgba8(color.r, color.g, color.b, 255)
}

fn fill_rect(pixmap: &mut Pixmap, x: f32, y: f32, width: f32, height: f32, color: Color) {
    let Some(rect) = tiny_skia::Rect::from_xywh(x, y, width, height) else {
        return;
    };
    let mut paint = Paint::default();
    paint.set_color(skia_color(color));
    paint.anti_alias = false;
    let _ = pixmap.fill_rect(rect, &paint, Transform::identity(), None);
}

/// Maps glyph outlines (font units, y-up) into the pixmap (pixels, y-down).
struct OutlineSink<'a> {
    builder: &'a mut PathBuilder,
    scale: f32,
    pen_x: f32,
    baseline_y: f32,
}

impl ttf_parser::OutlineBuilder for OutlineSink<'_> {
    fn move_to(&mut self, x: f32, y: f32) {
        self.builder
            .move_to(self.pen_x + x * self.scale, self.baseline_y - y * self.scale);
    }

    fn line_to(&mut self, x: f32, y: f32) {
        self.builder
            .line_to(self.pen_x + x * self.scale, self.baseline_y - y * self.scale);
    }

    fn quad_to(&mut self, x1: f32, y1: f32, x: f32, y: f32) {
        self.builder.quad_to(
            self.pen_x + x1 * self.scale,
            self.baseline_y - y1 * self.scale,
            self.pen_x + x * self.scale,
            self.baseline_y - y * self.scale,
        );
    }

    fn curve_to(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, x: f32, y: f32) {
        self.builder.cubic_to(
            self.pen_x + x1 * self.scale,
            self.baseline_y - y1 * self.scale,
            self.pen_x + x2 * self.scale,
            self.baseline_y - y2 * self.scale,
            self.pen_x + x * self.scale,
            self.baseline_y - y * self.scale,
        );
    }

    fn close(&mut self) {
        self.builder.close();
    }
}

fn char_advance(face: &ttf_parser::Face<'_>, ch: char, unit_scale: f32, px_size: f32) -> f32 {
    face.glyph_index(ch)
        .and_then(|gid| face.glyph_hor_advance(gid))
        .map(|advance| advance as f32 * unit_scale)
        .unwrap_or(px_size * 0.5)
}

fn draw_text(
    pixmap: &mut Pixmap,
    el: &PositionedElement,
    text: &TextElement,
    scale: f32,
    fonts: &FontLibrary,
) {
    let Some(data) = fonts.face_data(text.weight) else {
        debug!("no face for {:?}, skipping text {:?}", text.weight, text.content);
        return;
    };
    let face = match ttf_parser::Face::parse(data, 0) {
        Ok(face) => face,
        Err(e) => {
            warn!("unusable font face: {}", e);
            return;
        }
    };
    let units_per_em = face.units_per_em() as f32;
    if units_per_em <= 0.0 {
        return;
    }
    let px_size = text.font_size * scale;
    let unit_scale = px_size / units_per_em;

    let line_width: f32 = text
        .content
        .chars()
        .map(|ch| char_advance(&face, ch, unit_scale, px_size))
        .sum();
    let box_x = el.x * scale;
    let box_width = el.width * scale;
    let start_x = match text.align {
        TextAlign::Left => box_x,
        TextAlign::Center => box_x + (box_width - line_width) / 2.0,
        TextAlign::Right => box_x + box_width - line_width,
    };
    let baseline_y = el.y * scale + px_size * 1.05;

    let mut builder = PathBuilder::new();
    let mut pen_x = start_x;
    for ch in text.content.chars() {
        if let Some(gid) = face.glyph_index(ch) {
            let mut sink = OutlineSink {
                builder: &mut builder,
                scale: unit_scale,
                pen_x,
                baseline_y,
            };
            face.outline_glyph(gid, &mut sink);
        }
        pen_x += char_advance(&face, ch, unit_scale, px_size);
    }

    if let Some(path) = builder.finish() {
        let mut paint = Paint::default();
        paint.set_color(skia_color(text.color));
        paint.anti_alias = true;
        let _ = pixmap.fill_path(&path, &paint, FillRule::Winding, Transform::identity(), None);
    }
}

fn draw_image(
    pixmap: &mut Pixmap,
    el: &PositionedElement,
    img: &ImageElement,
    assets: &SettledAssets,
    scale: f32,
) -> Result<(), CaptureError> {
    let Some(bytes) = assets.get(&img.asset_ref) else {
        // Never settled: the page renders without it.
        debug!("asset {} absent at capture time", img.asset_ref);
        return Ok(());
    };
    let decoded = image::load_from_memory(bytes).map_err(|e| CaptureError::BadAsset {
        path: img.asset_ref.clone(),
        message: e.to_string(),
    })?;

    let target_w = (el.width * scale).round().max(1.0) as u32;
    let target_h = (el.height * scale).round().max(1.0) as u32;
    let resized = image::imageops::resize(
        &decoded.to_rgba8(),
        target_w,
        target_h,
        image::imageops::FilterType::Triangle,
    );
    let mut data = resized.into_raw();
    for px in data.chunks_exact_mut(4) {
        let alpha = px[3] as u16;
        px[0] = (px[0] as u16 * alpha / 255) as u8;
        px[1] = (px[1] as u16 * alpha / 255) as u8;
        px[2] = (px[2] as u16 * alpha / 255) as u8;
    }
    let size = tiny_skia::IntSize::from_wh(target_w, target_h).ok_or(CaptureError::Allocation {
        width: target_w,
        height: target_h,
    })?;
    let overlay = Pixmap::from_vec(data, size).ok_or(CaptureError::Allocation {
        width: target_w,
        height: target_h,
    })?;
    let _ = pixmap.draw_pixmap(
        (el.x * scale).round() as i32,
        (el.y * scale).round() as i32,
        overlay.as_ref(),
        &PixmapPaint::default(),
        Transform::identity(),
        None,
    );
    Ok(())
}

fn unpremultiply(pixmap: Pixmap) -> Bitmap {
    let width = pixmap.width();
    let height = pixmap.height();
    let mut data = Vec::with_capacity((width * height * 4) as usize);
    for px in pixmap.pixels() {
        let c = px.demultiply();
        data.extend_from_slice(&[c.red(), c.green(), c.blue(), c.alpha()]);
    }
    Bitmap::new(width, height, data)
}
