use crate::elements::{
    FontWeight, ImageElement, LayoutElement, PositionedElement, RectElement, RuleElement,
    TextAlign, TextElement,
};
use carta_types::{Color, Rect};

/// Average glyph width as a fraction of the font size, used to estimate
/// wrap points. The painter draws real glyph advances, but menu copy is
/// short enough that the estimate never visibly under-fills a line.
const GLYPH_WIDTH_RATIO: f32 = 0.52;

/// Line height as a fraction of the font size.
const LINE_HEIGHT_RATIO: f32 = 1.35;

/// A downward-flowing layout cursor over a bounded region of the page.
///
/// Elements are pushed in paint order; the cursor only ever advances, which
/// keeps every template a straight-line function of its inputs.
pub struct LayoutContext {
    bounds: Rect,
    cursor_y: f32,
    elements: Vec<PositionedElement>,
    asset_refs: Vec<String>,
}

impl LayoutContext {
    pub fn new(bounds: Rect) -> Self {
        Self {
            bounds,
            cursor_y: 0.0,
            elements: Vec::new(),
            asset_refs: Vec::new(),
        }
    }

    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    pub fn cursor_y(&self) -> f32 {
        self.cursor_y
    }

    pub fn advance(&mut self, dy: f32) {
        self.cursor_y += dy;
    }

    pub fn into_parts(self) -> (Vec<PositionedElement>, Vec<String>) {
        (self.elements, self.asset_refs)
    }

    /// Appends the elements and asset references of a nested region.
    pub fn merge(&mut self, other: LayoutContext) {
        let (elements, asset_refs) = other.into_parts();
        self.elements.extend(elements);
        self.asset_refs.extend(asset_refs);
    }

    /// Pushes a text line at an explicit position without moving the cursor.
    pub fn text_at(&mut self, x: f32, y: f32, width: f32, text: TextLine<'_>) {
        let height = line_height(text.font_size);
        self.push_at(x, y, width, height, LayoutElement::Text(text.into_element()));
    }

    /// Pushes an element at an offset relative to the region origin.
    pub fn push_at(&mut self, x: f32, y: f32, width: f32, height: f32, element: LayoutElement) {
        self.elements.push(PositionedElement {
            x: self.bounds.x + x,
            y: self.bounds.y + y,
            width,
            height,
            element,
        });
    }

    /// A full-width filled band at the cursor; advances past it.
    pub fn band(&mut self, height: f32, fill: Color) {
        let y = self.cursor_y;
        self.push_at(
            0.0,
            y,
            self.bounds.width,
            height,
            LayoutElement::Rect(RectElement { fill, corner_radius: 0.0 }),
        );
        self.advance(height);
    }

    /// A thin full-width divider at the cursor; advances past it.
    pub fn rule(&mut self, color: Color) {
        let y = self.cursor_y;
        self.push_at(
            0.0,
            y,
            self.bounds.width,
            1.0,
            LayoutElement::Rule(RuleElement { color }),
        );
        self.advance(1.0);
    }

    /// An image box at the cursor, horizontally centered; records the asset
    /// reference for the waiter and advances past the box.
    pub fn centered_image(&mut self, asset_ref: &str, width: f32, height: f32) {
        let x = (self.bounds.width - width) / 2.0;
        let y = self.cursor_y;
        self.push_at(
            x,
            y,
            width,
            height,
            LayoutElement::Image(ImageElement { asset_ref: asset_ref.to_string() }),
        );
        self.asset_refs.push(asset_ref.to_string());
        self.advance(height);
    }

    /// A single line of text at the cursor spanning the full region width;
    /// advances by the line height. Content is not wrapped.
    pub fn line(&mut self, text: TextLine<'_>) {
        let height = text.font_size * LINE_HEIGHT_RATIO;
        let y = self.cursor_y;
        self.push_at(
            0.0,
            y,
            self.bounds.width,
            height,
            LayoutElement::Text(text.into_element()),
        );
        self.advance(height);
    }

    /// A wrapped paragraph spanning the full region width; advances past
    /// every emitted line.
    pub fn paragraph(&mut self, text: TextLine<'_>) {
        let per_line = max_chars(self.bounds.width, text.font_size);
        for line in wrap(text.content, per_line) {
            self.line(TextLine { content: &line, ..text });
        }
    }
}

/// Builder-ish description of one text line, kept as a plain struct so
/// templates read declaratively.
#[derive(Clone, Copy)]
pub struct TextLine<'a> {
    pub content: &'a str,
    pub font_size: f32,
    pub weight: FontWeight,
    pub italic: bool,
    pub color: Color,
    pub align: TextAlign,
}

impl<'a> TextLine<'a> {
    pub fn new(content: &'a str, font_size: f32, color: Color) -> Self {
        Self {
            content,
            font_size,
            weight: FontWeight::Regular,
            italic: false,
            color,
            align: TextAlign::Left,
        }
    }

    pub fn bold(mut self) -> Self {
        self.weight = FontWeight::Bold;
        self
    }

    pub fn italic(mut self) -> Self {
        self.italic = true;
        self
    }

    pub fn align(mut self, align: TextAlign) -> Self {
        self.align = align;
        self
    }

    pub(crate) fn into_element(self) -> TextElement {
        TextElement {
            content: self.content.to_string(),
            font_size: self.font_size,
            weight: self.weight,
            italic: self.italic,
            color: self.color,
            align: self.align,
        }
    }
}

pub fn line_height(font_size: f32) -> f32 {
    font_size * LINE_HEIGHT_RATIO
}

/// Estimated character capacity of a line of `width` at `font_size`.
pub fn max_chars(width: f32, font_size: f32) -> usize {
    ((width / (font_size * GLYPH_WIDTH_RATIO)) as usize).max(1)
}

/// Greedy word wrap; words longer than a line get their own line rather
/// than being split.
pub fn wrap(text: &str, max_chars: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();
    for word in text.split_whitespace() {
        if !current.is_empty() && current.chars().count() + 1 + word.chars().count() > max_chars {
            lines.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrap_respects_limit() {
        let lines = wrap("slow cooked over charcoal with house spices", 16);
        assert!(lines.len() >= 2);
        for line in &lines {
            assert!(line.chars().count() <= 16, "line too long: {:?}", line);
        }
    }

    #[test]
    fn test_wrap_keeps_word_order() {
        let lines = wrap("one two three four", 9);
        assert_eq!(lines.join(" "), "one two three four");
    }

    #[test]
    fn test_wrap_overlong_word_gets_own_line() {
        let lines = wrap("a supercalifragilistic b", 10);
        assert!(lines.contains(&"supercalifragilistic".to_string()));
    }

    #[test]
    fn test_cursor_advances_through_band_and_line() {
        let mut ctx = LayoutContext::new(Rect::new(0.0, 0.0, 200.0, 400.0));
        ctx.band(40.0, Color::BLACK);
        ctx.line(TextLine::new("hello", 12.0, Color::BLACK));
        assert!(ctx.cursor_y() > 40.0);
        let (elements, _) = ctx.into_parts();
        assert_eq!(elements.len(), 2);
    }
}
