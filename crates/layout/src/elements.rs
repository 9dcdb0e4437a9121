use carta_types::Color;

/// An element placed at an absolute position on the logical surface.
#[derive(Debug, Clone, PartialEq)]
pub struct PositionedElement {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub element: LayoutElement,
}

#[derive(Debug, Clone, PartialEq)]
pub enum LayoutElement {
    Text(TextElement),
    Rect(RectElement),
    Rule(RuleElement),
    Image(ImageElement),
}

/// One line of text. Wrapping happens during layout, so the display list
/// only ever carries single lines.
#[derive(Debug, Clone, PartialEq)]
pub struct TextElement {
    pub content: String,
    pub font_size: f32,
    pub weight: FontWeight,
    pub italic: bool,
    pub color: Color,
    pub align: TextAlign,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontWeight {
    Regular,
    Bold,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAlign {
    Left,
    Center,
    Right,
}

/// A filled rectangle, optionally with rounded corners.
#[derive(Debug, Clone, PartialEq)]
pub struct RectElement {
    pub fill: Color,
    pub corner_radius: f32,
}

/// A thin horizontal divider.
#[derive(Debug, Clone, PartialEq)]
pub struct RuleElement {
    pub color: Color,
}

/// A placed raster image; `asset_ref` is resolved by the asset waiter
/// before capture. Unresolved images render as empty space.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageElement {
    pub asset_ref: String,
}
