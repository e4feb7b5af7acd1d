use crate::geometry::TexelRect;

/// Horizontal metrics of a glyph as delivered by the font asset: the space
/// before the bitmap, the advance width and the space after it.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Kerning {
    pub left: f32,
    pub width: f32,
    pub right: f32,
}

impl Kerning {
    pub const fn new(left: f32, width: f32, right: f32) -> Self {
        Self { left, width, right }
    }
}

/// Raw description of one glyph, used to build a [`GlyphCatalog`](super::GlyphCatalog).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GlyphSource {
    pub character: char,
    pub bounds_in_texture: TexelRect,
    pub cropping: TexelRect,
    pub kerning: Kerning,
}

/// Metrics and atlas location of one renderable character.
///
/// `left_bearing` and `right_bearing` are clamped to zero and drive every pen
/// advance, so an overhanging glyph never pulls its neighbours closer. The
/// signed values the font asset delivered are kept in the `raw_*` fields.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Glyph {
    pub character: char,
    pub bounds_in_texture: TexelRect,
    pub cropping: TexelRect,
    pub left_bearing: f32,
    pub right_bearing: f32,
    pub raw_left_bearing: f32,
    pub raw_right_bearing: f32,
    pub width: f32,
}

impl Glyph {
    pub fn new(source: &GlyphSource) -> Self {
        let kerning = source.kerning;
        Self {
            character: source.character,
            bounds_in_texture: source.bounds_in_texture,
            cropping: source.cropping,
            left_bearing: kerning.left.max(0.0),
            right_bearing: kerning.right.max(0.0),
            raw_left_bearing: kerning.left,
            raw_right_bearing: kerning.right,
            width: kerning.width,
        }
    }

    pub fn width_including_bearings(&self) -> f32 {
        self.left_bearing + self.width + self.right_bearing
    }
}
