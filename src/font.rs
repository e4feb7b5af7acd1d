//! Sprite font data: glyph metrics and the character region index.

mod catalog;
mod glyph;
mod region;

pub use catalog::GlyphCatalog;
pub use glyph::{Glyph, GlyphSource, Kerning};
pub use region::{CharacterRegion, build_regions, find_glyph_index};

#[cfg(test)]
pub(crate) use catalog::tests as fixtures;
