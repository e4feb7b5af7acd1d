use std::collections::HashMap;

use crate::error::{BatchError, BatchResult};
use crate::geometry::{Size2, TexelRect};
use crate::texture::{self, TextureHandle};

use super::glyph::{Glyph, GlyphSource, Kerning};
use super::region::{self, CharacterRegion};

/// Static glyph data of one sprite font.
///
/// Characters are mapped to glyphs through a sorted list of
/// [`CharacterRegion`]s, so a lookup costs `O(log R)` in the number of regions
/// instead of a table sized by the covered code point range.
#[derive(Clone, Debug)]
pub struct GlyphCatalog {
    glyphs: Vec<Glyph>,
    regions: Vec<CharacterRegion>,
    default_character: Option<char>,
    default_glyph_index: Option<usize>,

    texture: TextureHandle,
    texel_size: Size2,

    height_spacing: f32,
    width_spacing: f32,
}

impl GlyphCatalog {
    /// Builds a catalog from glyph descriptions sorted by character.
    ///
    /// Fails with [`BatchError::InvalidLayout`] when the characters are not
    /// strictly ascending and with [`BatchError::UnresolvableCharacter`] when
    /// `default_character` is not part of the font.
    pub fn new(
        texture: TextureHandle,
        texture_size: Size2,
        glyphs: &[GlyphSource],
        line_spacing: f32,
        spacing: f32,
        default_character: Option<char>,
    ) -> BatchResult<Self> {
        let regions = region::build_regions(glyphs.iter().map(|glyph| glyph.character))?;

        let mut catalog = Self {
            glyphs: glyphs.iter().map(Glyph::new).collect(),
            regions,
            default_character: None,
            default_glyph_index: None,
            texture,
            texel_size: texture::texel_size(texture_size),
            height_spacing: line_spacing,
            width_spacing: spacing,
        };
        catalog.set_default_character(default_character)?;

        log::debug!(
            "glyph catalog built: {} glyphs in {} regions",
            catalog.glyphs.len(),
            catalog.regions.len()
        );

        Ok(catalog)
    }

    /// Builds a catalog from the parallel lists a font asset ships with.
    ///
    /// `kerning[i]` carries the left bearing, advance width and right bearing
    /// of `characters[i]`.
    pub fn from_parts(
        texture: TextureHandle,
        texture_size: Size2,
        glyph_bounds: &[TexelRect],
        cropping: &[TexelRect],
        characters: &[char],
        line_spacing: f32,
        spacing: f32,
        kerning: &[Kerning],
        default_character: Option<char>,
    ) -> BatchResult<Self> {
        let expected = characters.len();
        for (field, found) in [
            ("glyph_bounds", glyph_bounds.len()),
            ("cropping", cropping.len()),
            ("kerning", kerning.len()),
        ] {
            if found != expected {
                return Err(BatchError::MismatchedGlyphData {
                    field,
                    expected,
                    found,
                });
            }
        }

        let sources = characters
            .iter()
            .zip(glyph_bounds)
            .zip(cropping)
            .zip(kerning)
            .map(|(((&character, &bounds), &cropping), &kerning)| GlyphSource {
                character,
                bounds_in_texture: bounds,
                cropping,
                kerning,
            })
            .collect::<Vec<_>>();

        Self::new(
            texture,
            texture_size,
            &sources,
            line_spacing,
            spacing,
            default_character,
        )
    }
}

/// Accessors.
impl GlyphCatalog {
    pub fn glyphs(&self) -> &[Glyph] {
        &self.glyphs
    }

    pub fn glyph(&self, index: usize) -> Option<&Glyph> {
        self.glyphs.get(index)
    }

    pub fn regions(&self) -> &[CharacterRegion] {
        &self.regions
    }

    /// Characters covered by the font, in glyph order.
    pub fn characters(&self) -> impl Iterator<Item = char> + '_ {
        self.glyphs.iter().map(|glyph| glyph.character)
    }

    /// Copies the glyphs into a map keyed by character.
    pub fn glyph_map(&self) -> HashMap<char, Glyph, fxhash::FxBuildHasher> {
        let mut map =
            HashMap::with_capacity_and_hasher(self.glyphs.len(), fxhash::FxBuildHasher::default());
        for glyph in &self.glyphs {
            map.insert(glyph.character, *glyph);
        }
        map
    }

    pub fn texture(&self) -> TextureHandle {
        self.texture
    }

    /// Size of one texel in normalized texture coordinates.
    pub fn texel_size(&self) -> Size2 {
        self.texel_size
    }

    /// Vertical distance between two lines.
    pub fn height_spacing(&self) -> f32 {
        self.height_spacing
    }

    pub fn set_height_spacing(&mut self, spacing: f32) {
        self.height_spacing = spacing;
    }

    /// Extra horizontal space inserted between two glyphs.
    pub fn width_spacing(&self) -> f32 {
        self.width_spacing
    }

    pub fn set_width_spacing(&mut self, spacing: f32) {
        self.width_spacing = spacing;
    }

    pub fn default_character(&self) -> Option<char> {
        self.default_character
    }

    pub fn default_glyph_index(&self) -> Option<usize> {
        self.default_glyph_index
    }

    /// Sets the glyph substituted for characters the font does not cover.
    ///
    /// The character is resolved immediately; an unknown character leaves the
    /// previous setting untouched. `None` disables substitution.
    pub fn set_default_character(&mut self, character: Option<char>) -> BatchResult<()> {
        let index = match character {
            Some(c) => Some(self.resolve(c).ok_or(BatchError::UnresolvableCharacter(c))?),
            None => None,
        };

        self.default_character = character;
        self.default_glyph_index = index;
        Ok(())
    }
}

/// Character resolution.
impl GlyphCatalog {
    /// Looks up the glyph index of `c` without substitution.
    pub fn resolve(&self, c: char) -> Option<usize> {
        region::find_glyph_index(&self.regions, c)
    }

    /// Like [`Self::resolve`] but reports a missing character as an error.
    pub fn glyph_index(&self, c: char) -> BatchResult<usize> {
        self.resolve(c).ok_or(BatchError::UnresolvableCharacter(c))
    }

    /// Resolves `c`, falling back to the default character's glyph.
    pub fn glyph_index_or_default(&self, c: char) -> BatchResult<usize> {
        self.resolve(c)
            .or(self.default_glyph_index)
            .ok_or(BatchError::UnresolvableCharacter(c))
    }

    /// Resolves every character of `text` into `indices` and returns the line
    /// count.
    ///
    /// `indices` is cleared first and ends up with one slot per `char`, in
    /// order. Line breaks (`'\n'`) and carriage returns (`'\r'`) are never
    /// looked up and keep a `None` slot. Every other character resolves to its
    /// own glyph or to the default glyph; when neither exists the whole call
    /// fails, so callers never act on a partially resolved string.
    pub fn resolve_text(&self, text: &str, indices: &mut Vec<Option<usize>>) -> BatchResult<usize> {
        indices.clear();
        indices.reserve(text.len());

        let mut lines = 1;
        let mut substituted = false;

        for c in text.chars() {
            match c {
                '\n' => {
                    lines += 1;
                    indices.push(None);
                }
                '\r' => indices.push(None),
                _ => {
                    let index = match self.resolve(c) {
                        Some(index) => index,
                        None => {
                            let index = self
                                .default_glyph_index
                                .ok_or(BatchError::UnresolvableCharacter(c))?;
                            if !substituted {
                                substituted = true;
                                log::warn!(
                                    "character {:?} is not in the font, substituting {:?}",
                                    c,
                                    self.default_character
                                );
                            }
                            index
                        }
                    };
                    indices.push(Some(index));
                }
            }
        }

        Ok(lines)
    }
}

/// Measuring.
impl GlyphCatalog {
    /// Computes the size of `text` as rendered with this font.
    ///
    /// The width is the farthest ink extent over all lines. The height counts
    /// one line spacing per line break plus the last line, which grows when one
    /// of its glyphs is cropped taller than the line spacing.
    pub fn measure_string(&self, text: &str) -> BatchResult<Size2> {
        if text.is_empty() {
            return Ok(Size2::zero());
        }

        let mut width: f32 = 0.0;
        let mut last_line_height = self.height_spacing;
        let mut pen_x = 0.0;
        let mut pen_y = 0.0;
        let mut line_start = true;

        for c in text.chars() {
            match c {
                '\n' => {
                    last_line_height = self.height_spacing;
                    pen_x = 0.0;
                    pen_y += self.height_spacing;
                    line_start = true;
                    continue;
                }
                '\r' => continue,
                _ => {}
            }

            let glyph = &self.glyphs[self.glyph_index_or_default(c)?];
            if line_start {
                pen_x = glyph.left_bearing;
                line_start = false;
            } else {
                pen_x += self.width_spacing + glyph.left_bearing;
            }

            pen_x += glyph.width;
            width = width.max(pen_x + glyph.right_bearing);
            pen_x += glyph.right_bearing;

            last_line_height = last_line_height.max(glyph.cropping.height() as f32);
        }

        Ok(Size2::new(width, pen_y + last_line_height))
    }
}
