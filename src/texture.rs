use crate::geometry::{Color, Size2, TexelRect, UvRect, WHITE};

/// Opaque handle to a texture owned by the host graphics context.
///
/// The batch only compares handles to group quads into draw calls; it never
/// dereferences them.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TextureHandle(pub u64);

/// Part of a texture drawn by a sprite, together with its tint.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TextureView {
    pub texture: Option<TextureHandle>,
    pub color: Color,
    /// Normalized coordinates of the sampled area.
    pub uv: UvRect,
}

impl TextureView {
    /// The whole texture with a white tint.
    pub fn full(texture: TextureHandle) -> Self {
        Self {
            texture: Some(texture),
            color: WHITE,
            uv: UvRect::new(euclid::point2(0.0, 0.0), euclid::point2(1.0, 1.0)),
        }
    }

    /// A texel rectangle of a texture of `texture_size` pixels.
    pub fn from_texels(texture: TextureHandle, texture_size: Size2, rect: TexelRect) -> Self {
        Self {
            texture: Some(texture),
            color: WHITE,
            uv: texel_rect_to_uv(rect, texture_size),
        }
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }
}

/// Converts a texel rectangle into normalized coordinates.
pub fn texel_rect_to_uv(rect: TexelRect, texture_size: Size2) -> UvRect {
    let texel = texel_size(texture_size);
    UvRect::new(
        euclid::point2(rect.min_x() as f32 * texel.width, rect.min_y() as f32 * texel.height),
        euclid::point2(rect.max_x() as f32 * texel.width, rect.max_y() as f32 * texel.height),
    )
}

/// Size of one texel in normalized coordinates.
pub fn texel_size(texture_size: Size2) -> Size2 {
    Size2::new(1.0 / texture_size.width, 1.0 / texture_size.height)
}
