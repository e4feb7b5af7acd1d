//! Shared math and color types.
//!
//! **Y-axis goes down.** Every position handed to the batch lives in the
//! screen frame of the graphics context. "Up" direction vectors used by the
//! text engine are the rotated `+Y` axis, which points towards the bottom of
//! the screen before any rotation.

use euclid::{Angle, Rotation2D, UnknownUnit};

pub type Vec2 = euclid::default::Vector2D<f32>;
pub type Point2 = euclid::default::Point2D<f32>;
pub type Size2 = euclid::default::Size2D<f32>;
/// Pixel rectangle inside a texture (`origin` is the top-left texel).
pub type TexelRect = euclid::default::Rect<i32>;
/// Normalized texture-coordinate rectangle.
pub type UvRect = euclid::default::Box2D<f32>;

/// 8-bit sRGB color with straight alpha.
pub type Color = palette::Srgba<u8>;

pub const WHITE: Color = Color::new(255, 255, 255, 255);

/// Rotates `v` by `degrees` in the screen frame.
///
/// Positive angles turn counter-clockwise on screen, so the rotation applied in
/// the y-down frame is the negated angle.
pub fn rotate(v: Vec2, degrees: f32) -> Vec2 {
    Rotation2D::<f32, UnknownUnit, UnknownUnit>::new(Angle::degrees(-degrees)).transform_vector(v)
}

/// Mirroring requested for a quad or a block of quads.
///
/// Flips only reorder the four vertices of a quad; they never move them. A
/// negative scale component mirrors the geometry itself and counts as a flip
/// on that axis, see [`Flip::combined_with_scale`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Flip {
    pub horizontal: bool,
    pub vertical: bool,
}

impl Flip {
    pub const NONE: Flip = Flip::new(false, false);
    pub const HORIZONTAL: Flip = Flip::new(true, false);
    pub const VERTICAL: Flip = Flip::new(false, true);
    pub const BOTH: Flip = Flip::new(true, true);

    pub const fn new(horizontal: bool, vertical: bool) -> Self {
        Self {
            horizontal,
            vertical,
        }
    }

    /// Folds the sign of `scale` into the requested flip.
    pub fn combined_with_scale(self, scale: Vec2) -> Self {
        Self {
            horizontal: self.horizontal ^ (scale.x < 0.0),
            vertical: self.vertical ^ (scale.y < 0.0),
        }
    }

    /// `true` when exactly one axis is flipped. Flipping both axes is the same
    /// as flipping none.
    pub fn is_single_axis(self) -> bool {
        self.horizontal ^ self.vertical
    }
}

#[allow(clippy::unwrap_used)]
#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_rotate_quarter_turn() {
        // +X turns towards screen-up (-Y) for a positive angle.
        let v = rotate(Vec2::new(1.0, 0.0), 90.0);
        assert_abs_diff_eq!(v.x, 0.0, epsilon = 1e-6);
        assert_abs_diff_eq!(v.y, -1.0, epsilon = 1e-6);
    }

    #[test]
    fn test_flip_xor() {
        assert!(!Flip::NONE.is_single_axis());
        assert!(!Flip::BOTH.is_single_axis());
        assert!(Flip::HORIZONTAL.is_single_axis());
        assert!(Flip::VERTICAL.is_single_axis());

        let flip = Flip::HORIZONTAL.combined_with_scale(Vec2::new(-2.0, 1.0));
        assert_eq!(flip, Flip::NONE);
        let flip = Flip::NONE.combined_with_scale(Vec2::new(1.0, -1.0));
        assert_eq!(flip, Flip::VERTICAL);
    }
}
