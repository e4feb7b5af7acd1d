use crate::geometry::Vec2;

/// Placement of a sprite or text block, as read from the scene hierarchy.
///
/// `position` is in logical units relative to the anchor point with `+Y`
/// pointing up; the batch converts it to screen pixels. `pivot` is normalized
/// over the element's own box: `(-1, 1)` is its top-left corner, `(0, 0)` its
/// center.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform {
    pub position: Vec2,
    /// Degrees, counter-clockwise on screen.
    pub rotation: f32,
    pub scale: Vec2,
    pub anchor: Vec2,
    pub pivot: Vec2,
    /// Layer depth, also used as the draw order key.
    pub depth: f32,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec2::zero(),
            rotation: 0.0,
            scale: Vec2::new(1.0, 1.0),
            anchor: Vec2::zero(),
            pivot: Vec2::zero(),
            depth: 0.0,
        }
    }
}

impl Transform {
    pub fn at(position: Vec2) -> Self {
        Self {
            position,
            ..Self::default()
        }
    }

    pub fn with_rotation(mut self, degrees: f32) -> Self {
        self.rotation = degrees;
        self
    }

    pub fn with_scale(mut self, scale: Vec2) -> Self {
        self.scale = scale;
        self
    }

    pub fn with_anchor(mut self, anchor: Vec2) -> Self {
        self.anchor = anchor;
        self
    }

    pub fn with_pivot(mut self, pivot: Vec2) -> Self {
        self.pivot = pivot;
        self
    }

    pub fn with_depth(mut self, depth: f32) -> Self {
        self.depth = depth;
        self
    }
}
