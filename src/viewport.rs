//! Camera side of the batch: where anchors land on screen and how large a
//! logical unit is.

use crate::geometry::{Point2, Size2, Vec2};

/// Coordinate space of a drawn element.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Space {
    /// Follows the camera: moves and rotates with it.
    #[default]
    World,
    /// Fixed to the screen.
    Camera,
}

/// Camera information the batch reads while placing quads.
///
/// Anchors are normalized screen positions: `(-1, -1)` is the bottom-left
/// corner, `(1, 1)` the top-right one, `(0, 0)` the center.
pub trait Viewport {
    /// Screen pixels per logical unit.
    fn pixel_scale(&self) -> f32;

    /// Camera rotation in degrees.
    fn rotation(&self) -> f32;

    /// Screen point of `anchor` for world-space elements.
    fn anchor_world_inverse(&self, anchor: Vec2) -> Point2;

    /// Screen point of `anchor` for camera-space elements.
    fn anchor_camera_inverse(&self, anchor: Vec2) -> Point2;

    fn anchor_point(&self, space: Space, anchor: Vec2) -> Point2 {
        match space {
            Space::World => self.anchor_world_inverse(anchor),
            Space::Camera => self.anchor_camera_inverse(anchor),
        }
    }
}

/// Viewport with fixed screen size, position and rotation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FixedViewport {
    pub screen: Size2,
    pub pixel_scale: f32,
    /// Camera rotation in degrees.
    pub rotation: f32,
    /// Camera position in screen pixels, subtracted from world anchors.
    pub position: Vec2,
}

impl FixedViewport {
    pub fn new(screen: Size2) -> Self {
        Self {
            screen,
            pixel_scale: 1.0,
            rotation: 0.0,
            position: Vec2::zero(),
        }
    }

    pub fn with_pixel_scale(mut self, pixel_scale: f32) -> Self {
        self.pixel_scale = pixel_scale;
        self
    }

    pub fn with_rotation(mut self, degrees: f32) -> Self {
        self.rotation = degrees;
        self
    }

    pub fn with_position(mut self, position: Vec2) -> Self {
        self.position = position;
        self
    }
}

impl Viewport for FixedViewport {
    fn pixel_scale(&self) -> f32 {
        self.pixel_scale
    }

    fn rotation(&self) -> f32 {
        self.rotation
    }

    fn anchor_world_inverse(&self, anchor: Vec2) -> Point2 {
        self.anchor_camera_inverse(anchor) - self.position
    }

    fn anchor_camera_inverse(&self, anchor: Vec2) -> Point2 {
        Point2::new(
            (anchor.x + 1.0) / 2.0 * self.screen.width,
            (1.0 - anchor.y) / 2.0 * self.screen.height,
        )
    }
}

impl<V: Viewport + ?Sized> Viewport for &V {
    fn pixel_scale(&self) -> f32 {
        (**self).pixel_scale()
    }

    fn rotation(&self) -> f32 {
        (**self).rotation()
    }

    fn anchor_world_inverse(&self, anchor: Vec2) -> Point2 {
        (**self).anchor_world_inverse(anchor)
    }

    fn anchor_camera_inverse(&self, anchor: Vec2) -> Point2 {
        (**self).anchor_camera_inverse(anchor)
    }
}
