use bytemuck::{Pod, Zeroable};

use crate::geometry::{Color, Flip, Point2};
use crate::texture::TextureHandle;

/// Vertex layout uploaded by the graphics context: position, color, texture
/// coordinate.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub color: Color,
    pub uv: [f32; 2],
}

impl Vertex {
    /// Places the vertex at `position` on layer `depth`.
    pub fn place(&mut self, position: Point2, depth: f32, color: Color, uv: Point2) {
        self.position = [position.x, position.y, depth];
        self.color = color;
        self.uv = [uv.x, uv.y];
    }
}

/// One textured quad waiting in the batch.
///
/// Vertices are stored in the order top-left, top-right, bottom-left,
/// bottom-right; the graphics context turns each item into two triangles with
/// that winding.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct BatchItem {
    pub texture: TextureHandle,
    /// Draw order key, usually the layer depth. Lower keys are drawn first.
    pub sort_key: f32,
    pub top_left: Vertex,
    pub top_right: Vertex,
    pub bottom_left: Vertex,
    pub bottom_right: Vertex,
}

impl Default for BatchItem {
    fn default() -> Self {
        Self {
            texture: TextureHandle::default(),
            sort_key: 0.0,
            top_left: Vertex::zeroed(),
            top_right: Vertex::zeroed(),
            bottom_left: Vertex::zeroed(),
            bottom_right: Vertex::zeroed(),
        }
    }
}

impl BatchItem {
    pub fn vertices(&self) -> [Vertex; 4] {
        [
            self.top_left,
            self.top_right,
            self.bottom_left,
            self.bottom_right,
        ]
    }

    /// Reorders the vertices for a mirrored quad.
    ///
    /// Only a single-axis flip changes anything: mirroring both axes keeps the
    /// original order.
    pub fn apply_flip(&mut self, flip: Flip) {
        if !flip.is_single_axis() {
            return;
        }

        if flip.horizontal {
            std::mem::swap(&mut self.top_left, &mut self.top_right);
            std::mem::swap(&mut self.bottom_left, &mut self.bottom_right);
        } else {
            std::mem::swap(&mut self.top_left, &mut self.bottom_left);
            std::mem::swap(&mut self.top_right, &mut self.bottom_right);
        }
    }
}

/// Grow-only store of batch items.
///
/// Items below `len` belong to the current accumulation cycle. Storage is kept
/// across cycles so steady-state frames do not allocate.
#[derive(Debug, Default)]
pub(crate) struct ItemPool {
    items: Vec<BatchItem>,
    len: usize,
}

impl ItemPool {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            items: Vec::with_capacity(capacity),
            len: 0,
        }
    }

    /// Hands out the next item, reset to its zero state.
    pub fn next_item(&mut self) -> &mut BatchItem {
        if self.len == self.items.len() {
            self.items.push(BatchItem::default());
        } else {
            self.items[self.len] = BatchItem::default();
        }

        self.len += 1;
        &mut self.items[self.len - 1]
    }

    pub fn active(&self) -> &[BatchItem] {
        &self.items[..self.len]
    }

    pub fn active_mut(&mut self) -> &mut [BatchItem] {
        &mut self.items[..self.len]
    }

    pub fn clear(&mut self) {
        self.len = 0;
    }
}
