//! # hierarchy-batch
//!
//! Glyph resolution and quad batching for 2D scene renderers.
//!
//! ## Overview
//!
//! A [`SpriteBatch`] collects textured quads between `begin` and `end`, sorts
//! them by layer depth and hands them to a [`DrawSink`] grouped by texture.
//! Text is laid out from a [`GlyphCatalog`], the glyph table of a sprite font
//! atlas, and emitted into the same batch as the sprites.
//!
//! ## Usage
//!
//! ```rust
//! use hierarchy_batch::font::{GlyphSource, Kerning};
//! use hierarchy_batch::{
//!     DrawRecorder, FixedViewport, GlyphCatalog, RenderConfig, Size2, Space, SpriteBatch,
//!     TextPlacement, TextureHandle, TextureView, Transform, WHITE,
//! };
//!
//! // 1. Describe the font atlas
//! let glyphs = [GlyphSource {
//!     character: 'a',
//!     bounds_in_texture: hierarchy_batch::euclid::rect(0, 0, 8, 12),
//!     cropping: hierarchy_batch::euclid::rect(0, 0, 8, 12),
//!     kerning: Kerning::new(0.0, 8.0, 1.0),
//! }];
//! let font = GlyphCatalog::new(TextureHandle(1), Size2::new(64.0, 64.0), &glyphs, 14.0, 1.0, None)?;
//!
//! // 2. Create a batch over a sink and a viewport
//! let viewport = FixedViewport::new(Size2::new(800.0, 600.0));
//! let mut batch = SpriteBatch::new(DrawRecorder::new(), viewport);
//!
//! // 3. Draw a frame
//! batch.begin(RenderConfig::default())?;
//! batch.draw_sprite(&TextureView::full(TextureHandle(2)), &Transform::default(), Space::World);
//! batch.draw_text(Some(&font), "aaa", WHITE, &TextPlacement::default())?;
//! batch.end()?;
//!
//! assert_eq!(batch.stats().quads, 4);
//! # Ok::<(), hierarchy_batch::BatchError>(())
//! ```
//!
//! ## Features
//!
//! *   **Sparse fonts**: characters resolve through sorted code point regions.
//! *   **Stable ordering**: equal depths draw in submission order.
//! *   **No per-frame allocation**: item storage and layout buffers are reused.

pub mod batch;
pub mod error;
pub mod font;
pub mod geometry;
pub mod text;
pub mod texture;
pub mod transform;
pub mod viewport;

// common re-exports
pub use batch::{
    BatchConfig, BatchItem, DrawRecorder, DrawSink, RenderConfig, SpriteBatch, Vertex,
};
pub use error::{BatchError, BatchResult};
pub use font::GlyphCatalog;
pub use geometry::{Color, Flip, Point2, Size2, Vec2, WHITE};
pub use text::{ColorRunSource, HorizontalAlign, RichText, TextPlacement};
pub use texture::{TextureHandle, TextureView};
pub use transform::Transform;
pub use viewport::{FixedViewport, Space, Viewport};

// re-export dependencies
pub use euclid;
pub use palette;
