use super::config::{BatchConfig, RenderConfig};
use super::item::{BatchItem, ItemPool};
use super::sink::{DrawCalls, DrawRun, DrawSink};
use crate::error::{BatchError, BatchResult};
use crate::geometry::{self, Point2, Vec2};
use crate::text::LayoutScratch;
use crate::texture::TextureView;
use crate::transform::Transform;
use crate::viewport::{Space, Viewport};

/// Counters accumulated since the batch was created.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BatchStats {
    /// Quads handed to the sink.
    pub quads: usize,
    /// Texture runs handed to the sink.
    pub draw_calls: usize,
    /// Non-empty submissions, manual and automatic.
    pub flushes: usize,
}

/// Collects textured quads between [`begin`](Self::begin) and
/// [`end`](Self::end) and submits them to a [`DrawSink`] sorted by key and
/// grouped by texture.
///
/// Item storage and layout scratch are reused across sessions; after warm-up a
/// frame does not allocate.
pub struct SpriteBatch<S, V> {
    pub(crate) sink: S,
    pub(crate) viewport: V,
    pub(crate) config: BatchConfig,

    render_config: RenderConfig,
    active: bool,
    pub(crate) pixel_scale: f32,
    flush_counter: usize,

    pub(crate) items: ItemPool,
    runs: Vec<DrawRun>,
    pub(crate) scratch: LayoutScratch,

    stats: BatchStats,
}

impl<S: DrawSink, V: Viewport> SpriteBatch<S, V> {
    pub fn new(sink: S, viewport: V) -> Self {
        Self::with_config(sink, viewport, BatchConfig::default())
    }

    pub fn with_config(sink: S, viewport: V, config: BatchConfig) -> Self {
        Self {
            items: ItemPool::with_capacity(config.item_capacity),
            runs: Vec::new(),
            scratch: LayoutScratch::with_capacity(
                config.glyph_index_capacity,
                config.line_origin_capacity,
            ),
            sink,
            viewport,
            config,
            render_config: RenderConfig::default(),
            active: false,
            pixel_scale: 1.0,
            flush_counter: 0,
            stats: BatchStats::default(),
        }
    }

    pub fn config(&self) -> &BatchConfig {
        &self.config
    }

    pub fn config_mut(&mut self) -> &mut BatchConfig {
        &mut self.config
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    pub fn viewport(&self) -> &V {
        &self.viewport
    }

    pub fn viewport_mut(&mut self) -> &mut V {
        &mut self.viewport
    }

    pub fn into_parts(self) -> (S, V) {
        (self.sink, self.viewport)
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Render state of the current or last session.
    pub fn render_config(&self) -> &RenderConfig {
        &self.render_config
    }

    /// Items accumulated since the last flush, in insertion order.
    pub fn pending(&self) -> &[BatchItem] {
        self.items.active()
    }

    pub fn stats(&self) -> BatchStats {
        self.stats
    }
}

/// Session.
impl<S: DrawSink, V: Viewport> SpriteBatch<S, V> {
    /// Opens a session.
    ///
    /// The viewport's pixel scale is read here and stays fixed until the
    /// session ends, even across automatic flushes of the same frame.
    pub fn begin(&mut self, render_config: RenderConfig) -> BatchResult<()> {
        if self.active {
            return Err(BatchError::AlreadyActive);
        }

        self.render_config = render_config;
        self.pixel_scale = self.viewport.pixel_scale();
        self.flush_counter = 0;
        self.active = true;
        Ok(())
    }

    /// Hands out a zeroed item for the caller to fill in.
    ///
    /// Returns `None` outside a session. Items created here do not count
    /// towards the automatic flush threshold.
    pub fn create_item(&mut self) -> Option<&mut BatchItem> {
        if !self.active {
            log::trace!("create_item outside a session, ignored");
            return None;
        }

        Some(self.items.next_item())
    }

    /// Sorts the accumulated items, submits them and closes the session.
    pub fn end(&mut self) -> BatchResult<()> {
        if !self.active {
            return Err(BatchError::NotActive("end"));
        }

        self.submit();
        self.active = false;
        Ok(())
    }

    /// Submits everything accumulated so far and starts over with the same
    /// render configuration and pixel scale.
    pub fn reload(&mut self) -> BatchResult<()> {
        if !self.active {
            return Err(BatchError::NotActive("reload"));
        }

        let pixel_scale = self.pixel_scale;
        self.end()?;
        self.begin(self.render_config)?;
        self.pixel_scale = pixel_scale;
        Ok(())
    }

    /// Counts one emitted quad and reloads once the threshold is reached.
    pub fn try_flush(&mut self) {
        if !self.active || !self.config.auto_flush {
            return;
        }

        self.flush_counter += 1;
        if self.flush_counter < self.config.flush_threshold {
            return;
        }

        log::debug!("auto flush after {} quads", self.flush_counter);
        if let Err(err) = self.reload() {
            log::error!("auto flush failed: {err}");
        }
    }

    fn submit(&mut self) {
        let items = self.items.active_mut();
        // `sort_by` is stable: equal keys keep insertion order. Negative NaN
        // sorts first, positive NaN last.
        items.sort_by(|a, b| a.sort_key.total_cmp(&b.sort_key));

        self.runs.clear();
        for (index, item) in items.iter().enumerate() {
            match self.runs.last_mut() {
                Some(run) if run.texture == item.texture => run.range.end = index + 1,
                _ => self.runs.push(DrawRun {
                    texture: item.texture,
                    range: index..index + 1,
                }),
            }
        }

        if !self.runs.is_empty() {
            log::trace!(
                "submitting {} quads in {} draw calls",
                items.len(),
                self.runs.len()
            );

            self.sink.draw(
                &self.render_config,
                DrawCalls {
                    items,
                    runs: &self.runs,
                },
            );

            self.stats.quads += items.len();
            self.stats.draw_calls += self.runs.len();
            self.stats.flushes += 1;
        }

        self.items.clear();
    }
}

/// Sprites.
impl<S: DrawSink, V: Viewport> SpriteBatch<S, V> {
    /// Draws one textured quad of `scale × pixel scale` pixels.
    ///
    /// A view without texture draws nothing. Negative scale components mirror
    /// the texture coordinates on that axis.
    pub fn draw_sprite(&mut self, view: &TextureView, transform: &Transform, space: Space) {
        let Some(texture) = view.texture else {
            log::trace!("sprite without texture, ignored");
            return;
        };
        if !self.active {
            log::trace!("draw_sprite outside a session, ignored");
            return;
        }

        let rotation = match space {
            Space::World => transform.rotation - self.viewport.rotation(),
            Space::Camera => transform.rotation,
        };
        let pixel_scale = self.pixel_scale;
        let origin = self.viewport.anchor_point(space, transform.anchor)
            + Vec2::new(
                transform.position.x * pixel_scale,
                -transform.position.y * pixel_scale,
            );

        let width = (transform.scale.x * pixel_scale).abs();
        let height = (transform.scale.y * pixel_scale).abs();
        let top_left = Vec2::new(
            -(transform.pivot.x + 1.0) / 2.0 * width,
            -(1.0 - transform.pivot.y) / 2.0 * height,
        );
        let corner =
            |offset: Vec2| -> Point2 { origin + geometry::rotate(top_left + offset, rotation) };

        let (mut u0, mut u1) = (view.uv.min.x, view.uv.max.x);
        let (mut v0, mut v1) = (view.uv.min.y, view.uv.max.y);
        if transform.scale.x < 0.0 {
            std::mem::swap(&mut u0, &mut u1);
        }
        if transform.scale.y < 0.0 {
            std::mem::swap(&mut v0, &mut v1);
        }

        let depth = transform.depth;
        let color = view.color;
        let item = self.items.next_item();
        item.texture = texture;
        item.sort_key = depth;
        item.top_left.place(corner(Vec2::zero()), depth, color, Point2::new(u0, v0));
        item.top_right.place(corner(Vec2::new(width, 0.0)), depth, color, Point2::new(u1, v0));
        item.bottom_left.place(corner(Vec2::new(0.0, height)), depth, color, Point2::new(u0, v1));
        item.bottom_right.place(
            corner(Vec2::new(width, height)),
            depth,
            color,
            Point2::new(u1, v1),
        );

        self.try_flush();
    }
}
