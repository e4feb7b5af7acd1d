use crate::batch::{DrawSink, SpriteBatch};
use crate::error::BatchResult;
use crate::font::GlyphCatalog;
use crate::geometry::{self, Color, Flip, Point2, Vec2};
use crate::text::ColorRunSource;
use crate::transform::Transform;
use crate::viewport::{Space, Viewport};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
/// Horizontal justification of each line inside the text block.
pub enum HorizontalAlign {
    #[default]
    Left,
    Center,
    Right,
}

/// Where and how a block of text is drawn.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct TextPlacement {
    pub transform: Transform,
    pub alignment: HorizontalAlign,
    /// Mirroring on top of the one implied by negative scale components.
    pub flip: Flip,
    pub space: Space,
}

impl TextPlacement {
    pub fn new(transform: Transform) -> Self {
        Self {
            transform,
            ..Self::default()
        }
    }

    pub fn with_alignment(mut self, alignment: HorizontalAlign) -> Self {
        self.alignment = alignment;
        self
    }

    pub fn with_flip(mut self, flip: Flip) -> Self {
        self.flip = flip;
        self
    }

    pub fn with_space(mut self, space: Space) -> Self {
        self.space = space;
        self
    }
}

/// Axes of a text block after rotation and scale.
///
/// `up` is the rotated `+Y` axis, which points down the screen when the block
/// is not rotated; lines advance along it.
#[derive(Clone, Copy, Debug, PartialEq)]
struct Directions {
    right: Vec2,
    up: Vec2,
}

impl Directions {
    fn new(scale: Vec2, degrees: f32) -> Self {
        Self {
            right: geometry::rotate(Vec2::new(scale.x, 0.0), degrees),
            up: geometry::rotate(Vec2::new(0.0, scale.y), degrees),
        }
    }

    fn left(&self) -> Vec2 {
        -self.right
    }

    fn down(&self) -> Vec2 {
        -self.up
    }
}

/// Reusable buffers of the text engine.
#[derive(Debug, Default)]
pub(crate) struct LayoutScratch {
    glyph_indices: Vec<Option<usize>>,
    /// Per line: `x` is the advance, `y` the tallest bitmap.
    line_extents: Vec<Vec2>,
    line_origins: Vec<Point2>,
}

impl LayoutScratch {
    pub fn with_capacity(glyphs: usize, lines: usize) -> Self {
        Self {
            glyph_indices: Vec::with_capacity(glyphs),
            line_extents: Vec::with_capacity(lines),
            line_origins: Vec::with_capacity(lines),
        }
    }

    /// Fills `line_extents` from the glyph indices resolved for `text` and
    /// returns the block width.
    fn measure_lines(&mut self, font: &GlyphCatalog, text: &str) -> f32 {
        self.line_extents.clear();
        self.line_extents.push(Vec2::zero());

        let mut block_width: f32 = 0.0;
        let mut line_start = true;

        for (c, slot) in text.chars().zip(&self.glyph_indices) {
            if c == '\n' {
                self.line_extents.push(Vec2::zero());
                line_start = true;
                continue;
            }
            let Some(index) = *slot else {
                continue;
            };
            let Some(glyph) = font.glyph(index) else {
                continue;
            };
            let Some(extent) = self.line_extents.last_mut() else {
                continue;
            };

            if line_start {
                line_start = false;
                extent.x += glyph.width + glyph.right_bearing;
            } else {
                extent.x += font.width_spacing() + glyph.width_including_bearings();
            }
            extent.y = extent.y.max(glyph.bounds_in_texture.height() as f32);
            block_width = block_width.max(extent.x);
        }

        block_width
    }
}

/// Text.
impl<S: DrawSink, V: Viewport> SpriteBatch<S, V> {
    /// Lays out `text` with `font` and emits one quad per glyph in `color`.
    ///
    /// Lines are separated by `'\n'`; `'\r'` is ignored. Characters missing
    /// from the font are replaced by its default character. Without one the
    /// call fails with
    /// [`BatchError::UnresolvableCharacter`](crate::BatchError::UnresolvableCharacter)
    /// before anything is emitted.
    ///
    /// A missing font, an empty string or an inactive batch draws nothing.
    pub fn draw_text(
        &mut self,
        font: Option<&GlyphCatalog>,
        text: &str,
        color: Color,
        placement: &TextPlacement,
    ) -> BatchResult<()> {
        self.emit_text(font, text, color, |_| None, placement)
    }

    /// Like [`Self::draw_text`], with colors taken from `rich`.
    pub fn draw_rich_text<R>(
        &mut self,
        font: Option<&GlyphCatalog>,
        rich: &R,
        placement: &TextPlacement,
    ) -> BatchResult<()>
    where
        R: ColorRunSource + ?Sized,
    {
        self.emit_text(
            font,
            rich.text(),
            rich.default_color(),
            |index| rich.color_at(index),
            placement,
        )
    }

    fn emit_text(
        &mut self,
        font: Option<&GlyphCatalog>,
        text: &str,
        default_color: Color,
        color_at: impl Fn(usize) -> Option<Color>,
        placement: &TextPlacement,
    ) -> BatchResult<()> {
        let Some(font) = font else {
            log::trace!("text without font, ignored");
            return Ok(());
        };
        if !self.is_active() {
            log::trace!("draw_text outside a session, ignored");
            return Ok(());
        }
        if text.is_empty() {
            return Ok(());
        }

        let line_count = font.resolve_text(text, &mut self.scratch.glyph_indices)?;
        let block_width = self.scratch.measure_lines(font, text);
        let line_spacing = font.height_spacing();
        let block_height = line_spacing * line_count as f32;

        let transform = &placement.transform;
        let rotation = match placement.space {
            Space::World => transform.rotation - self.viewport.rotation(),
            Space::Camera => transform.rotation,
        };
        let dir = Directions::new(transform.scale, rotation);

        let pivot_offset = dir.down() * ((1.0 - transform.pivot.y) * 0.5 * block_height)
            + dir.left() * ((transform.pivot.x + 1.0) * 0.5 * block_width);
        let origin = self.viewport.anchor_point(placement.space, transform.anchor)
            + Vec2::new(
                transform.position.x * self.pixel_scale,
                -transform.position.y * self.pixel_scale,
            )
            + pivot_offset;

        self.scratch.line_origins.clear();
        let mut line_offset = dir.up * self.scratch.line_extents[0].y;
        for extent in &self.scratch.line_extents {
            let slack = block_width - extent.x;
            let alignment_offset = match placement.alignment {
                HorizontalAlign::Left => Vec2::zero(),
                HorizontalAlign::Center => dir.right * (slack / 2.0),
                HorizontalAlign::Right => dir.right * slack,
            };
            self.scratch
                .line_origins
                .push(origin + line_offset + alignment_offset);
            line_offset += dir.up * line_spacing;
        }

        let flip = placement.flip.combined_with_scale(transform.scale);
        let texel = font.texel_size();
        let depth = transform.depth;

        let mut color = default_color;
        let mut line = 0;
        let mut line_start = true;
        let mut pen = self.scratch.line_origins[0];

        for (index, c) in text.chars().enumerate() {
            if let Some(next) = color_at(index) {
                color = next;
            }

            if c == '\n' {
                line += 1;
                line_start = true;
                pen = self.scratch.line_origins[line];
                continue;
            }
            let Some(glyph) = self.scratch.glyph_indices[index].and_then(|i| font.glyph(i)) else {
                continue;
            };

            if line_start {
                line_start = false;
            } else {
                pen += dir.right * glyph.left_bearing;
            }

            let bounds = glyph.bounds_in_texture;
            let bitmap_width = bounds.width() as f32;
            let top = dir.down() * (line_spacing - glyph.cropping.min_y() as f32);
            let bottom =
                dir.up * (bounds.height() as f32 + glyph.cropping.min_y() as f32 - line_spacing);

            let u0 = bounds.min_x() as f32 * texel.width;
            let u1 = bounds.max_x() as f32 * texel.width;
            let v0 = bounds.min_y() as f32 * texel.height;
            let v1 = bounds.max_y() as f32 * texel.height;

            let item = self.items.next_item();
            item.texture = font.texture();
            item.sort_key = depth;
            item.top_left.place(pen + top, depth, color, Point2::new(u0, v0));
            item.bottom_left.place(pen + bottom, depth, color, Point2::new(u0, v1));
            pen += dir.right * bitmap_width;
            item.top_right.place(pen + top, depth, color, Point2::new(u1, v0));
            item.bottom_right.place(pen + bottom, depth, color, Point2::new(u1, v1));
            item.apply_flip(flip);

            pen += dir.right * (glyph.right_bearing + font.width_spacing());

            self.try_flush();
        }

        Ok(())
    }
}

#[allow(clippy::unwrap_used)]
#[cfg(test)]
mod tests {
    use super::*;
    use crate::batch::{BatchItem, DrawRecorder, RenderConfig};
    use crate::error::BatchError;
    use crate::font::fixtures::{self, LINE_SPACING};
    use crate::font::{GlyphSource, Kerning};
    use crate::geometry::{Size2, WHITE};
    use crate::text::RichText;
    use crate::texture::TextureHandle;
    use crate::viewport::FixedViewport;
    use approx::{assert_abs_diff_eq, assert_relative_eq};

    type TestBatch = SpriteBatch<DrawRecorder, FixedViewport>;

    const RED: Color = Color::new(255, 0, 0, 255);
    const BLUE: Color = Color::new(0, 0, 255, 255);

    fn init_logger() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    fn batch() -> TestBatch {
        let mut batch = SpriteBatch::new(
            DrawRecorder::new(),
            FixedViewport::new(Size2::new(200.0, 100.0)),
        );
        batch.begin(RenderConfig::default()).unwrap();
        batch
    }

    fn top_left_pivot() -> TextPlacement {
        TextPlacement::new(Transform::default().with_pivot(Vec2::new(-1.0, 1.0)))
            .with_space(Space::Camera)
    }

    fn finish(batch: &mut TestBatch) -> Vec<BatchItem> {
        batch.end().unwrap();
        batch.sink().items().copied().collect()
    }

    fn point(item: &BatchItem) -> [f32; 2] {
        [item.top_left.position[0], item.top_left.position[1]]
    }

    #[test]
    fn test_empty_text_draws_nothing() {
        let font = fixtures::plain_font();
        let mut batch = batch();
        batch.draw_text(Some(&font), "", WHITE, &top_left_pivot()).unwrap();
        batch.draw_text(None, "ABC", WHITE, &top_left_pivot()).unwrap();
        assert!(finish(&mut batch).is_empty());
    }

    #[test]
    fn test_inactive_batch_draws_nothing() {
        let font = fixtures::plain_font();
        let mut batch = SpriteBatch::new(
            DrawRecorder::new(),
            FixedViewport::new(Size2::new(200.0, 100.0)),
        );
        batch.draw_text(Some(&font), "ABC", WHITE, &top_left_pivot()).unwrap();
        assert!(batch.pending().is_empty());
    }

    #[test]
    fn test_single_line_geometry() {
        let font = fixtures::plain_font();
        let mut batch = batch();
        batch.draw_text(Some(&font), "AB", WHITE, &top_left_pivot()).unwrap();
        let items = finish(&mut batch);
        assert_eq!(items.len(), 2);

        // Anchor at (100, 50), first line seeded one bitmap height (16) down.
        // Quads span from pen - 20 to pen - 4.
        let a = &items[0];
        assert_eq!(a.texture, TextureHandle(1));
        assert_eq!(a.top_left.position, [100.0, 46.0, 0.0]);
        assert_eq!(a.top_right.position, [110.0, 46.0, 0.0]);
        assert_eq!(a.bottom_left.position, [100.0, 62.0, 0.0]);
        assert_eq!(a.bottom_right.position, [110.0, 62.0, 0.0]);
        assert_eq!(point(&items[1]), [110.0, 46.0]);

        // 'B' sits at texels 10..20 of a 64 x 32 atlas.
        let b = &items[1];
        assert_relative_eq!(b.top_left.uv[0], 10.0 / 64.0);
        assert_relative_eq!(b.top_right.uv[0], 20.0 / 64.0);
        assert_relative_eq!(b.top_left.uv[1], 0.0);
        assert_relative_eq!(b.bottom_left.uv[1], 16.0 / 32.0);
    }

    #[test]
    fn test_lines_advance_by_line_spacing() {
        let font = fixtures::plain_font();
        let mut batch = batch();
        batch.draw_text(Some(&font), "AB\r\nC\nE", WHITE, &top_left_pivot()).unwrap();
        let items = finish(&mut batch);

        let corners: Vec<[f32; 2]> = items.iter().map(point).collect();
        assert_eq!(
            corners,
            vec![
                [100.0, 46.0],
                [110.0, 46.0],
                [100.0, 46.0 + LINE_SPACING],
                [100.0, 46.0 + 2.0 * LINE_SPACING],
            ]
        );
    }

    #[test]
    fn test_alignment() {
        let font = fixtures::plain_font();
        let left_edges = |alignment: HorizontalAlign| -> Vec<f32> {
            let mut batch = batch();
            let placement = top_left_pivot().with_alignment(alignment);
            batch.draw_text(Some(&font), "ABC\nA", WHITE, &placement).unwrap();
            finish(&mut batch).iter().map(|item| point(item)[0]).collect()
        };

        // Block width 30, second line 10: slack 20.
        assert_eq!(left_edges(HorizontalAlign::Left)[3], 100.0);
        assert_eq!(left_edges(HorizontalAlign::Center)[3], 110.0);
        assert_eq!(left_edges(HorizontalAlign::Right)[3], 120.0);
        // The widest line never moves.
        for alignment in [HorizontalAlign::Left, HorizontalAlign::Center, HorizontalAlign::Right] {
            assert_eq!(left_edges(alignment)[..3], [100.0, 110.0, 120.0]);
        }
    }

    #[test]
    fn test_pivot_centers_block() {
        let font = fixtures::plain_font();
        let mut batch = batch();
        let placement = TextPlacement::new(Transform::default()).with_space(Space::Camera);
        batch.draw_text(Some(&font), "AB", WHITE, &placement).unwrap();
        let items = finish(&mut batch);

        // Block 20 x 20 centered: shifted left by 10 and up by 10.
        assert_eq!(point(&items[0]), [90.0, 36.0]);
    }

    #[test]
    fn test_block_height_counts_line_spacing_per_line() {
        let glyphs = [
            fixtures::source('a', 0, 10, 16, Kerning::new(0.0, 10.0, 0.0)),
            fixtures::source('t', 10, 10, 32, Kerning::new(0.0, 10.0, 0.0)),
        ];
        let font = GlyphCatalog::new(
            TextureHandle(2),
            Size2::new(32.0, 32.0),
            &glyphs,
            LINE_SPACING,
            0.0,
            None,
        )
        .unwrap();

        let mut batch = batch();
        let placement = TextPlacement::new(Transform::default()).with_space(Space::Camera);
        batch.draw_text(Some(&font), "a\nt\na", WHITE, &placement).unwrap();
        let items = finish(&mut batch);

        // Block 10 x (3 * 20) centered on (100, 50): origin (95, 20). The tall
        // glyph on the middle line does not grow the block.
        let corners: Vec<[f32; 2]> = items.iter().map(point).collect();
        assert_eq!(corners, vec![[95.0, 16.0], [95.0, 36.0], [95.0, 56.0]]);
        assert_eq!(items[1].bottom_left.position[1], 68.0);
    }

    #[test]
    fn test_position_uses_pixel_scale() {
        let font = fixtures::plain_font();
        let mut batch = SpriteBatch::new(
            DrawRecorder::new(),
            FixedViewport::new(Size2::new(200.0, 100.0)).with_pixel_scale(2.0),
        );
        batch.begin(RenderConfig::default()).unwrap();
        let mut placement = top_left_pivot();
        placement.transform.position = Vec2::new(3.0, 4.0);
        batch.draw_text(Some(&font), "A", WHITE, &placement).unwrap();
        let items = finish(&mut batch);

        // +Y goes up the screen; glyph size is unaffected by the pixel scale.
        assert_eq!(point(&items[0]), [106.0, 38.0]);
        assert_eq!(items[0].top_right.position[0], 116.0);
    }

    fn bearing_font(a: Kerning, b: Kerning, spacing: f32) -> GlyphCatalog {
        let glyphs = [
            fixtures::source('a', 0, 6, 10, a),
            fixtures::source('b', 6, 6, 10, b),
        ];
        GlyphCatalog::new(
            TextureHandle(2),
            Size2::new(16.0, 16.0),
            &glyphs,
            LINE_SPACING,
            spacing,
            None,
        )
        .unwrap()
    }

    #[test]
    fn test_bearings_and_spacing() {
        let font = bearing_font(
            Kerning::new(-1.0, 6.0, 2.0),
            Kerning::new(1.0, 6.0, -1.0),
            0.5,
        );

        let mut batch = batch();
        batch.draw_text(Some(&font), "ab", WHITE, &top_left_pivot()).unwrap();
        let items = finish(&mut batch);

        // a: leading, no bearing; pen 6, then + 2 + 0.5.
        // b: + 1 left bearing.
        assert_relative_eq!(items[0].top_left.position[0], 100.0);
        assert_relative_eq!(items[0].top_right.position[0], 106.0);
        assert_relative_eq!(items[1].top_left.position[0], 109.5);
    }

    #[test]
    fn test_negative_bearing_does_not_pull_glyphs_together() {
        let font = bearing_font(
            Kerning::new(0.0, 6.0, 0.0),
            Kerning::new(-2.0, 6.0, 0.0),
            0.0,
        );

        let mut plain = batch();
        plain.draw_text(Some(&font), "ab", WHITE, &top_left_pivot()).unwrap();
        let items = finish(&mut plain);
        let left_edges: Vec<f32> = items.iter().map(|item| point(item)[0]).collect();
        assert_eq!(left_edges, vec![100.0, 106.0]);

        // Right-aligned lines use the same clamped advance as the pen.
        let mut aligned = batch();
        let placement = top_left_pivot().with_alignment(HorizontalAlign::Right);
        aligned.draw_text(Some(&font), "ab\na", WHITE, &placement).unwrap();
        let items = finish(&mut aligned);
        assert_eq!(point(&items[2])[0], 106.0);
        assert_relative_eq!(font.measure_string("ab").unwrap().width, 12.0);
    }

    #[test]
    fn test_cropping_moves_glyph_down() {
        let glyphs = [GlyphSource {
            character: 'a',
            bounds_in_texture: euclid::rect(0, 0, 8, 8),
            cropping: euclid::rect(0, 6, 8, 8),
            kerning: Kerning::new(0.0, 8.0, 0.0),
        }];
        let font = GlyphCatalog::new(
            TextureHandle(2),
            Size2::new(16.0, 16.0),
            &glyphs,
            LINE_SPACING,
            0.0,
            None,
        )
        .unwrap();

        let mut batch = batch();
        batch.draw_text(Some(&font), "a", WHITE, &top_left_pivot()).unwrap();
        let items = finish(&mut batch);

        // Line seeded 8 down; top at 58 - (20 - 6), bottom at 58 + (8 + 6 - 20).
        assert_eq!(items[0].top_left.position[1], 44.0);
        assert_eq!(items[0].bottom_left.position[1], 52.0);
    }

    #[test]
    fn test_rotation() {
        let font = fixtures::plain_font();
        let mut batch = batch();
        let mut placement = top_left_pivot();
        placement.transform.rotation = 90.0;
        batch.draw_text(Some(&font), "AB", WHITE, &placement).unwrap();
        let items = finish(&mut batch);

        // Right points up the screen, +Y points right.
        assert_abs_diff_eq!(items[0].top_left.position[0], 96.0, epsilon = 1e-4);
        assert_abs_diff_eq!(items[0].top_left.position[1], 50.0, epsilon = 1e-4);
        assert_abs_diff_eq!(items[1].top_left.position[0], 96.0, epsilon = 1e-4);
        assert_abs_diff_eq!(items[1].top_left.position[1], 40.0, epsilon = 1e-4);
    }

    #[test]
    fn test_world_space_subtracts_camera_rotation() {
        let font = fixtures::plain_font();
        let viewport = FixedViewport::new(Size2::new(200.0, 100.0)).with_rotation(90.0);
        let mut batch = SpriteBatch::new(DrawRecorder::new(), viewport);
        batch.begin(RenderConfig::default()).unwrap();

        let placement = top_left_pivot().with_space(Space::World);
        batch.draw_text(Some(&font), "A", WHITE, &placement).unwrap();
        let mut rotated = placement;
        rotated.space = Space::Camera;
        rotated.transform.rotation = -90.0;
        batch.draw_text(Some(&font), "A", WHITE, &rotated).unwrap();

        let items = finish(&mut batch);
        for (world, camera) in items[0].vertices().iter().zip(items[1].vertices()) {
            assert_abs_diff_eq!(world.position[0], camera.position[0], epsilon = 1e-4);
            assert_abs_diff_eq!(world.position[1], camera.position[1], epsilon = 1e-4);
        }
    }

    #[test]
    fn test_flip_laws() {
        let font = fixtures::plain_font();
        let draw = |flip: Flip, scale: Vec2| -> BatchItem {
            let mut batch = batch();
            let mut placement = top_left_pivot().with_flip(flip);
            placement.transform.scale = scale;
            batch.draw_text(Some(&font), "A", WHITE, &placement).unwrap();
            finish(&mut batch)[0]
        };
        let unit = Vec2::new(1.0, 1.0);
        let plain = draw(Flip::NONE, unit);

        assert_eq!(draw(Flip::BOTH, unit), plain);

        let horizontal = draw(Flip::HORIZONTAL, unit);
        assert_eq!(horizontal.top_left, plain.top_right);
        assert_eq!(horizontal.bottom_right, plain.bottom_left);

        let vertical = draw(Flip::VERTICAL, unit);
        assert_eq!(vertical.top_left, plain.bottom_left);
        assert_eq!(vertical.top_right, plain.bottom_right);

        // A negative X scale already counts as a horizontal flip.
        let mirrored = draw(Flip::NONE, Vec2::new(-1.0, 1.0));
        let unmirrored = draw(Flip::HORIZONTAL, Vec2::new(-1.0, 1.0));
        assert_eq!(mirrored.top_left.uv, plain.top_right.uv);
        assert_eq!(unmirrored.top_left.uv, plain.top_left.uv);
    }

    #[test]
    fn test_rich_text_colors() {
        let font = fixtures::plain_font();
        let mut rich = RichText::new(WHITE);
        rich.append("A", None);
        rich.append("B\nC", Some(RED));
        rich.append("", Some(WHITE));
        rich.set_color_at(3, BLUE);
        rich.append("E", None);

        let mut batch = batch();
        batch.draw_rich_text(Some(&font), &rich, &top_left_pivot()).unwrap();
        let items = finish(&mut batch);

        let colors: Vec<Color> = items.iter().map(|item| item.top_left.color).collect();
        assert_eq!(colors, vec![WHITE, RED, BLUE, WHITE]);
        assert!(items.iter().all(|item| item.bottom_right.color == item.top_left.color));
    }

    #[test]
    fn test_plain_text_color() {
        let font = fixtures::plain_font();
        let mut batch = batch();
        batch.draw_text(Some(&font), "AB", RED, &top_left_pivot()).unwrap();
        let items = finish(&mut batch);
        assert!(items.iter().all(|item| item.top_left.color == RED));
    }

    #[test]
    fn test_unresolvable_character_aborts_before_emitting() {
        init_logger();
        let mut font = fixtures::plain_font();
        let mut batch = batch();
        assert_eq!(
            batch.draw_text(Some(&font), "ABZ", WHITE, &top_left_pivot()),
            Err(BatchError::UnresolvableCharacter('Z'))
        );
        assert!(batch.pending().is_empty());

        font.set_default_character(Some('E')).unwrap();
        batch.draw_text(Some(&font), "ABZ", WHITE, &top_left_pivot()).unwrap();
        let items = finish(&mut batch);
        assert_eq!(items.len(), 3);
        assert_relative_eq!(items[2].top_left.uv[0], 30.0 / 64.0);
    }

    #[test]
    fn test_text_counts_towards_auto_flush() {
        let font = fixtures::plain_font();
        let mut batch = batch();
        batch.config_mut().flush_threshold = 2;
        batch.draw_text(Some(&font), "ABC", WHITE, &top_left_pivot()).unwrap();
        assert_eq!(batch.sink().flushes.len(), 1);
        assert_eq!(batch.pending().len(), 1);

        let items = finish(&mut batch);
        assert_eq!(items.len(), 3);
        // The second submission still continues the same line.
        assert_eq!(point(&items[2]), [120.0, 46.0]);
    }
}
