//! Draws one frame of sprites and text and logs the resulting draw calls.
//!
//! Run with `RUST_LOG=debug` to see auto flushes.

use hierarchy_batch::batch::DrawCalls;
use hierarchy_batch::font::{GlyphSource, Kerning};
use hierarchy_batch::{
    BatchConfig, Color, FixedViewport, GlyphCatalog, HorizontalAlign, RenderConfig, RichText,
    Size2, Space, SpriteBatch, TextPlacement, TextureHandle, TextureView, Transform, Vec2, WHITE,
};

const FONT_TEXTURE: TextureHandle = TextureHandle(1);
const SHIP_TEXTURE: TextureHandle = TextureHandle(2);

/// Monospace atlas of printable ASCII, 16 glyphs per row.
fn ascii_font() -> Result<GlyphCatalog, hierarchy_batch::BatchError> {
    let glyphs: Vec<GlyphSource> = (' '..='~')
        .enumerate()
        .map(|(i, character)| {
            let x = (i % 16) as i32 * 8;
            let y = (i / 16) as i32 * 12;
            GlyphSource {
                character,
                bounds_in_texture: hierarchy_batch::euclid::rect(x, y, 8, 12),
                cropping: hierarchy_batch::euclid::rect(0, 2, 8, 12),
                kerning: Kerning::new(0.0, 8.0, 0.0),
            }
        })
        .collect();

    GlyphCatalog::new(
        FONT_TEXTURE,
        Size2::new(128.0, 72.0),
        &glyphs,
        14.0,
        1.0,
        Some('?'),
    )
}

fn log_draw_calls(config: &RenderConfig, calls: DrawCalls<'_>) {
    log::info!("flush with {:?} blending, {} draw calls", config.blend, calls.len());
    for call in calls.iter() {
        log::info!("  texture {:?}: {} quads", call.texture, call.items.len());
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let font = ascii_font()?;
    let viewport = FixedViewport::new(Size2::new(1280.0, 720.0)).with_pixel_scale(32.0);
    let config = BatchConfig {
        flush_threshold: 64,
        ..BatchConfig::default()
    };
    let mut batch = SpriteBatch::with_config(log_draw_calls, viewport, config);

    batch.begin(RenderConfig::default())?;

    let ship = TextureView::full(SHIP_TEXTURE);
    for i in 0..8 {
        let transform = Transform::at(Vec2::new(i as f32 - 4.0, 0.0))
            .with_rotation(i as f32 * 45.0)
            .with_depth(1.0);
        batch.draw_sprite(&ship, &transform, Space::World);
    }

    let title = TextPlacement::new(Transform::at(Vec2::new(0.0, 8.0)).with_depth(2.0))
        .with_alignment(HorizontalAlign::Center);
    batch.draw_text(Some(&font), "hierarchy batch\nfirst frame", WHITE, &title)?;

    let mut status = RichText::new(WHITE);
    status.append("hull: ", None);
    status.append("87%", Some(Color::new(96, 220, 96, 255)));
    status.append("  shield: ", None);
    status.append("12%", Some(Color::new(230, 64, 64, 255)));
    let hud = TextPlacement::new(
        Transform::default()
            .with_anchor(Vec2::new(-1.0, 1.0))
            .with_pivot(Vec2::new(-1.0, 1.0))
            .with_depth(3.0),
    )
    .with_space(Space::Camera);
    batch.draw_rich_text(Some(&font), &status, &hud)?;

    batch.end()?;

    let stats = batch.stats();
    log::info!(
        "{} quads in {} draw calls over {} flushes",
        stats.quads,
        stats.draw_calls,
        stats.flushes
    );
    Ok(())
}
