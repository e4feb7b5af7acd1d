/// Batch and render settings.
pub mod config;
/// Quads and their vertices.
pub mod item;
/// Receivers of flushed batches.
pub mod sink;
mod sprite_batch;

pub use config::{BatchConfig, BlendMode, CullMode, DepthStencilMode, RenderConfig, SamplerMode};
pub use item::{BatchItem, Vertex};
pub use sink::{DrawCall, DrawCalls, DrawRecorder, DrawSink, RecordedCall, RecordedFlush};
pub use sprite_batch::{BatchStats, SpriteBatch};
