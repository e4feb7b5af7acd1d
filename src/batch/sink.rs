use std::ops::Range;

use super::config::RenderConfig;
use super::item::BatchItem;
use crate::texture::TextureHandle;

/// Consecutive sorted items sharing one texture.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct DrawRun {
    pub texture: TextureHandle,
    pub range: Range<usize>,
}

/// One draw call: a texture and the quads sampled from it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DrawCall<'a> {
    pub texture: TextureHandle,
    pub items: &'a [BatchItem],
}

/// Sorted items of one flush, grouped into draw calls.
///
/// Adjacent calls never share a texture.
#[derive(Clone, Copy, Debug)]
pub struct DrawCalls<'a> {
    pub(crate) items: &'a [BatchItem],
    pub(crate) runs: &'a [DrawRun],
}

impl<'a> DrawCalls<'a> {
    pub fn iter(&self) -> impl Iterator<Item = DrawCall<'a>> + use<'a> {
        let items = self.items;
        let runs = self.runs;
        runs.iter().map(move |run| DrawCall {
            texture: run.texture,
            items: &items[run.range.clone()],
        })
    }

    /// Every item of the flush in draw order.
    pub fn items(&self) -> &'a [BatchItem] {
        self.items
    }

    /// Number of draw calls.
    pub fn len(&self) -> usize {
        self.runs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.runs.is_empty()
    }
}

/// Receiver of flushed batches; the graphics context side of the batch.
pub trait DrawSink {
    fn draw(&mut self, config: &RenderConfig, calls: DrawCalls<'_>);
}

impl<F> DrawSink for F
where
    F: FnMut(&RenderConfig, DrawCalls<'_>),
{
    fn draw(&mut self, config: &RenderConfig, calls: DrawCalls<'_>) {
        self(config, calls)
    }
}

/// Owned copy of a [`DrawCall`].
#[derive(Clone, Debug, PartialEq)]
pub struct RecordedCall {
    pub texture: TextureHandle,
    pub items: Vec<BatchItem>,
}

/// Owned copy of one flush.
#[derive(Clone, Debug, PartialEq)]
pub struct RecordedFlush {
    pub config: RenderConfig,
    pub calls: Vec<RecordedCall>,
}

impl RecordedFlush {
    pub fn quad_count(&self) -> usize {
        self.calls.iter().map(|call| call.items.len()).sum()
    }
}

/// Sink keeping a copy of everything it receives.
#[derive(Clone, Debug, Default)]
pub struct DrawRecorder {
    pub flushes: Vec<RecordedFlush>,
}

impl DrawRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// All recorded quads in submission order.
    pub fn items(&self) -> impl Iterator<Item = &BatchItem> {
        self.flushes
            .iter()
            .flat_map(|flush| flush.calls.iter())
            .flat_map(|call| call.items.iter())
    }

    pub fn clear(&mut self) {
        self.flushes.clear();
    }
}

impl DrawSink for DrawRecorder {
    fn draw(&mut self, config: &RenderConfig, calls: DrawCalls<'_>) {
        self.flushes.push(RecordedFlush {
            config: *config,
            calls: calls
                .iter()
                .map(|call| RecordedCall {
                    texture: call.texture,
                    items: call.items.to_vec(),
                })
                .collect(),
        });
    }
}
