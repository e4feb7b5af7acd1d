/// Sizing and flushing knobs of a [`SpriteBatch`](super::SpriteBatch).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BatchConfig {
    /// Flush automatically once `flush_threshold` quads were emitted by the
    /// sprite and text methods of one session.
    pub auto_flush: bool,
    pub flush_threshold: usize,
    /// Initial capacity of the item pool.
    pub item_capacity: usize,
    /// Initial capacity of the per-character glyph index scratch.
    pub glyph_index_capacity: usize,
    /// Initial capacity of the per-line origin scratch.
    pub line_origin_capacity: usize,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            auto_flush: true,
            flush_threshold: 5000,
            item_capacity: 2048,
            glyph_index_capacity: 256,
            line_origin_capacity: 16,
        }
    }
}

/// Color blending applied to every draw call of a session.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum BlendMode {
    #[default]
    AlphaBlend,
    Additive,
    NonPremultiplied,
    Opaque,
}

/// Texture filtering and addressing.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum SamplerMode {
    #[default]
    LinearClamp,
    LinearWrap,
    PointClamp,
    PointWrap,
    AnisotropicClamp,
    AnisotropicWrap,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum DepthStencilMode {
    #[default]
    None,
    Default,
    DepthRead,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum CullMode {
    None,
    CullClockwise,
    #[default]
    CullCounterClockwise,
}

/// Render state captured by `begin` and handed to the draw sink with every
/// flush. The batch never interprets it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct RenderConfig {
    /// Defaults to [`BlendMode::AlphaBlend`].
    pub blend: BlendMode,
    /// Defaults to [`SamplerMode::LinearClamp`].
    pub sampler: SamplerMode,
    /// Defaults to [`DepthStencilMode::None`].
    pub depth_stencil: DepthStencilMode,
    /// Defaults to [`CullMode::CullCounterClockwise`].
    pub rasterizer: CullMode,
}

impl RenderConfig {
    pub fn with_blend(mut self, blend: BlendMode) -> Self {
        self.blend = blend;
        self
    }

    pub fn with_sampler(mut self, sampler: SamplerMode) -> Self {
        self.sampler = sampler;
        self
    }

    pub fn with_depth_stencil(mut self, depth_stencil: DepthStencilMode) -> Self {
        self.depth_stencil = depth_stencil;
        self
    }

    pub fn with_rasterizer(mut self, rasterizer: CullMode) -> Self {
        self.rasterizer = rasterizer;
        self
    }
}
