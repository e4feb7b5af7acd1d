/// Glyph placement and emission of text blocks.
pub mod layout;
/// Strings with per-character color runs.
pub mod rich_text;

pub(crate) use layout::LayoutScratch;
pub use layout::{HorizontalAlign, TextPlacement};
pub use rich_text::{ColorRunSource, RichText};
