use std::collections::HashMap;

use crate::geometry::Color;

/// Text whose color changes at registered character indices.
///
/// Indices count `char`s, line breaks included. A color registered at index
/// `i` applies to character `i` and everything after it until the next
/// registered index; characters before the first one use the default color.
pub trait ColorRunSource {
    fn text(&self) -> &str;

    fn default_color(&self) -> Color;

    /// Color that starts at character `index`, if any.
    fn color_at(&self, index: usize) -> Option<Color>;
}

/// String builder recording a color boundary at the start of every run.
///
/// ```
/// use hierarchy_batch::{Color, ColorRunSource, RichText, WHITE};
///
/// let red = Color::new(255, 0, 0, 255);
/// let mut rich = RichText::new(WHITE);
/// rich.append("hp: ", None);
/// rich.append("12", Some(red));
///
/// assert_eq!(rich.text(), "hp: 12");
/// assert_eq!(rich.color_at(4), Some(red));
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct RichText {
    text: String,
    char_count: usize,
    default_color: Color,
    colors: HashMap<usize, Color, fxhash::FxBuildHasher>,
}

impl RichText {
    pub fn new(default_color: Color) -> Self {
        Self {
            text: String::new(),
            char_count: 0,
            default_color,
            colors: HashMap::default(),
        }
    }

    /// Appends a run drawn in `color`, or in the default color for `None`.
    ///
    /// A boundary is only recorded when the run is not empty.
    pub fn append(&mut self, text: &str, color: Option<Color>) {
        if text.is_empty() {
            return;
        }

        self.colors
            .insert(self.char_count, color.unwrap_or(self.default_color));
        self.text.push_str(text);
        self.char_count += text.chars().count();
    }

    /// Registers a color boundary at character `index` of the current text.
    pub fn set_color_at(&mut self, index: usize, color: Color) {
        self.colors.insert(index, color);
    }

    pub fn set_default_color(&mut self, color: Color) {
        self.default_color = color;
    }

    /// Number of `char`s in the text.
    pub fn char_count(&self) -> usize {
        self.char_count
    }

    pub fn colors(&self) -> &HashMap<usize, Color, fxhash::FxBuildHasher> {
        &self.colors
    }

    /// Drops text and boundaries so the builder can be reused.
    pub fn clear(&mut self) {
        self.text.clear();
        self.char_count = 0;
        self.colors.clear();
    }
}

impl ColorRunSource for RichText {
    fn text(&self) -> &str {
        &self.text
    }

    fn default_color(&self) -> Color {
        self.default_color
    }

    fn color_at(&self, index: usize) -> Option<Color> {
        self.colors.get(&index).copied()
    }
}
