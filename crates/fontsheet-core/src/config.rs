//! Layout knobs that used to be magic numbers
//!
//! Two behaviours have no single right answer: how far the cursor moves
//! over a glyph the font cannot draw, and when a whitespace break is too
//! short to be worth taking over a hard mid-word break. Both live here so
//! callers can match whatever their existing text looked like.

/// Options for the greedy wrappers
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WrapOptions {
    /// Minimum share of the budget (0.0..=1.0) a whitespace break must fill
    ///
    /// When the best whitespace break leaves the head shorter than this, the
    /// wrapper hard-breaks at the budget instead. `0.0` always prefers
    /// whitespace.
    pub min_fill: f32,
}

impl Default for WrapOptions {
    fn default() -> Self {
        Self { min_fill: 0.0 }
    }
}

impl WrapOptions {
    pub fn with_min_fill(min_fill: f32) -> Self {
        Self {
            min_fill: min_fill.clamp(0.0, 1.0),
        }
    }
}

/// Per-font layout behaviour, fixed at load time
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct LayoutConfig {
    /// Cursor advance for glyphs the font lacks when drawing
    ///
    /// `None` uses the space glyph's advance, or the nominal cell width when
    /// the font has no space either.
    pub missing_glyph_advance: Option<f32>,
    pub wrap: WrapOptions,
}

impl LayoutConfig {
    pub fn with_missing_glyph_advance(mut self, advance: f32) -> Self {
        self.missing_glyph_advance = Some(advance);
        self
    }

    pub fn with_wrap(mut self, wrap: WrapOptions) -> Self {
        self.wrap = wrap;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn min_fill_is_clamped() {
        assert_eq!(WrapOptions::with_min_fill(3.0).min_fill, 1.0);
        assert_eq!(WrapOptions::with_min_fill(-1.0).min_fill, 0.0);
    }

    #[test]
    fn defaults_prefer_whitespace_and_space_advance() {
        let config = LayoutConfig::default();
        assert_eq!(config.missing_glyph_advance, None);
        assert_eq!(config.wrap.min_fill, 0.0);
    }
}
