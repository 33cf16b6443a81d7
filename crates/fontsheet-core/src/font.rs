//! The loaded font: one glyph provider plus the numbers layout needs
//!
//! A [`Font`] is built exactly once by a loader and never changes after
//! that. It is deliberately not `Clone`: the provider may own a live
//! rasterizer and a pile of surfaces, so a second copy means a second load
//! (`fontsheet::reload`).

use std::any::Any;
use std::fmt;
use std::path::{Path, PathBuf};

use crate::config::{LayoutConfig, WrapOptions};
use crate::glyph::Glyph;
use crate::layout;
use crate::traits::GlyphProvider;
use crate::types::GlyphWidth;

/// Where a font came from, and how to load it again
#[derive(Debug, Clone, PartialEq)]
pub enum FontSource {
    /// A TOML description plus the PNG sheets it names
    Bitmap {
        path: PathBuf,
        glyph_width: GlyphWidth,
        shadow_size: u32,
    },
    /// A scalable font file rasterized at `size` pixels per em
    Outline {
        path: PathBuf,
        size: f32,
        shadow_size: u32,
        border: u32,
    },
}

impl FontSource {
    pub fn bitmap(path: impl Into<PathBuf>, glyph_width: GlyphWidth, shadow_size: u32) -> Self {
        FontSource::Bitmap {
            path: path.into(),
            glyph_width,
            shadow_size,
        }
    }

    pub fn outline(path: impl Into<PathBuf>, size: f32, shadow_size: u32, border: u32) -> Self {
        FontSource::Outline {
            path: path.into(),
            size,
            shadow_size,
            border,
        }
    }

    pub fn path(&self) -> &Path {
        match self {
            FontSource::Bitmap { path, .. } | FontSource::Outline { path, .. } => path,
        }
    }
}

/// Font-wide numbers, fixed at load time
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FontMetrics {
    pub line_height: f32,
    /// Nominal cell width; the advance of every glyph in a fixed font
    pub char_width: f32,
    pub shadow_size: u32,
    /// Transparent padding around every glyph image
    pub border: u32,
    pub rtl: bool,
    pub glyph_width: GlyphWidth,
}

/// A loaded, immutable font
pub struct Font {
    source: FontSource,
    metrics: FontMetrics,
    config: LayoutConfig,
    provider: Box<dyn GlyphProvider>,
}

impl Font {
    /// Bind a finished provider to its metrics
    ///
    /// Loaders call this as their very last step, once nothing else can fail.
    pub fn new(
        source: FontSource,
        metrics: FontMetrics,
        config: LayoutConfig,
        provider: Box<dyn GlyphProvider>,
    ) -> Self {
        log::info!(
            "Loaded {} font {} (line height {}, {} surfaces)",
            provider.name(),
            source.path().display(),
            metrics.line_height,
            provider.surface_count()
        );
        Self {
            source,
            metrics,
            config,
            provider,
        }
    }

    pub fn source(&self) -> &FontSource {
        &self.source
    }

    /// The file this font was loaded from
    pub fn file_name(&self) -> &Path {
        self.source.path()
    }

    pub fn metrics(&self) -> &FontMetrics {
        &self.metrics
    }

    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    pub fn shadow_size(&self) -> u32 {
        self.metrics.shadow_size
    }

    pub fn border(&self) -> u32 {
        self.metrics.border
    }

    pub fn is_rtl(&self) -> bool {
        self.metrics.rtl
    }

    pub fn glyph_width(&self) -> GlyphWidth {
        self.metrics.glyph_width
    }

    pub fn backend_name(&self) -> &'static str {
        self.provider.name()
    }

    /// Glyph surfaces the backend holds right now; outline fonts grow this lazily
    pub fn surface_count(&self) -> usize {
        self.provider.surface_count()
    }

    /// The concrete backend behind this font, if it is a `T`
    pub fn backend<T: Any>(&self) -> Option<&T> {
        self.provider.as_any().downcast_ref::<T>()
    }

    pub(crate) fn provider(&self) -> &dyn GlyphProvider {
        self.provider.as_ref()
    }

    pub fn glyph(&self, ch: char) -> Option<Glyph> {
        self.provider.glyph(ch)
    }

    fn advance(&self, ch: char) -> Option<f32> {
        self.provider.glyph(ch).map(|glyph| glyph.advance)
    }

    /// Whether every character of `text` has a glyph (true for `""`)
    pub fn has_all_glyphs(&self, text: &str) -> bool {
        text.chars().all(|ch| self.provider.glyph(ch).is_some())
    }

    /// Height of one line
    pub fn height(&self) -> f32 {
        self.metrics.line_height
    }

    pub fn text_height(&self, text: &str) -> f32 {
        self.metrics.line_height * layout::line_count(text) as f32
    }

    /// Width of the widest line; glyphs this font lacks count as zero
    pub fn text_width(&self, text: &str) -> f32 {
        layout::text_width(text, |ch| self.advance(ch))
    }

    /// Character-budget wrap, independent of any font
    pub fn wrap_to_chars(text: &str, max_chars: usize) -> (String, String) {
        layout::wrap_to_chars(text, max_chars, &WrapOptions::default())
    }

    /// Pixel-budget wrap using this font's advances
    pub fn wrap_to_width(&self, text: &str, budget: f32) -> (String, String) {
        layout::wrap_to_width(text, budget, |ch| self.advance(ch), &self.config.wrap)
    }

    /// How far the draw cursor moves over a glyph this font lacks
    pub fn missing_glyph_advance(&self) -> f32 {
        self.config
            .missing_glyph_advance
            .or_else(|| self.advance(' '))
            .unwrap_or(self.metrics.char_width)
    }
}

impl fmt::Debug for Font {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Font")
            .field("source", &self.source)
            .field("metrics", &self.metrics)
            .field("config", &self.config)
            .field("backend", &self.provider.name())
            .finish()
    }
}
