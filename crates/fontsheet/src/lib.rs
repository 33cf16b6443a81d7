//! Fontsheet - game fonts from sprite sheets or outline files
//!
//! One [`Font`] type, two ways to get one:
//!
//! 1. **Bitmap** - a TOML description plus PNG sheets, sliced at load time
//! 2. **Outline** - a TrueType/OpenType file, rasterized glyph by glyph
//!
//! Either way you measure and wrap through the same methods and draw
//! through a [`DrawingContext`].
//!
//! # Example
//!
//! ```ignore
//! use fontsheet::prelude::*;
//!
//! let registry = FontRegistry::new();
//! registry.register("small", FontSource::bitmap("small.toml", GlyphWidth::Variable, 1));
//! let font = registry.get("small")?;
//!
//! let (line, rest) = font.wrap_to_width("Press any key to continue", 120.0);
//! let mut context = DrawingContext::new();
//! context.draw_text(&font, &line, Vector::new(160.0, 8.0), Alignment::Center, 100, Color::white());
//! context.do_drawing(&mut painter);
//! ```
//!
//! # Feature Flags
//!
//! - `bitmap`: sprite-sheet fonts (default)
//! - `outline`: scalable fonts via skrifa and zeno (default)

pub mod config;
mod registry;

pub use fontsheet_core::{
    error, layout, Alignment, Color, DrawCommand, DrawingContext, DrawingEffect, Font,
    FontMetrics, FontSource, FontsheetError, Glyph, GlyphProvider, GlyphWidth, Layer, LayoutConfig,
    LoadError, Painter, RecordingPainter, Rect, Result, Surface, Vector, WrapOptions,
};
pub use registry::FontRegistry;

#[cfg(feature = "bitmap")]
pub use fontsheet_bitmap as bitmap;

#[cfg(feature = "outline")]
pub use fontsheet_outline as outline;

/// Load a font with default layout behaviour
pub fn load(source: &FontSource) -> Result<Font> {
    load_with(source, LayoutConfig::default())
}

/// Load a font; relative paths resolve against [`config::font_dir`]
///
/// The font records the resolved path, so [`reload`] finds the same file
/// even after the font directory changes.
pub fn load_with(source: &FontSource, config: LayoutConfig) -> Result<Font> {
    let path = config::resolve(source.path());
    match source {
        #[cfg(feature = "bitmap")]
        FontSource::Bitmap {
            glyph_width,
            shadow_size,
            ..
        } => Ok(bitmap::BitmapLoader::new()
            .with_config(config)
            .load(&path, *glyph_width, *shadow_size)?),

        #[cfg(feature = "outline")]
        FontSource::Outline {
            size,
            shadow_size,
            border,
            ..
        } => Ok(outline::OutlineFont::open(
            &path,
            *size,
            *shadow_size,
            *border,
            config,
        )?),

        #[allow(unreachable_patterns)]
        _ => Err(FontsheetError::Config(format!(
            "{} needs a backend this build was compiled without",
            path.display()
        ))),
    }
}

/// A fresh, independent copy of `font`, loaded again from its source
pub fn reload(font: &Font) -> Result<Font> {
    log::debug!("Reloading {}", font.file_name().display());
    load_with(font.source(), *font.config())
}

/// Common imports for typical usage
pub mod prelude {
    pub use crate::{
        Alignment, Color, DrawingContext, DrawingEffect, Font, FontRegistry, FontSource,
        FontsheetError, GlyphWidth, LayoutConfig, Painter, Result, Vector, WrapOptions,
    };
}
