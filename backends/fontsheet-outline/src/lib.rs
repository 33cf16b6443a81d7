//! Fontsheet Outline - scalable fonts, rasterized when first needed
//!
//! Bitmap fonts are sliced up front; outline fonts cannot be, because the
//! set of characters a game might print is the whole of Unicode. Instead
//! every glyph is rasterized the first time someone measures or draws it,
//! then cached for the life of the font.
//!
//! ## The pieces
//!
//! - [`Rasterizer`] - turns a character into a coverage mask at one size
//! - [`SkrifaRasterizer`] - the real one: skrifa outlines, zeno coverage
//! - [`OutlineFont`] - the glyph provider holding the cache
//!
//! ## Borders and shadows
//!
//! A `border` pads every glyph image so effects have room to spread. With a
//! border the shadow image is the glyph grown by that many pixels, which
//! reads as an outline behind the text. Without one the shadow is the glyph
//! itself.

mod dilate;
mod rasterizer;

use std::any::Any;
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use fontsheet_core::{
    BitmapFormat, Font, FontMetrics, FontSource, Glyph, GlyphProvider, GlyphWidth, Layer,
    LayoutConfig, LoadError, Rect, Surface, Vector,
};
use parking_lot::RwLock;

pub use rasterizer::{LineMetrics, RasterizedGlyph, Rasterizer, SkrifaRasterizer};

/// Load an outline font with default layout behaviour
pub fn load_outline_font(
    path: impl AsRef<Path>,
    size: f32,
    shadow_size: u32,
    border: u32,
) -> Result<Font, LoadError> {
    OutlineFont::open(path.as_ref(), size, shadow_size, border, LayoutConfig::default())
}

/// What the cache holds besides the glyphs: the pixels they point at
#[derive(Default)]
struct GlyphCache {
    glyphs: HashMap<char, Option<Glyph>>,
    surfaces: Vec<Arc<Surface>>,
    shadows: Vec<Arc<Surface>>,
}

/// Glyph provider for outline fonts
///
/// Lookups take a read lock; only a cache miss takes the write lock, and
/// rasterization itself happens outside any lock.
pub struct OutlineFont {
    rasterizer: Box<dyn Rasterizer>,
    ascent: f32,
    border: u32,
    cache: RwLock<GlyphCache>,
}

impl OutlineFont {
    /// Open `path` at `size` pixels per em and wrap it in a [`Font`]
    pub fn open(
        path: &Path,
        size: f32,
        shadow_size: u32,
        border: u32,
        config: LayoutConfig,
    ) -> Result<Font, LoadError> {
        if !size.is_finite() || size <= 0.0 {
            return Err(LoadError::InvalidSize(size));
        }
        let rasterizer = SkrifaRasterizer::open(path, size)?;
        let source = FontSource::outline(path, size, shadow_size, border);
        Ok(Self::with_rasterizer(
            source,
            Box::new(rasterizer),
            size,
            config,
        ))
    }

    /// Build a [`Font`] around any rasterizer
    ///
    /// Shadow size and border come from `source`, which must be an outline
    /// source; `size` is the fallback cell width when the font has no 'M'.
    pub fn with_rasterizer(
        source: FontSource,
        rasterizer: Box<dyn Rasterizer>,
        size: f32,
        config: LayoutConfig,
    ) -> Font {
        let (shadow_size, border) = match &source {
            FontSource::Outline {
                shadow_size,
                border,
                ..
            } => (*shadow_size, *border),
            FontSource::Bitmap { shadow_size, .. } => (*shadow_size, 0),
        };

        let line = rasterizer.line_metrics();
        let char_width = rasterizer.advance('M').unwrap_or(size);
        let metrics = FontMetrics {
            line_height: line.line_height(),
            char_width,
            shadow_size,
            border,
            rtl: false,
            glyph_width: GlyphWidth::Variable,
        };
        log::debug!(
            "Outline metrics for {}: ascent {}, descent {}, leading {}",
            source.path().display(),
            line.ascent,
            line.descent,
            line.leading
        );

        let provider = OutlineFont {
            rasterizer,
            ascent: line.ascent,
            border,
            cache: RwLock::new(GlyphCache::default()),
        };
        Font::new(source, metrics, config, Box::new(provider))
    }

    /// The rasterizer behind this font, for callers that need raw access
    pub fn rasterizer(&self) -> &dyn Rasterizer {
        self.rasterizer.as_ref()
    }

    /// How many characters have been looked up so far, hits and misses
    pub fn cached_glyphs(&self) -> usize {
        self.cache.read().glyphs.len()
    }

    /// Pad a rasterized mask by the border and wrap it (and its shadow)
    fn surfaces_for(&self, raster: &RasterizedGlyph) -> Option<(Surface, Option<Surface>)> {
        let border = self.border as usize;
        let (w, h) = (raster.width as usize, raster.height as usize);
        let (padded_w, padded_h) = (w + 2 * border, h + 2 * border);

        let mut padded = vec![0u8; padded_w * padded_h];
        for y in 0..h {
            let src = &raster.coverage[y * w..(y + 1) * w];
            let dst = (y + border) * padded_w + border;
            padded[dst..dst + w].copy_from_slice(src);
        }

        let shadow = if border > 0 {
            let grown = dilate::dilate(&padded, padded_w, padded_h, border);
            Surface::new(padded_w as u32, padded_h as u32, BitmapFormat::Gray8, grown).ok()
        } else {
            None
        };
        let surface =
            Surface::new(padded_w as u32, padded_h as u32, BitmapFormat::Gray8, padded).ok()?;
        Some((surface, shadow))
    }

    fn rasterize(&self, ch: char) -> Option<(Glyph, Option<(Surface, Option<Surface>)>)> {
        let raster = self.rasterizer.rasterize(ch)?;
        if raster.is_blank() || raster.coverage.len() != (raster.width * raster.height) as usize {
            let glyph = Glyph {
                advance: raster.advance,
                offset: Vector::ZERO,
                surface_index: 0,
                rect: Rect::default(),
            };
            return Some((glyph, None));
        }

        let surfaces = self.surfaces_for(&raster);
        let border = self.border as f32;
        let glyph = Glyph {
            advance: raster.advance,
            offset: Vector::new(raster.bearing_x as f32, self.ascent - raster.top as f32),
            // Patched with the real slot once the surfaces are stored
            surface_index: 0,
            rect: Rect::new(
                0.0,
                0.0,
                raster.width as f32 + 2.0 * border,
                raster.height as f32 + 2.0 * border,
            ),
        };
        Some((glyph, surfaces))
    }
}

impl GlyphProvider for OutlineFont {
    fn name(&self) -> &'static str {
        "outline"
    }

    fn glyph(&self, ch: char) -> Option<Glyph> {
        if let Some(hit) = self.cache.read().glyphs.get(&ch) {
            return *hit;
        }

        let rasterized = self.rasterize(ch);
        log::debug!(
            "Glyph cache miss for {:?} ({})",
            ch,
            if rasterized.is_some() { "rasterized" } else { "absent" }
        );

        let mut cache = self.cache.write();
        // Someone else may have filled it while we were rasterizing
        if let Some(hit) = cache.glyphs.get(&ch) {
            return *hit;
        }

        let glyph = rasterized.map(|(mut glyph, surfaces)| {
            if let Some((surface, shadow)) = surfaces {
                let surface = Arc::new(surface);
                let shadow = shadow.map_or_else(|| Arc::clone(&surface), Arc::new);
                glyph.surface_index = cache.surfaces.len();
                cache.surfaces.push(surface);
                cache.shadows.push(shadow);
            }
            glyph
        });
        cache.glyphs.insert(ch, glyph);
        glyph
    }

    fn surface(&self, layer: Layer, index: usize) -> Option<Arc<Surface>> {
        let cache = self.cache.read();
        match layer {
            Layer::Glyph => cache.surfaces.get(index).cloned(),
            Layer::Shadow => cache.shadows.get(index).cloned(),
        }
    }

    fn surface_count(&self) -> usize {
        self.cache.read().surfaces.len()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use fontsheet_core::{Alignment, Color, DrawingContext, RecordingPainter};

    use super::*;

    /// 'A' is a 2x3 solid block; ' ' is blank; everything else is missing
    struct Blocks {
        calls: Arc<AtomicUsize>,
    }

    impl Rasterizer for Blocks {
        fn line_metrics(&self) -> LineMetrics {
            LineMetrics {
                ascent: 8.0,
                descent: -2.4,
                leading: 0.0,
            }
        }

        fn advance(&self, ch: char) -> Option<f32> {
            match ch {
                'A' => Some(3.0),
                ' ' => Some(2.5),
                _ => None,
            }
        }

        fn rasterize(&self, ch: char) -> Option<RasterizedGlyph> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match ch {
                'A' => Some(RasterizedGlyph {
                    width: 2,
                    height: 3,
                    coverage: vec![255; 6],
                    bearing_x: 1,
                    top: 6,
                    advance: 3.0,
                }),
                ' ' => Some(RasterizedGlyph::blank(2.5)),
                _ => None,
            }
        }
    }

    fn font(shadow_size: u32, border: u32) -> (Font, Arc<AtomicUsize>) {
        let calls = Arc::new(AtomicUsize::new(0));
        let font = OutlineFont::with_rasterizer(
            FontSource::outline("blocks.ttf", 10.0, shadow_size, border),
            Box::new(Blocks {
                calls: Arc::clone(&calls),
            }),
            10.0,
            LayoutConfig::default(),
        );
        (font, calls)
    }

    #[test]
    fn metrics_come_from_the_rasterizer() {
        let (font, _) = font(0, 0);
        assert_eq!(font.height(), 11.0);
        assert_eq!(font.metrics().char_width, 10.0, "no 'M', falls back to size");
        assert_eq!(font.backend_name(), "outline");
        assert_eq!(font.glyph_width(), GlyphWidth::Variable);
    }

    #[test]
    fn rasterizes_once_per_character() {
        let (font, calls) = font(0, 0);
        assert_eq!(font.text_width("AAA"), 9.0);
        assert_eq!(font.text_width("A"), 3.0);
        assert_eq!(calls.load(Ordering::SeqCst), 1);

        assert!(!font.has_all_glyphs("Ab"));
        assert!(!font.has_all_glyphs("b"));
        assert_eq!(calls.load(Ordering::SeqCst), 2, "misses are cached too");

        let provider = font.backend::<OutlineFont>().unwrap();
        assert_eq!(provider.cached_glyphs(), 2);
    }

    #[test]
    fn glyph_placement_uses_bearings_and_ascent() {
        let (font, _) = font(0, 0);
        let glyph = font.glyph('A').unwrap();
        assert_eq!(glyph.offset, Vector::new(1.0, 2.0));
        assert_eq!(glyph.rect, Rect::new(0.0, 0.0, 2.0, 3.0));
    }

    #[test]
    fn blank_glyphs_advance_without_surfaces() {
        let (font, _) = font(0, 0);
        let space = font.glyph(' ').unwrap();
        assert!(space.rect.is_empty());
        assert_eq!(font.text_width(" A "), 8.0);
        assert_eq!(font.backend::<OutlineFont>().unwrap().surface_count(), 1);
    }

    #[test]
    fn no_border_shares_the_shadow_surface() {
        let (font, _) = font(1, 0);
        font.glyph('A');
        let provider = font.backend::<OutlineFont>().unwrap();
        let glyph = provider.surface(Layer::Glyph, 0).unwrap();
        let shadow = provider.surface(Layer::Shadow, 0).unwrap();
        assert!(Arc::ptr_eq(&glyph, &shadow));
    }

    #[test]
    fn border_pads_and_dilates_the_shadow() {
        let (font, _) = font(0, 1);
        let glyph = font.glyph('A').unwrap();
        assert_eq!(glyph.rect, Rect::new(0.0, 0.0, 4.0, 5.0));

        let provider = font.backend::<OutlineFont>().unwrap();
        let surface = provider.surface(Layer::Glyph, 0).unwrap();
        let shadow = provider.surface(Layer::Shadow, 0).unwrap();
        assert_eq!((surface.width(), surface.height()), (4, 5));
        assert_eq!(surface.format(), BitmapFormat::Gray8);
        assert_eq!(surface.alpha_at(0, 0), 0);
        assert_eq!(surface.alpha_at(1, 1), 255);
        assert_eq!(shadow.alpha_at(0, 0), 255, "dilation reaches the corner");
    }

    #[test]
    fn draws_through_the_context() {
        let (font, _) = font(2, 1);
        let font = Arc::new(font);
        let mut context = DrawingContext::new();
        context.draw_text(&font, "A", Vector::new(10.0, 20.0), Alignment::Left, 0, Color::white());
        let mut painter = RecordingPainter::new();
        context.do_drawing(&mut painter);

        assert_eq!(painter.commands.len(), 2);
        let (shadow, glyph) = (&painter.commands[0], &painter.commands[1]);
        // cursor + offset (1, 2) - border (1, 1), shadow pushed by (2, 2)
        assert_eq!(glyph.dest, Vector::new(10.0, 21.0));
        assert_eq!(shadow.dest, Vector::new(12.0, 23.0));
        assert_ne!(shadow.surface, glyph.surface);
    }

    #[test]
    fn rejects_non_positive_sizes() {
        for size in [0.0, -3.0, f32::INFINITY] {
            let result = OutlineFont::open(Path::new("x.ttf"), size, 0, 0, LayoutConfig::default());
            assert!(matches!(result, Err(LoadError::InvalidSize(_))));
        }
    }
}
