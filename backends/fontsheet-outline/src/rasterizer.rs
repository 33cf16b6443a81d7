//! The rasterizer seam and its skrifa + zeno implementation
//!
//! Outlines come out of skrifa, get scaled to pixels, and are handed to
//! zeno as SVG path data. kurbo tracks the bounds on the side so we know
//! how big a mask to allocate before zeno fills it.

use std::path::Path;

use fontsheet_core::LoadError;
use kurbo::Shape;
use skrifa::instance::{LocationRef, Size};
use skrifa::outline::DrawSettings;
use skrifa::MetadataProvider;

/// Vertical metrics in pixels; `descent` is negative below the baseline
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineMetrics {
    pub ascent: f32,
    pub descent: f32,
    pub leading: f32,
}

impl LineMetrics {
    /// Whole-pixel distance between baselines
    pub fn line_height(&self) -> f32 {
        (self.ascent - self.descent + self.leading).ceil()
    }
}

/// One glyph's coverage mask, y-down, with placement relative to the pen
#[derive(Debug, Clone, PartialEq)]
pub struct RasterizedGlyph {
    pub width: u32,
    pub height: u32,
    /// `width * height` coverage bytes, row-major
    pub coverage: Vec<u8>,
    /// Pen to left edge
    pub bearing_x: i32,
    /// Baseline to top edge, positive upwards
    pub top: i32,
    pub advance: f32,
}

impl RasterizedGlyph {
    /// A glyph that moves the pen but leaves no ink, such as a space
    pub fn blank(advance: f32) -> Self {
        Self {
            width: 0,
            height: 0,
            coverage: Vec::new(),
            bearing_x: 0,
            top: 0,
            advance,
        }
    }

    pub fn is_blank(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

/// Turns characters into coverage masks at one fixed size
pub trait Rasterizer: Send + Sync {
    fn line_metrics(&self) -> LineMetrics;

    /// Pen advance for `ch`, `None` when the font has no glyph for it
    fn advance(&self, ch: char) -> Option<f32>;

    /// Rasterize `ch`, `None` when the font has no glyph for it
    fn rasterize(&self, ch: char) -> Option<RasterizedGlyph>;
}

/// skrifa for outlines and metrics, zeno for coverage
pub struct SkrifaRasterizer {
    data: Vec<u8>,
    index: u32,
    size: f32,
}

impl SkrifaRasterizer {
    /// Read a font file and check it parses
    pub fn open(path: &Path, size: f32) -> Result<Self, LoadError> {
        if !path.exists() {
            return Err(LoadError::FileNotFound(path.to_path_buf()));
        }
        let data = std::fs::read(path).map_err(|source| LoadError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_data(data, 0, size)
    }

    /// Wrap font bytes already in memory; `index` picks a face in a collection
    pub fn from_data(data: Vec<u8>, index: u32, size: f32) -> Result<Self, LoadError> {
        if !size.is_finite() || size <= 0.0 {
            return Err(LoadError::InvalidSize(size));
        }
        read_fonts::FontRef::from_index(&data, index)
            .map_err(|e| LoadError::InvalidFontData(format!("{:?}", e)))?;
        let maps_anything = skrifa::FontRef::from_index(&data, index)
            .map(|font| font.charmap().mappings().next().is_some())
            .unwrap_or(false);
        if !maps_anything {
            return Err(LoadError::InvalidFontData("font maps no characters".into()));
        }
        Ok(Self { data, index, size })
    }

    pub fn size(&self) -> f32 {
        self.size
    }

    fn font(&self) -> Option<skrifa::FontRef<'_>> {
        skrifa::FontRef::from_index(&self.data, self.index).ok()
    }
}

impl Rasterizer for SkrifaRasterizer {
    fn line_metrics(&self) -> LineMetrics {
        let Some(font) = self.font() else {
            return LineMetrics {
                ascent: self.size,
                descent: 0.0,
                leading: 0.0,
            };
        };
        let metrics = font.metrics(Size::new(self.size), LocationRef::default());
        LineMetrics {
            ascent: metrics.ascent,
            descent: metrics.descent,
            leading: metrics.leading,
        }
    }

    fn advance(&self, ch: char) -> Option<f32> {
        let font = self.font()?;
        let glyph_id = font.charmap().map(ch)?;
        font.glyph_metrics(Size::new(self.size), LocationRef::default())
            .advance_width(glyph_id)
    }

    fn rasterize(&self, ch: char) -> Option<RasterizedGlyph> {
        let font = self.font()?;
        let glyph_id = font.charmap().map(ch)?;
        let size = Size::new(self.size);
        let advance = font
            .glyph_metrics(size, LocationRef::default())
            .advance_width(glyph_id)
            .unwrap_or(0.0);

        let Some(outline) = font.outline_glyphs().get(glyph_id) else {
            return Some(RasterizedGlyph::blank(advance));
        };

        let mut pen = MaskPen::new();
        let settings = DrawSettings::unhinted(size, LocationRef::default());
        if let Err(e) = outline.draw(settings, &mut pen) {
            log::warn!("Outline of {:?} failed to draw: {:?}", ch, e);
            return Some(RasterizedGlyph::blank(advance));
        }
        let (path_data, bounds) = pen.finish();

        let bbox = bounds.bounding_box();
        if !(bbox.x0.is_finite() && bbox.y0.is_finite() && bbox.x1.is_finite() && bbox.y1.is_finite())
        {
            return Some(RasterizedGlyph::blank(advance));
        }

        // Snap the mask to whole pixels around the outline
        let min_x = bbox.x0.floor() as i32;
        let min_y = bbox.y0.floor() as i32;
        let max_x = bbox.x1.ceil() as i32;
        let max_y = bbox.y1.ceil() as i32;
        let width = (max_x - min_x).max(0) as u32;
        let height = (max_y - min_y).max(0) as u32;
        if width == 0 || height == 0 {
            return Some(RasterizedGlyph::blank(advance));
        }

        let mut coverage = vec![0u8; (width * height) as usize];
        zeno::Mask::new(path_data.as_str())
            .size(width, height)
            .offset((-min_x, -min_y))
            .render_into(&mut coverage, None);

        Some(RasterizedGlyph {
            width,
            height,
            coverage,
            bearing_x: min_x,
            top: -min_y,
            advance,
        })
    }
}

/// Collects an outline twice: SVG commands for zeno, a kurbo path for bounds
///
/// Font units are y-up, masks are y-down, so y is negated on the way in and
/// the mask never needs flipping.
struct MaskPen {
    commands: Vec<String>,
    bounds: kurbo::BezPath,
}

impl MaskPen {
    fn new() -> Self {
        Self {
            commands: Vec::new(),
            bounds: kurbo::BezPath::new(),
        }
    }

    fn finish(self) -> (String, kurbo::BezPath) {
        (self.commands.join(" "), self.bounds)
    }
}

impl skrifa::outline::OutlinePen for MaskPen {
    fn move_to(&mut self, x: f32, y: f32) {
        let y = -y;
        self.commands.push(format!("M {:.2},{:.2}", x, y));
        self.bounds.move_to((x as f64, y as f64));
    }

    fn line_to(&mut self, x: f32, y: f32) {
        let y = -y;
        self.commands.push(format!("L {:.2},{:.2}", x, y));
        self.bounds.line_to((x as f64, y as f64));
    }

    fn quad_to(&mut self, cx: f32, cy: f32, x: f32, y: f32) {
        let (cy, y) = (-cy, -y);
        self.commands
            .push(format!("Q {:.2},{:.2} {:.2},{:.2}", cx, cy, x, y));
        self.bounds
            .quad_to((cx as f64, cy as f64), (x as f64, y as f64));
    }

    fn curve_to(&mut self, cx0: f32, cy0: f32, cx1: f32, cy1: f32, x: f32, y: f32) {
        let (cy0, cy1, y) = (-cy0, -cy1, -y);
        self.commands.push(format!(
            "C {:.2},{:.2} {:.2},{:.2} {:.2},{:.2}",
            cx0, cy0, cx1, cy1, x, y
        ));
        self.bounds.curve_to(
            (cx0 as f64, cy0 as f64),
            (cx1 as f64, cy1 as f64),
            (x as f64, y as f64),
        );
    }

    fn close(&mut self) {
        self.commands.push("Z".to_string());
        self.bounds.close_path();
    }
}
