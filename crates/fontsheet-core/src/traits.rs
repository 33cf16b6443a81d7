//! The contracts that bind backends and painters to the engine
//!
//! - [`GlyphProvider`] - what a loaded backend hands the font
//! - [`Painter`] - the single drawing primitive the engine calls

use std::any::Any;
use std::sync::Arc;

use crate::glyph::Glyph;
use crate::surface::{Surface, SurfaceId};
use crate::types::{DrawingEffect, Layer, Rect, Vector};
use crate::Color;

/// Glyphs and the pixels behind them, as one backend sees them
///
/// Loaders build a provider once and the font keeps it for life, so the
/// measure and draw paths never branch on which backend they talk to.
///
/// ```ignore
/// struct Blank;
///
/// impl GlyphProvider for Blank {
///     fn name(&self) -> &'static str {
///         "blank"
///     }
///
///     fn glyph(&self, _ch: char) -> Option<Glyph> {
///         None
///     }
///
///     fn surface(&self, _layer: Layer, _index: usize) -> Option<Arc<Surface>> {
///         None
///     }
///
///     fn as_any(&self) -> &dyn Any {
///         self
///     }
/// }
/// ```
pub trait GlyphProvider: Send + Sync {
    /// Backend identity for logs and diagnostics
    fn name(&self) -> &'static str;

    /// Metrics for `ch`, or `None` when this backend cannot draw it
    fn glyph(&self, ch: char) -> Option<Glyph>;

    /// The surface a glyph's `surface_index` points at on the given layer
    ///
    /// Shadow surface `i` is the shadow counterpart of glyph surface `i`.
    /// Returns `None` when that layer has nothing at `index`.
    fn surface(&self, layer: Layer, index: usize) -> Option<Arc<Surface>>;

    /// How many glyph surfaces are currently owned
    fn surface_count(&self) -> usize {
        0
    }

    /// Escape hatch back to the concrete backend, see [`crate::Font::backend`]
    fn as_any(&self) -> &dyn Any;
}

/// Where glyphs finally become pixels
///
/// The engine decides what to copy and where; implementations own the
/// actual blit, GPU upload, and blending.
pub trait Painter {
    /// Copy `source` out of `surface` to `dest`, tinted and faded
    fn draw_cropped_image(
        &mut self,
        surface: &Surface,
        source: Rect,
        dest: Vector,
        color: Color,
        alpha: f32,
        effect: DrawingEffect,
    );
}

/// One recorded [`Painter`] call
#[derive(Debug, Clone, PartialEq)]
pub struct DrawCommand {
    pub surface: SurfaceId,
    pub source: Rect,
    pub dest: Vector,
    pub color: Color,
    pub alpha: f32,
    pub effect: DrawingEffect,
}

/// Painter that remembers every call instead of drawing
///
/// Handy for tests, debugging, and for exporting draw lists.
#[derive(Debug, Default)]
pub struct RecordingPainter {
    pub commands: Vec<DrawCommand>,
}

impl RecordingPainter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn take(&mut self) -> Vec<DrawCommand> {
        std::mem::take(&mut self.commands)
    }
}

impl Painter for RecordingPainter {
    fn draw_cropped_image(
        &mut self,
        surface: &Surface,
        source: Rect,
        dest: Vector,
        color: Color,
        alpha: f32,
        effect: DrawingEffect,
    ) {
        self.commands.push(DrawCommand {
            surface: surface.id(),
            source,
            dest,
            color,
            alpha,
            effect,
        });
    }
}
