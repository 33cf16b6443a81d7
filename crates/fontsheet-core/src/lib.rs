//! Fontsheet Core: glyph metrics, layout, and draw dispatch
//!
//! A font here is a table of glyphs plus the surfaces those glyphs are cut
//! from. Two very different backends feed that table:
//!
//! 1. **Bitmap sprite sheets** - every glyph pre-rendered into a PNG cell,
//!    sliced once at load time
//! 2. **Outline fonts** - glyphs rasterized on first use by an external
//!    library and cached from then on
//!
//! Whatever the backend, the same questions get answered the same way:
//! how wide is this text, how tall, where should it wrap, and which pixels
//! should the painter copy where.
//!
//! ## Measuring and wrapping
//!
//! ```rust,ignore
//! let width = font.text_width("Hello\nWorld");
//! let (head, overflow) = Font::wrap_to_chars("hello world", 8);
//! let (head, overflow) = font.wrap_to_width("a long line of text", 120.0);
//! ```
//!
//! ## Drawing
//!
//! Fonts never draw on their own. Requests are queued on a
//! [`DrawingContext`] and flushed into a [`Painter`] once per frame:
//!
//! ```rust,ignore
//! let mut context = DrawingContext::new();
//! context.draw_text(&font, "Score: 100", Vector::new(8.0, 8.0), Alignment::Left, 10, Color::white());
//! context.do_drawing(&mut painter);
//! ```
//!
//! ## The traits at the seams
//!
//! - [`GlyphProvider`] - what a backend hands the font: glyphs and surfaces
//! - [`Painter`] - the one drawing primitive the engine needs

pub mod config;
pub mod context;
mod draw;
pub mod error;
pub mod font;
pub mod glyph;
pub mod layout;
pub mod surface;
pub mod traits;

pub use config::{LayoutConfig, WrapOptions};
pub use context::DrawingContext;
pub use error::{FontsheetError, LoadError, Result};
pub use font::{Font, FontMetrics, FontSource};
pub use glyph::{Glyph, GlyphTable, GlyphTableBuilder};
pub use surface::{BitmapFormat, Surface, SurfaceId};
pub use traits::{DrawCommand, GlyphProvider, Painter, RecordingPainter};
pub use types::{Alignment, DrawingEffect, GlyphWidth, Layer, Rect, Vector};

/// Geometry and the small enums shared by every stage
pub mod types {
    use std::ops::{Add, AddAssign, Neg, Sub};

    /// A point or displacement in screen space (y grows downwards)
    #[derive(Debug, Clone, Copy, Default, PartialEq)]
    pub struct Vector {
        pub x: f32,
        pub y: f32,
    }

    impl Vector {
        pub const ZERO: Vector = Vector { x: 0.0, y: 0.0 };

        pub const fn new(x: f32, y: f32) -> Self {
            Self { x, y }
        }
    }

    impl Add for Vector {
        type Output = Vector;

        fn add(self, rhs: Vector) -> Vector {
            Vector::new(self.x + rhs.x, self.y + rhs.y)
        }
    }

    impl AddAssign for Vector {
        fn add_assign(&mut self, rhs: Vector) {
            self.x += rhs.x;
            self.y += rhs.y;
        }
    }

    impl Sub for Vector {
        type Output = Vector;

        fn sub(self, rhs: Vector) -> Vector {
            Vector::new(self.x - rhs.x, self.y - rhs.y)
        }
    }

    impl Neg for Vector {
        type Output = Vector;

        fn neg(self) -> Vector {
            Vector::new(-self.x, -self.y)
        }
    }

    /// Axis-aligned rectangle: origin plus size
    #[derive(Debug, Clone, Copy, Default, PartialEq)]
    pub struct Rect {
        pub x: f32,
        pub y: f32,
        pub w: f32,
        pub h: f32,
    }

    impl Rect {
        pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
            Self { x, y, w, h }
        }

        pub fn origin(&self) -> Vector {
            Vector::new(self.x, self.y)
        }

        /// Nothing to copy when either side collapses
        pub fn is_empty(&self) -> bool {
            self.w <= 0.0 || self.h <= 0.0
        }
    }

    /// Mirroring applied by the painter when it copies a glyph
    #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
    pub enum DrawingEffect {
        #[default]
        None,
        HorizontalFlip,
        VerticalFlip,
    }

    /// Where the anchor sits relative to each drawn line
    #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
    pub enum Alignment {
        #[default]
        Left,
        Center,
        Right,
    }

    /// How far the cursor moves after each glyph
    ///
    /// `Fixed` gives every glyph the configured cell width. `Variable` lets
    /// each glyph carry its own advance.
    #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
    pub enum GlyphWidth {
        Fixed,
        #[default]
        Variable,
    }

    /// Which of the two index-aligned surface sets a draw reads from
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub enum Layer {
        Glyph,
        Shadow,
    }
}

/// Simple RGBA color that works everywhere
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn black() -> Self {
        Self::rgba(0, 0, 0, 255)
    }

    pub const fn white() -> Self {
        Self::rgba(255, 255, 255, 255)
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::white()
    }
}
