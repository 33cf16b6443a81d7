//! What the commands print
//!
//! The library types stay serde-free; these mirror just what a caller of the
//! binary wants to read back.

use std::io::Write;

use fontsheet::{DrawCommand, DrawingEffect, Font, FontMetrics, GlyphWidth};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct FontReport {
    pub file: String,
    pub backend: &'static str,
    pub metrics: MetricsReport,
    /// Characters in the glyph table (bitmap fonts only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub glyph_count: Option<usize>,
    /// Glyph surfaces currently held by the backend
    pub surfaces: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub coverage: Option<CoverageReport>,
}

#[derive(Debug, Serialize)]
pub struct MetricsReport {
    pub line_height: f32,
    pub char_width: f32,
    pub shadow_size: u32,
    pub border: u32,
    pub rtl: bool,
    pub glyph_width: &'static str,
}

impl From<&FontMetrics> for MetricsReport {
    fn from(metrics: &FontMetrics) -> Self {
        Self {
            line_height: metrics.line_height,
            char_width: metrics.char_width,
            shadow_size: metrics.shadow_size,
            border: metrics.border,
            rtl: metrics.rtl,
            glyph_width: match metrics.glyph_width {
                GlyphWidth::Fixed => "fixed",
                GlyphWidth::Variable => "variable",
            },
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CoverageReport {
    pub complete: bool,
    pub missing: Vec<char>,
}

impl CoverageReport {
    /// Line breaks are layout, not glyphs, so they never count as missing
    pub fn check(font: &Font, text: &str) -> Self {
        let mut missing: Vec<char> = Vec::new();
        for ch in text.chars().filter(|&ch| ch != '\n') {
            if font.glyph(ch).is_none() && !missing.contains(&ch) {
                missing.push(ch);
            }
        }
        Self {
            complete: missing.is_empty(),
            missing,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct MeasureReport {
    pub width: f32,
    pub height: f32,
    pub lines: usize,
    pub coverage: CoverageReport,
}

#[derive(Debug, Serialize)]
pub struct WrapReport {
    pub lines: Vec<String>,
    pub overflow: String,
}

#[derive(Debug, Serialize)]
pub struct DrawReport {
    pub width: f32,
    pub height: f32,
    pub commands: Vec<CommandReport>,
}

#[derive(Debug, Serialize)]
pub struct CommandReport {
    pub surface: u64,
    /// `[x, y, w, h]` inside the surface
    pub source: [f32; 4],
    pub dest: [f32; 2],
    /// `[r, g, b, a]`
    pub color: [u8; 4],
    pub alpha: f32,
    pub effect: &'static str,
}

impl From<&DrawCommand> for CommandReport {
    fn from(command: &DrawCommand) -> Self {
        let DrawCommand {
            surface,
            source,
            dest,
            color,
            alpha,
            effect,
        } = command;
        Self {
            surface: surface.get(),
            source: [source.x, source.y, source.w, source.h],
            dest: [dest.x, dest.y],
            color: [color.r, color.g, color.b, color.a],
            alpha: *alpha,
            effect: match effect {
                DrawingEffect::None => "none",
                DrawingEffect::HorizontalFlip => "horizontal-flip",
                DrawingEffect::VerticalFlip => "vertical-flip",
            },
        }
    }
}

/// Print `value` as one JSON document followed by a newline
pub fn emit<T: Serialize>(value: &T, pretty: bool) -> anyhow::Result<()> {
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    if pretty {
        serde_json::to_writer_pretty(&mut out, value)?;
    } else {
        serde_json::to_writer(&mut out, value)?;
    }
    writeln!(out)?;
    Ok(())
}
