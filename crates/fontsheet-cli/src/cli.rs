//! Argument definitions
//!
//! Every subcommand opens exactly one font, described by [`FontArgs`], and
//! prints a single JSON document to stdout.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use fontsheet::{Alignment, DrawingEffect, FontSource, GlyphWidth, LayoutConfig, WrapOptions};

/// Fontsheet - inspect and lay out game fonts
#[derive(Parser, Debug)]
#[command(name = "fontsheet")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Directory relative font paths are resolved against
    /// (overrides FONTSHEET_FONT_DIR)
    #[arg(long, global = true)]
    pub font_dir: Option<PathBuf>,

    /// Pretty-print the JSON output
    #[arg(long, global = true)]
    pub pretty: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show a font's backend and metrics
    #[command(alias = "i")]
    Info(InfoArgs),

    /// Measure the width and height of some text
    #[command(alias = "m")]
    Measure(TextArgs),

    /// Break text into lines by character count or pixel width
    #[command(alias = "w")]
    Wrap(WrapArgs),

    /// Lay text out and print the resulting draw list
    #[command(alias = "d")]
    Draw(DrawArgs),
}

/// Which font to open and how
#[derive(Args, Debug, Clone)]
#[group(required = true, multiple = false)]
pub struct FontSelect {
    /// Bitmap font description (.toml)
    #[arg(short = 'b', long)]
    pub bitmap: Option<PathBuf>,

    /// Outline font file (.ttf, .otf)
    #[arg(short = 'o', long)]
    pub outline: Option<PathBuf>,
}

#[derive(Args, Debug, Clone)]
pub struct FontArgs {
    #[command(flatten)]
    pub select: FontSelect,

    /// Pixel size for outline fonts
    #[arg(short = 's', long, default_value = "16")]
    pub size: f32,

    /// Glyph advance mode for bitmap fonts
    #[arg(short = 'g', long, value_enum, default_value = "variable")]
    pub glyph_width: GlyphWidthArg,

    /// Shadow offset in pixels (0 disables the shadow pass)
    #[arg(long, default_value = "0")]
    pub shadow: u32,

    /// Border padding around outline glyphs
    #[arg(long, default_value = "0")]
    pub border: u32,

    /// Cursor advance over glyphs the font lacks (default: the space advance)
    #[arg(long)]
    pub missing_advance: Option<f32>,

    /// Minimum share of the line a whitespace break must fill (0.0 - 1.0)
    #[arg(long)]
    pub min_fill: Option<f32>,
}

impl FontArgs {
    pub fn source(&self) -> anyhow::Result<FontSource> {
        match (&self.select.bitmap, &self.select.outline) {
            (Some(path), None) => Ok(FontSource::bitmap(
                path.clone(),
                self.glyph_width.into(),
                self.shadow,
            )),
            (None, Some(path)) => Ok(FontSource::outline(
                path.clone(),
                self.size,
                self.shadow,
                self.border,
            )),
            _ => anyhow::bail!("pass exactly one of --bitmap or --outline"),
        }
    }

    pub fn layout(&self) -> LayoutConfig {
        let mut config = LayoutConfig::default();
        if let Some(advance) = self.missing_advance {
            config = config.with_missing_glyph_advance(advance);
        }
        if let Some(min_fill) = self.min_fill {
            config = config.with_wrap(WrapOptions::with_min_fill(min_fill));
        }
        config
    }
}

#[derive(Args, Debug)]
pub struct InfoArgs {
    #[command(flatten)]
    pub font: FontArgs,

    /// Also report which of these characters the font can draw
    #[arg(short = 'c', long)]
    pub check: Option<String>,
}

#[derive(Args, Debug)]
pub struct TextArgs {
    #[command(flatten)]
    pub font: FontArgs,

    /// Text to process (reads stdin if omitted)
    pub text: Option<String>,
}

#[derive(Args, Debug)]
pub struct WrapArgs {
    #[command(flatten)]
    pub input: TextArgs,

    /// Break after at most this many characters
    #[arg(short = 'n', long, conflicts_with = "width", required_unless_present = "width")]
    pub chars: Option<usize>,

    /// Break before exceeding this many pixels
    #[arg(short = 'W', long)]
    pub width: Option<f32>,

    /// Keep wrapping the overflow until nothing is left
    #[arg(short = 'a', long)]
    pub all: bool,
}

#[derive(Args, Debug)]
pub struct DrawArgs {
    #[command(flatten)]
    pub input: TextArgs,

    /// Anchor x
    #[arg(short = 'x', long, default_value = "0", allow_negative_numbers = true)]
    pub x: f32,

    /// Anchor y
    #[arg(short = 'y', long, default_value = "0", allow_negative_numbers = true)]
    pub y: f32,

    #[arg(long, value_enum, default_value = "left")]
    pub align: AlignArg,

    /// Draw layer (lower layers are drawn first)
    #[arg(long, default_value = "0", allow_negative_numbers = true)]
    pub layer: i32,

    /// Text color as RRGGBB or RRGGBBAA
    #[arg(long, default_value = "ffffff", value_parser = parse_color)]
    pub color: fontsheet::Color,

    /// Opacity (0.0 - 1.0)
    #[arg(long, default_value = "1.0")]
    pub alpha: f32,

    #[arg(long, value_enum, default_value = "none")]
    pub effect: EffectArg,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum GlyphWidthArg {
    Fixed,
    Variable,
}

impl From<GlyphWidthArg> for GlyphWidth {
    fn from(arg: GlyphWidthArg) -> Self {
        match arg {
            GlyphWidthArg::Fixed => GlyphWidth::Fixed,
            GlyphWidthArg::Variable => GlyphWidth::Variable,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum AlignArg {
    Left,
    Center,
    Right,
}

impl From<AlignArg> for Alignment {
    fn from(arg: AlignArg) -> Self {
        match arg {
            AlignArg::Left => Alignment::Left,
            AlignArg::Center => Alignment::Center,
            AlignArg::Right => Alignment::Right,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum EffectArg {
    None,
    #[value(alias = "hflip")]
    HorizontalFlip,
    #[value(alias = "vflip")]
    VerticalFlip,
}

impl From<EffectArg> for DrawingEffect {
    fn from(arg: EffectArg) -> Self {
        match arg {
            EffectArg::None => DrawingEffect::None,
            EffectArg::HorizontalFlip => DrawingEffect::HorizontalFlip,
            EffectArg::VerticalFlip => DrawingEffect::VerticalFlip,
        }
    }
}

/// Parse `RRGGBB` or `RRGGBBAA`, with or without a leading `#`
pub fn parse_color(value: &str) -> Result<fontsheet::Color, String> {
    let hex = value.trim_start_matches('#');
    if !matches!(hex.len(), 6 | 8) || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(format!("expected RRGGBB or RRGGBBAA, got {value:?}"));
    }
    let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|e| e.to_string());
    let alpha = if hex.len() == 8 { channel(6)? } else { 255 };
    Ok(fontsheet::Color::rgba(channel(0)?, channel(2)?, channel(4)?, alpha))
}
