//! The TOML file that says which sheet holds which characters
//!
//! ```toml
//! glyph-width = 16
//! shadow-size = 2
//!
//! [[surface]]
//! glyphs = "white.png"
//! shadows = "white-shadow.png"
//! chars = [" !\"#$%&'()*+,-./", { range = "U+0030..U+0039" }]
//! ```
//!
//! Paths are relative to the description file. Every `chars` entry starts
//! on a fresh row of cells.

use std::path::{Path, PathBuf};

use fontsheet_core::LoadError;
use serde::Deserialize;

fn default_glyph_spacing() -> u32 {
    1
}

/// A whole bitmap font description
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct FontDescription {
    /// Default cell width for every surface
    pub glyph_width: Option<u32>,
    /// Cell height; derived from the sheet height when omitted
    pub glyph_height: Option<u32>,
    /// Overrides the shadow size the caller asked for
    pub shadow_size: Option<u32>,
    #[serde(default)]
    pub border: u32,
    #[serde(default)]
    pub rtl: bool,
    /// Extra advance after each trimmed glyph
    #[serde(default = "default_glyph_spacing")]
    pub glyph_spacing: u32,
    #[serde(rename = "surface", default)]
    pub surfaces: Vec<SurfaceDescription>,
}

/// One glyph sheet and the characters laid out on it
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct SurfaceDescription {
    pub glyphs: PathBuf,
    pub shadows: Option<PathBuf>,
    pub glyph_width: Option<u32>,
    /// `true` forces fixed advances, `false` variable ones
    pub monospace: Option<bool>,
    pub chars: Vec<CharEntry>,
}

/// One row's worth of characters
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum CharEntry {
    /// Successive characters go into successive cells
    Literal(String),
    /// Every codepoint of `U+XXXX..U+YYYY`, both ends included
    Range { range: String },
}

impl CharEntry {
    pub fn chars(&self) -> Result<Vec<char>, LoadError> {
        match self {
            CharEntry::Literal(text) => Ok(text.chars().collect()),
            CharEntry::Range { range } => {
                let (first, last) = parse_range(range)?;
                Ok((first..=last).collect())
            }
        }
    }
}

/// Parse `U+0041..U+005A` into its two ends
///
/// Surrogate codepoints are not characters, so a range spanning them simply
/// skips them when iterated.
pub fn parse_range(range: &str) -> Result<(char, char), LoadError> {
    let malformed = || LoadError::MalformedRange(range.to_string());

    let (first, last) = range.split_once("..").ok_or_else(malformed)?;
    let first = parse_codepoint(first).ok_or_else(malformed)?;
    let last = parse_codepoint(last).ok_or_else(malformed)?;
    if first > last {
        return Err(malformed());
    }
    Ok((first, last))
}

fn parse_codepoint(text: &str) -> Option<char> {
    let text = text.trim();
    let hex = text
        .strip_prefix("U+")
        .or_else(|| text.strip_prefix("u+"))?;
    if hex.is_empty() || hex.len() > 6 {
        return None;
    }
    let value = u32::from_str_radix(hex, 16).ok()?;
    char::from_u32(value)
}

impl FontDescription {
    /// Parse description text; `path` only labels errors
    pub fn parse(text: &str, path: &Path) -> Result<Self, LoadError> {
        let description: FontDescription =
            toml::from_str(text).map_err(|e| LoadError::description(path, e.to_string()))?;
        description.validate(path)?;
        Ok(description)
    }

    /// Read and parse a description file
    pub fn read(path: &Path) -> Result<Self, LoadError> {
        if !path.exists() {
            return Err(LoadError::FileNotFound(path.to_path_buf()));
        }
        let text = std::fs::read_to_string(path).map_err(|source| LoadError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&text, path)
    }

    fn validate(&self, path: &Path) -> Result<(), LoadError> {
        if self.surfaces.is_empty() {
            return Err(LoadError::description(path, "no [[surface]] tables"));
        }
        if self.glyph_height == Some(0) {
            return Err(LoadError::description(path, "glyph-height must be positive"));
        }
        if let Some(height) = self.glyph_height {
            self.pitch(height, path)?;
        }
        for surface in &self.surfaces {
            match surface.glyph_width.or(self.glyph_width) {
                None => {
                    return Err(LoadError::description(
                        path,
                        format!("no glyph-width for {}", surface.glyphs.display()),
                    ))
                }
                Some(0) => {
                    return Err(LoadError::description(path, "glyph-width must be positive"));
                }
                Some(width) => {
                    self.pitch(width, path)?;
                }
            }
            if surface.chars.is_empty() {
                return Err(LoadError::description(
                    path,
                    format!("empty chars for {}", surface.glyphs.display()),
                ));
            }
        }
        Ok(())
    }

    /// Cell size plus border padding on both sides, if it fits in a `u32`
    fn pitch(&self, cell: u32, path: &Path) -> Result<u32, LoadError> {
        self.border
            .checked_mul(2)
            .and_then(|padding| padding.checked_add(cell))
            .ok_or_else(|| {
                LoadError::geometry(
                    path,
                    format!("a {}px cell with a {}px border is too large", cell, self.border),
                )
            })
    }
}

impl SurfaceDescription {
    /// The cell width this sheet is sliced with
    pub fn cell_width(&self, description: &FontDescription) -> u32 {
        self.glyph_width
            .or(description.glyph_width)
            .unwrap_or_default()
    }
}
