//! Error types for fontsheet
//!
//! Only loading can fail. Once a [`crate::Font`] exists every query is a
//! total function: missing glyphs measure as nothing and draw as blank space.

use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, FontsheetError>;

/// Main error type for fontsheet
#[derive(Debug, Error)]
pub enum FontsheetError {
    #[error("Font loading failed: {0}")]
    Load(#[from] LoadError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Unknown font: {0}")]
    UnknownFont(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Other error: {0}")]
    Other(String),
}

/// Everything that can go wrong while building a font
///
/// Loading is all-or-nothing: any of these means no font was produced and
/// every surface opened along the way has already been released.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Font file not found: {}", .0.display())]
    FileNotFound(PathBuf),

    #[error("Failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid font description {}: {message}", path.display())]
    Description { path: PathBuf, message: String },

    #[error("Malformed character range: {0:?}")]
    MalformedRange(String),

    #[error("Failed to decode image {}: {message}", path.display())]
    ImageDecode { path: PathBuf, message: String },

    #[error("Bad sheet geometry in {}: {message}", path.display())]
    SheetGeometry { path: PathBuf, message: String },

    #[error("Character {ch:?} lands on row {row}, beyond the bottom of {}", path.display())]
    RangeOutOfBounds { path: PathBuf, ch: char, row: u32 },

    #[error("Invalid font data: {0}")]
    InvalidFontData(String),

    #[error("Invalid font size: {0}")]
    InvalidSize(f32),
}

impl LoadError {
    pub fn description(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        LoadError::Description {
            path: path.into(),
            message: message.into(),
        }
    }

    pub fn geometry(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        LoadError::SheetGeometry {
            path: path.into(),
            message: message.into(),
        }
    }
}
