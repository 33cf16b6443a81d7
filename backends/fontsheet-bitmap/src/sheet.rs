//! PNG sheet decoding
//!
//! Every sheet ends up as straight RGBA8, whatever the file stored. Sheets
//! without an alpha channel are remembered as such because trimming needs
//! real transparency to find glyph edges.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use fontsheet_core::{BitmapFormat, LoadError, Surface};

pub fn load_sheet(path: &Path) -> Result<Surface, LoadError> {
    if !path.exists() {
        return Err(LoadError::FileNotFound(path.to_path_buf()));
    }
    let file = File::open(path).map_err(|source| LoadError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    decode_sheet(BufReader::new(file), path)
}

/// Decode PNG bytes from `reader`; `path` only labels errors
pub fn decode_sheet<R: std::io::Read>(reader: R, path: &Path) -> Result<Surface, LoadError> {
    let decode_error = |message: String| LoadError::ImageDecode {
        path: path.to_path_buf(),
        message,
    };

    let mut decoder = png::Decoder::new(reader);
    // Palettes and low bit depths come out as plain 8-bit channels
    decoder.set_transformations(png::Transformations::EXPAND | png::Transformations::STRIP_16);
    let mut reader = decoder.read_info().map_err(|e| decode_error(e.to_string()))?;

    let mut buf = vec![0; reader.output_buffer_size()];
    let info = reader
        .next_frame(&mut buf)
        .map_err(|e| decode_error(e.to_string()))?;
    let pixels = &buf[..info.buffer_size()];

    let (rgba, has_alpha) = match info.color_type {
        png::ColorType::Rgba => (pixels.to_vec(), true),
        png::ColorType::Rgb => {
            let mut rgba = Vec::with_capacity(pixels.len() / 3 * 4);
            for chunk in pixels.chunks_exact(3) {
                rgba.extend_from_slice(chunk);
                rgba.push(255);
            }
            (rgba, false)
        }
        png::ColorType::GrayscaleAlpha => {
            let mut rgba = Vec::with_capacity(pixels.len() * 2);
            for chunk in pixels.chunks_exact(2) {
                rgba.extend_from_slice(&[chunk[0], chunk[0], chunk[0], chunk[1]]);
            }
            (rgba, true)
        }
        png::ColorType::Grayscale => {
            let mut rgba = Vec::with_capacity(pixels.len() * 4);
            for &gray in pixels {
                rgba.extend_from_slice(&[gray, gray, gray, 255]);
            }
            (rgba, false)
        }
        png::ColorType::Indexed => {
            return Err(decode_error("indexed color survived expansion".into()));
        }
    };

    log::debug!(
        "Decoded sheet {} ({}x{}, {:?}{})",
        path.display(),
        info.width,
        info.height,
        info.color_type,
        if has_alpha { "" } else { ", no alpha" }
    );

    let surface = Surface::new(info.width, info.height, BitmapFormat::Rgba8, rgba)?;
    Ok(if has_alpha {
        surface
    } else {
        surface.without_alpha()
    })
}
