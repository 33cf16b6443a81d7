//! Surfaces: the images glyphs are cut from
//!
//! A surface is deliberately dumb. It knows its size, its pixel format, and
//! its bytes. Painters key uploads on [`SurfaceId`], which is unique for the
//! life of the process.

use std::sync::atomic::{AtomicU64, Ordering};

use crate::error::LoadError;

static NEXT_SURFACE_ID: AtomicU64 = AtomicU64::new(1);

/// Process-unique identity of a surface
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SurfaceId(u64);

impl SurfaceId {
    fn next() -> Self {
        SurfaceId(NEXT_SURFACE_ID.fetch_add(1, Ordering::Relaxed))
    }

    pub fn get(self) -> u64 {
        self.0
    }
}

/// How pixels are arranged in the surface
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BitmapFormat {
    /// Straight (non-premultiplied) RGBA, 4 bytes per pixel
    Rgba8,
    /// Coverage only, 1 byte per pixel
    Gray8,
}

impl BitmapFormat {
    pub fn bytes_per_pixel(self) -> usize {
        match self {
            BitmapFormat::Rgba8 => 4,
            BitmapFormat::Gray8 => 1,
        }
    }
}

/// A 2-D image resource a painter can crop and blit
#[derive(Debug)]
pub struct Surface {
    id: SurfaceId,
    width: u32,
    height: u32,
    format: BitmapFormat,
    has_alpha: bool,
    data: Vec<u8>,
}

impl Surface {
    /// Wrap decoded pixels, checking the buffer matches the claimed size
    pub fn new(
        width: u32,
        height: u32,
        format: BitmapFormat,
        data: Vec<u8>,
    ) -> std::result::Result<Self, LoadError> {
        let expected = width as usize * height as usize * format.bytes_per_pixel();
        if data.len() != expected {
            return Err(LoadError::InvalidFontData(format!(
                "surface buffer holds {} bytes, {}x{} {:?} needs {}",
                data.len(),
                width,
                height,
                format,
                expected
            )));
        }

        Ok(Self {
            id: SurfaceId::next(),
            width,
            height,
            format,
            has_alpha: true,
            data,
        })
    }

    /// Mark an RGBA surface whose source carried no alpha channel
    ///
    /// Such sheets are fully opaque, so transparent-column trimming cannot
    /// find glyph edges in them.
    pub fn without_alpha(mut self) -> Self {
        self.has_alpha = false;
        self
    }

    pub fn id(&self) -> SurfaceId {
        self.id
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn format(&self) -> BitmapFormat {
        self.format
    }

    pub fn has_alpha(&self) -> bool {
        self.has_alpha
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Coverage of one pixel, 0 when outside the surface
    pub fn alpha_at(&self, x: u32, y: u32) -> u8 {
        if x >= self.width || y >= self.height {
            return 0;
        }
        let idx = y as usize * self.width as usize + x as usize;
        match self.format {
            BitmapFormat::Rgba8 => self.data[idx * 4 + 3],
            BitmapFormat::Gray8 => self.data[idx],
        }
    }

    /// Whether column `x` stays at or below `threshold` for rows `y0..y1`
    pub fn column_is_clear(&self, x: u32, y0: u32, y1: u32, threshold: u8) -> bool {
        (y0..y1).all(|y| self.alpha_at(x, y) <= threshold)
    }
}
