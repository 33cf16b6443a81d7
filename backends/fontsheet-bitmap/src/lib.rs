//! Fontsheet Bitmap - fonts cut out of PNG sprite sheets
//!
//! Pixel-art games ship their fonts as pictures: one PNG per character set,
//! every glyph drawn into a cell of the same size. This backend reads a
//! small TOML description, slices each sheet into cells, and works out how
//! wide every glyph really is.
//!
//! ## Fixed or variable
//!
//! Fixed fonts advance by the cell width, always. Variable fonts trim the
//! transparent columns on either side of each glyph so proportional text
//! packs tightly. Digits stay cell-wide in both modes so numbers line up in
//! score counters.
//!
//! ## All or nothing
//!
//! Any problem with the description or a sheet aborts the load. Sheets that
//! were already decoded are dropped on the way out.

pub mod description;
mod provider;
pub mod sheet;

use std::path::Path;
use std::sync::Arc;

use fontsheet_core::{
    Font, FontMetrics, FontSource, Glyph, GlyphTableBuilder, GlyphWidth, LayoutConfig, LoadError,
    Rect, Surface, Vector,
};

pub use description::{parse_range, CharEntry, FontDescription, SurfaceDescription};
pub use provider::BitmapProvider;

/// Knobs for slicing sheets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BitmapOptions {
    /// Columns whose alpha never rises above this count as empty
    pub alpha_threshold: u8,
}

impl Default for BitmapOptions {
    fn default() -> Self {
        Self {
            alpha_threshold: 64,
        }
    }
}

/// Load a bitmap font with default options
pub fn load_bitmap_font(
    path: impl AsRef<Path>,
    glyph_width: GlyphWidth,
    shadow_size: u32,
) -> Result<Font, LoadError> {
    BitmapLoader::new().load(path.as_ref(), glyph_width, shadow_size)
}

/// Builds [`Font`]s from TOML descriptions
#[derive(Debug, Clone, Default)]
pub struct BitmapLoader {
    options: BitmapOptions,
    config: LayoutConfig,
}

impl BitmapLoader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(mut self, options: BitmapOptions) -> Self {
        self.options = options;
        self
    }

    pub fn with_config(mut self, config: LayoutConfig) -> Self {
        self.config = config;
        self
    }

    /// Read the description at `path` and every sheet it names
    ///
    /// `glyph_width` applies to surfaces that do not set `monospace`;
    /// `shadow_size` is overridden by the description's `shadow-size`.
    pub fn load(
        &self,
        path: &Path,
        glyph_width: GlyphWidth,
        shadow_size: u32,
    ) -> Result<Font, LoadError> {
        let description = FontDescription::read(path)?;
        let base = path.parent().unwrap_or_else(|| Path::new(""));
        let effective_shadow = description.shadow_size.unwrap_or(shadow_size);

        let slicer = Slicer {
            description: &description,
            options: &self.options,
            default_width: glyph_width,
        };

        let mut builder = GlyphTableBuilder::new();
        let mut glyphs = Vec::with_capacity(description.surfaces.len());
        let mut shadows = Vec::with_capacity(description.surfaces.len());
        let mut line_height = None;
        let mut all_fixed = true;

        for (index, surface) in description.surfaces.iter().enumerate() {
            let glyph_path = base.join(&surface.glyphs);
            let sheet = sheet::load_sheet(&glyph_path)?;

            let shadow = match &surface.shadows {
                Some(shadow_path) => {
                    let shadow_path = base.join(shadow_path);
                    let shadow = sheet::load_sheet(&shadow_path)?;
                    if (shadow.width(), shadow.height()) != (sheet.width(), sheet.height()) {
                        return Err(LoadError::geometry(
                            &shadow_path,
                            format!(
                                "shadow sheet is {}x{} but the glyph sheet is {}x{}",
                                shadow.width(),
                                shadow.height(),
                                sheet.width(),
                                sheet.height()
                            ),
                        ));
                    }
                    Some(Arc::new(shadow))
                }
                None => {
                    if effective_shadow > 0 {
                        log::warn!(
                            "{} has a shadow size but no shadow sheet for {}",
                            path.display(),
                            surface.glyphs.display()
                        );
                    }
                    None
                }
            };

            let cells = slicer.slice(index, surface, &sheet, &glyph_path, &mut builder)?;
            line_height.get_or_insert(cells.height);
            all_fixed &= cells.mode == GlyphWidth::Fixed;

            glyphs.push(Arc::new(sheet));
            shadows.push(shadow);
        }

        let first = &description.surfaces[0];
        let metrics = FontMetrics {
            line_height: line_height.unwrap_or_default() as f32,
            char_width: first.cell_width(&description) as f32,
            shadow_size: effective_shadow,
            border: description.border,
            rtl: description.rtl,
            // What the sheets actually do, after any `monospace` overrides
            glyph_width: if all_fixed {
                GlyphWidth::Fixed
            } else {
                GlyphWidth::Variable
            },
        };

        let provider = BitmapProvider::new(builder.build(), glyphs, shadows);
        Ok(Font::new(
            FontSource::bitmap(path, glyph_width, shadow_size),
            metrics,
            self.config,
            Box::new(provider),
        ))
    }
}

/// Cuts one sheet into glyphs
struct Slicer<'a> {
    description: &'a FontDescription,
    options: &'a BitmapOptions,
    default_width: GlyphWidth,
}

/// Cell geometry shared by every glyph on one sheet
#[derive(Debug, Clone, Copy)]
struct Cells {
    width: u32,
    height: u32,
    border: u32,
    mode: GlyphWidth,
}

impl Cells {
    fn pitch_x(&self) -> u32 {
        self.width + 2 * self.border
    }

    fn pitch_y(&self) -> u32 {
        self.height + 2 * self.border
    }
}

impl Slicer<'_> {
    /// Add every glyph of `surface` to `builder`, returning the cell geometry
    fn slice(
        &self,
        index: usize,
        surface: &SurfaceDescription,
        sheet: &Surface,
        sheet_path: &Path,
        builder: &mut GlyphTableBuilder,
    ) -> Result<Cells, LoadError> {
        let border = self.description.border;
        let width = surface.cell_width(self.description);
        let pitch_x = width + 2 * border;

        if sheet.width() < pitch_x || sheet.width() % pitch_x != 0 {
            return Err(LoadError::geometry(
                sheet_path,
                format!(
                    "width {} is not a multiple of the {}px cell pitch",
                    sheet.width(),
                    pitch_x
                ),
            ));
        }
        let columns = sheet.width() / pitch_x;

        let rows: Vec<Vec<char>> = surface
            .chars
            .iter()
            .map(CharEntry::chars)
            .collect::<Result<_, _>>()?;
        let rows_used: u32 = rows
            .iter()
            .map(|chars| (chars.len() as u32).div_ceil(columns))
            .sum();

        let height = match self.description.glyph_height {
            Some(height) => height,
            None => derive_cell_height(sheet, rows_used, border, sheet_path)?,
        };

        let mode = match surface.monospace {
            Some(true) => GlyphWidth::Fixed,
            Some(false) => GlyphWidth::Variable,
            None => self.default_width,
        };
        let cells = Cells {
            width,
            height,
            border,
            mode,
        };

        let mut row = 0;
        for chars in &rows {
            for (i, &ch) in chars.iter().enumerate() {
                let col = i as u32 % columns;
                let cell_row = row + i as u32 / columns;
                let bottom = (cell_row + 1).checked_mul(cells.pitch_y());
                if !matches!(bottom, Some(bottom) if bottom <= sheet.height()) {
                    return Err(LoadError::RangeOutOfBounds {
                        path: sheet_path.to_path_buf(),
                        ch,
                        row: cell_row,
                    });
                }

                let glyph = self.cell_glyph(sheet, index, &cells, col, cell_row, ch);
                if !builder.insert(ch, glyph) {
                    log::warn!(
                        "{:?} is defined twice, keeping the first (duplicate in {})",
                        ch,
                        sheet_path.display()
                    );
                }
            }
            row += (chars.len() as u32).div_ceil(columns);
        }

        log::debug!(
            "Sliced {} into {}x{} cells ({} columns, {} rows, {:?})",
            sheet_path.display(),
            width,
            height,
            columns,
            rows_used,
            mode
        );
        Ok(cells)
    }

    fn cell_glyph(
        &self,
        sheet: &Surface,
        surface_index: usize,
        cells: &Cells,
        col: u32,
        row: u32,
        ch: char,
    ) -> Glyph {
        let cell_x = col * cells.pitch_x();
        let cell_y = row * cells.pitch_y();
        let rect = Rect::new(
            cell_x as f32,
            cell_y as f32,
            cells.pitch_x() as f32,
            cells.pitch_y() as f32,
        );
        let mut glyph = Glyph {
            advance: cells.width as f32,
            offset: Vector::ZERO,
            surface_index,
            rect,
        };

        if cells.mode == GlyphWidth::Fixed || ch.is_ascii_digit() || !sheet.has_alpha() {
            return glyph;
        }

        // Inner cell, without the border padding
        let x = cell_x + cells.border;
        let y = cell_y + cells.border;
        let threshold = self.options.alpha_threshold;
        let filled = |column: u32| !sheet.column_is_clear(column, y, y + cells.height, threshold);
        let spacing = self.description.glyph_spacing;

        let Some(left) = (x..x + cells.width).find(|&column| filled(column)) else {
            glyph.advance = cells.width as f32 + spacing as f32;
            return glyph;
        };
        let right = (left..x + cells.width)
            .rev()
            .find(|&column| filled(column))
            .unwrap_or(left);

        glyph.offset = Vector::new(x as f32 - left as f32, 0.0);
        glyph.advance = (right - left + 1) as f32 + spacing as f32;
        glyph
    }
}

/// Cell height when the description leaves it out
fn derive_cell_height(
    sheet: &Surface,
    rows: u32,
    border: u32,
    sheet_path: &Path,
) -> Result<u32, LoadError> {
    if rows == 0 || sheet.height() % rows != 0 || sheet.height() / rows <= 2 * border {
        return Err(LoadError::geometry(
            sheet_path,
            format!(
                "cannot derive glyph-height: {} rows do not evenly divide height {}",
                rows,
                sheet.height()
            ),
        ));
    }
    Ok(sheet.height() / rows - 2 * border)
}
