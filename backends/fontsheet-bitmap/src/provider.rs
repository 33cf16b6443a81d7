use std::any::Any;
use std::sync::Arc;

use fontsheet_core::{Glyph, GlyphProvider, GlyphTable, Layer, Surface};

/// Sliced sheets plus the table pointing into them
///
/// Nothing here changes after loading, so lookups take no locks.
#[derive(Debug)]
pub struct BitmapProvider {
    table: GlyphTable,
    glyphs: Vec<Arc<Surface>>,
    shadows: Vec<Option<Arc<Surface>>>,
}

impl BitmapProvider {
    pub(crate) fn new(
        table: GlyphTable,
        glyphs: Vec<Arc<Surface>>,
        shadows: Vec<Option<Arc<Surface>>>,
    ) -> Self {
        Self {
            table,
            glyphs,
            shadows,
        }
    }

    pub fn table(&self) -> &GlyphTable {
        &self.table
    }
}

impl GlyphProvider for BitmapProvider {
    fn name(&self) -> &'static str {
        "bitmap"
    }

    fn glyph(&self, ch: char) -> Option<Glyph> {
        self.table.get(ch)
    }

    fn surface(&self, layer: Layer, index: usize) -> Option<Arc<Surface>> {
        match layer {
            Layer::Glyph => self.glyphs.get(index).cloned(),
            Layer::Shadow => self.shadows.get(index).cloned().flatten(),
        }
    }

    fn surface_count(&self) -> usize {
        self.glyphs.len()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
