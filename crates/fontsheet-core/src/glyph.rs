//! Glyph metrics and the sparse table that holds them
//!
//! Bitmap fonts usually cover a few short codepoint ranges, so the table is
//! a sorted list of contiguous runs rather than one slot per codepoint.
//! Lookups binary-search the runs, then index straight into the hit.

use std::collections::BTreeMap;

use crate::types::{Rect, Vector};

/// Small holes inside a run are cheaper than starting a new one
const MAX_RUN_GAP: u32 = 8;

/// Where one glyph lives and how it moves the cursor
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Glyph {
    /// How far the cursor moves after drawing this glyph
    pub advance: f32,
    /// Draw position relative to the cursor
    pub offset: Vector,
    /// Which surface (and shadow surface) holds the pixels
    pub surface_index: usize,
    /// Crop region inside that surface
    pub rect: Rect,
}

/// One contiguous stretch of codepoints starting at `first`
#[derive(Debug, Clone)]
struct GlyphRun {
    first: u32,
    glyphs: Vec<Option<Glyph>>,
}

impl GlyphRun {
    fn end(&self) -> u32 {
        self.first + self.glyphs.len() as u32
    }
}

/// Read-only glyph lookup keyed by `char`
#[derive(Debug, Clone, Default)]
pub struct GlyphTable {
    runs: Vec<GlyphRun>,
    len: usize,
}

impl GlyphTable {
    pub fn builder() -> GlyphTableBuilder {
        GlyphTableBuilder::default()
    }

    /// The glyph for `ch`, or `None` when this font cannot draw it
    pub fn get(&self, ch: char) -> Option<Glyph> {
        let cp = ch as u32;
        let idx = self.runs.partition_point(|run| run.end() <= cp);
        let run = self.runs.get(idx)?;
        if cp < run.first {
            return None;
        }
        run.glyphs[(cp - run.first) as usize]
    }

    pub fn contains(&self, ch: char) -> bool {
        self.get(ch).is_some()
    }

    /// Number of present glyphs
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// How many runs the table was packed into
    pub fn run_count(&self) -> usize {
        self.runs.len()
    }

    /// Present glyphs in codepoint order
    pub fn iter(&self) -> impl Iterator<Item = (char, Glyph)> + '_ {
        self.runs.iter().flat_map(|run| {
            run.glyphs.iter().enumerate().filter_map(move |(i, glyph)| {
                let ch = char::from_u32(run.first + i as u32)?;
                (*glyph).map(|g| (ch, g))
            })
        })
    }
}

/// Collects glyphs during loading, then packs them into runs
#[derive(Debug, Default)]
pub struct GlyphTableBuilder {
    entries: BTreeMap<char, Glyph>,
}

impl GlyphTableBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a glyph; the first definition of a codepoint wins
    ///
    /// Returns `false` when `ch` was already defined.
    pub fn insert(&mut self, ch: char, glyph: Glyph) -> bool {
        if self.entries.contains_key(&ch) {
            return false;
        }
        self.entries.insert(ch, glyph);
        true
    }

    pub fn contains(&self, ch: char) -> bool {
        self.entries.contains_key(&ch)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn build(self) -> GlyphTable {
        let len = self.entries.len();
        let mut runs: Vec<GlyphRun> = Vec::new();

        for (ch, glyph) in self.entries {
            let cp = ch as u32;
            if let Some(run) = runs
                .last_mut()
                .filter(|run| cp - run.end() <= MAX_RUN_GAP)
            {
                let gap = (cp - run.end()) as usize;
                run.glyphs.extend(std::iter::repeat(None).take(gap));
                run.glyphs.push(Some(glyph));
                continue;
            }
            runs.push(GlyphRun {
                first: cp,
                glyphs: vec![Some(glyph)],
            });
        }

        log::debug!("Packed {} glyphs into {} runs", len, runs.len());
        GlyphTable { runs, len }
    }
}
