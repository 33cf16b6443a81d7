//! Named fonts, loaded on first use and shared from then on

use std::collections::HashMap;
use std::sync::Arc;

use fontsheet_core::{Font, FontSource, FontsheetError, LayoutConfig, Result};
use parking_lot::RwLock;

/// Fonts by name
///
/// Registering only records how to load a font. The first [`get`] loads it;
/// later calls hand out the same `Arc`. Releasing forgets the loaded font,
/// which is freed once the last outstanding `Arc` is dropped.
///
/// [`get`]: FontRegistry::get
#[derive(Debug, Default)]
pub struct FontRegistry {
    sources: RwLock<HashMap<String, (FontSource, LayoutConfig)>>,
    fonts: RwLock<HashMap<String, Arc<Font>>>,
}

impl FontRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&self, name: impl Into<String>, source: FontSource) {
        self.register_with(name, source, LayoutConfig::default());
    }

    /// Remember how to load `name`; replaces any earlier registration
    pub fn register_with(&self, name: impl Into<String>, source: FontSource, config: LayoutConfig) {
        let name = name.into();
        log::debug!("Registered font {:?} -> {}", name, source.path().display());
        self.sources.write().insert(name, (source, config));
    }

    /// Adopt an already loaded font under `name`
    pub fn insert(&self, name: impl Into<String>, font: Font) -> Arc<Font> {
        let name = name.into();
        let font = Arc::new(font);
        self.sources
            .write()
            .insert(name.clone(), (font.source().clone(), *font.config()));
        self.fonts.write().insert(name, Arc::clone(&font));
        font
    }

    /// The font called `name`, loading it if this is the first request
    pub fn get(&self, name: &str) -> Result<Arc<Font>> {
        if let Some(font) = self.fonts.read().get(name) {
            return Ok(Arc::clone(font));
        }

        let (source, config) = self
            .sources
            .read()
            .get(name)
            .cloned()
            .ok_or_else(|| FontsheetError::UnknownFont(name.to_string()))?;
        let font = crate::load_with(&source, config)?;

        let mut fonts = self.fonts.write();
        // A racing get may have loaded it first; keep that one
        let font = fonts
            .entry(name.to_string())
            .or_insert_with(|| Arc::new(font));
        Ok(Arc::clone(font))
    }

    pub fn is_loaded(&self, name: &str) -> bool {
        self.fonts.read().contains_key(name)
    }

    pub fn is_registered(&self, name: &str) -> bool {
        self.sources.read().contains_key(name)
    }

    /// Registered names, sorted
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.sources.read().keys().cloned().collect();
        names.sort();
        names
    }

    /// Drop the loaded font for `name` but keep its registration
    ///
    /// Returns whether anything was loaded.
    pub fn release(&self, name: &str) -> bool {
        let released = self.fonts.write().remove(name).is_some();
        if released {
            log::debug!("Released font {:?}", name);
        }
        released
    }

    /// Drop every loaded font
    pub fn release_all(&self) {
        self.fonts.write().clear();
    }

    /// Forget `name` entirely
    pub fn unregister(&self, name: &str) -> bool {
        self.release(name);
        self.sources.write().remove(name).is_some()
    }
}
