//! Where fonts live
//!
//! Relative font paths are resolved against a process-wide font directory.
//! It starts out as whatever `FONTSHEET_FONT_DIR` says (read once, on first
//! use) and can be overridden at runtime.
//!
//! ```bash
//! FONTSHEET_FONT_DIR=/opt/game/data/fonts ./game
//! ```

use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use parking_lot::RwLock;

/// Environment variable naming the default font directory
pub const FONT_DIR_ENV: &str = "FONTSHEET_FONT_DIR";

static ENV_FONT_DIR: OnceLock<Option<PathBuf>> = OnceLock::new();

static FONT_DIR_OVERRIDE: RwLock<Option<PathBuf>> = RwLock::new(None);

fn env_font_dir() -> Option<PathBuf> {
    ENV_FONT_DIR
        .get_or_init(|| {
            let dir = std::env::var_os(FONT_DIR_ENV)
                .filter(|value| !value.is_empty())
                .map(PathBuf::from);
            if let Some(dir) = &dir {
                log::info!("Font directory {} (from {})", dir.display(), FONT_DIR_ENV);
            }
            dir
        })
        .clone()
}

/// The directory relative font paths are resolved against, if any
pub fn font_dir() -> Option<PathBuf> {
    FONT_DIR_OVERRIDE.read().clone().or_else(env_font_dir)
}

/// Replace the font directory at runtime; `None` falls back to the environment
pub fn set_font_dir(dir: Option<PathBuf>) {
    log::debug!("Font directory override set to {:?}", dir);
    *FONT_DIR_OVERRIDE.write() = dir;
}

/// Absolute paths pass through; relative ones land in [`font_dir`]
///
/// The result is anchored at the working directory when it would still be
/// relative, so resolving an already resolved path changes nothing. Loaded
/// fonts keep the resolved path, and reloading them must find the same file.
pub fn resolve(path: &Path) -> PathBuf {
    let path = match font_dir() {
        Some(dir) if path.is_relative() => dir.join(path),
        _ => path.to_path_buf(),
    };
    if path.is_absolute() {
        return path;
    }
    match std::env::current_dir() {
        Ok(cwd) => cwd.join(path),
        Err(e) => {
            log::debug!("No working directory to anchor {}: {}", path.display(), e);
            path
        }
    }
}
