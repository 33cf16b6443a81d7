use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use fontsheet::prelude::*;
use fontsheet::{LoadError, RecordingPainter};

fn scratch(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("fontsheet-facade-{}-{}", std::process::id(), name));
    let _ = fs::remove_dir_all(&dir);
    fs::create_dir_all(&dir).unwrap();
    dir
}

/// A 4-cell, 8px, fully inked sheet and a description covering "abcd"
fn write_font(dir: &Path) -> PathBuf {
    let (width, height) = (32u32, 8u32);
    let data = vec![255u8; (width * height * 4) as usize];
    let file = fs::File::create(dir.join("sheet.png")).unwrap();
    let mut encoder = png::Encoder::new(std::io::BufWriter::new(file), width, height);
    encoder.set_color(png::ColorType::Rgba);
    encoder.set_depth(png::BitDepth::Eight);
    encoder.write_header().unwrap().write_image_data(&data).unwrap();

    let description = dir.join("font.toml");
    fs::write(
        &description,
        "glyph-width = 8\n[[surface]]\nglyphs = \"sheet.png\"\nchars = [\"abcd\"]\n",
    )
    .unwrap();
    description
}

#[test]
fn loads_lazily_and_shares() {
    let dir = scratch("lazy");
    let registry = FontRegistry::new();
    registry.register("body", FontSource::bitmap(write_font(&dir), GlyphWidth::Fixed, 0));

    assert!(registry.is_registered("body"));
    assert!(!registry.is_loaded("body"));

    let first = registry.get("body").unwrap();
    let second = registry.get("body").unwrap();
    assert!(Arc::ptr_eq(&first, &second));
    assert!(registry.is_loaded("body"));
    assert_eq!(first.text_width("abcd"), 32.0);
}

#[test]
fn release_keeps_outstanding_handles_alive() {
    let dir = scratch("release");
    let registry = FontRegistry::new();
    registry.register("body", FontSource::bitmap(write_font(&dir), GlyphWidth::Fixed, 0));

    let held = registry.get("body").unwrap();
    assert!(registry.release("body"));
    assert!(!registry.release("body"));
    assert!(!registry.is_loaded("body"));
    assert_eq!(held.height(), 8.0, "our handle still works");

    let fresh = registry.get("body").unwrap();
    assert!(!Arc::ptr_eq(&held, &fresh), "released fonts are loaded anew");
}

#[test]
fn unknown_names_are_errors() {
    let registry = FontRegistry::new();
    assert!(matches!(
        registry.get("nope"),
        Err(FontsheetError::UnknownFont(name)) if name == "nope"
    ));
}

#[test]
fn failed_loads_are_not_cached() {
    let dir = scratch("failing");
    let registry = FontRegistry::new();
    registry.register("broken", FontSource::bitmap(dir.join("missing.toml"), GlyphWidth::Fixed, 0));

    assert!(matches!(
        registry.get("broken"),
        Err(FontsheetError::Load(LoadError::FileNotFound(_)))
    ));
    assert!(!registry.is_loaded("broken"));
}

#[test]
fn reload_is_an_independent_copy() {
    let dir = scratch("reload");
    let config = LayoutConfig::default().with_missing_glyph_advance(5.0);
    let original = fontsheet::load_with(
        &FontSource::bitmap(write_font(&dir), GlyphWidth::Fixed, 0),
        config,
    )
    .unwrap();

    let copy = fontsheet::reload(&original).unwrap();
    assert_eq!(copy.source(), original.source());
    assert_eq!(copy.config(), original.config());
    assert_eq!(copy.metrics(), original.metrics());
    assert_eq!(copy.missing_glyph_advance(), 5.0);
}

#[test]
fn reloads_under_a_relative_font_dir() {
    // Relative to the test's working directory on purpose
    let dir = PathBuf::from(format!("fontsheet-relative-{}", std::process::id()));
    let _ = fs::remove_dir_all(&dir);
    fs::create_dir_all(&dir).unwrap();
    write_font(&dir);

    fontsheet::config::set_font_dir(Some(dir.clone()));
    let loaded = fontsheet::load(&FontSource::bitmap("font.toml", GlyphWidth::Fixed, 0));
    let reloaded = loaded.as_ref().ok().map(fontsheet::reload);

    let registry = FontRegistry::new();
    let reinserted = loaded.as_ref().ok().map(|font| {
        fontsheet::reload(font).and_then(|copy| {
            registry.insert("body", copy);
            registry.release("body");
            registry.get("body")
        })
    });
    fontsheet::config::set_font_dir(None);
    let _ = fs::remove_dir_all(&dir);

    let font = loaded.unwrap();
    assert!(font.file_name().is_absolute());
    assert!(font.file_name().ends_with(dir.join("font.toml")));

    let copy = reloaded.unwrap().unwrap();
    assert_eq!(copy.source(), font.source());
    assert_eq!(copy.text_width("ab"), 16.0);

    let again = reinserted.unwrap().unwrap();
    assert_eq!(again.source(), font.source());
}

#[test]
fn registry_fonts_draw_through_a_context() {
    let dir = scratch("draw");
    let registry = FontRegistry::new();
    let font = registry.insert(
        "body",
        fontsheet::load(&FontSource::bitmap(write_font(&dir), GlyphWidth::Fixed, 0)).unwrap(),
    );
    assert!(Arc::ptr_eq(&font, &registry.get("body").unwrap()));

    let mut context = DrawingContext::new();
    context.draw_text(&font, "ab\nc", Vector::new(0.0, 0.0), Alignment::Left, 0, Color::white());
    let mut painter = RecordingPainter::new();
    context.do_drawing(&mut painter);

    let dests: Vec<(f32, f32)> = painter.commands.iter().map(|c| (c.dest.x, c.dest.y)).collect();
    assert_eq!(dests, vec![(0.0, 0.0), (8.0, 0.0), (0.0, 8.0)]);
}

#[test]
fn outline_sources_report_missing_files() {
    let result = fontsheet::load(&FontSource::outline("/no/such/font.ttf", 12.0, 0, 0));
    assert!(matches!(
        result,
        Err(FontsheetError::Load(LoadError::FileNotFound(_)))
    ));
}

#[test]
fn names_are_sorted_and_unregister_forgets() {
    let registry = FontRegistry::new();
    registry.register("zeta", FontSource::bitmap("z.toml", GlyphWidth::Fixed, 0));
    registry.register("alpha", FontSource::bitmap("a.toml", GlyphWidth::Fixed, 0));
    assert_eq!(registry.names(), vec!["alpha".to_string(), "zeta".to_string()]);

    assert!(registry.unregister("zeta"));
    assert!(!registry.is_registered("zeta"));
    assert!(!registry.unregister("zeta"));
}
