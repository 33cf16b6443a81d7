//! Info command: backend, metrics and optional coverage check

use fontsheet::Font;

use crate::cli::InfoArgs;
use crate::output::{emit, CoverageReport, FontReport};

pub fn run(args: &InfoArgs, pretty: bool) -> anyhow::Result<()> {
    let font = super::open_font(&args.font)?;
    emit(&report(&font, args.check.as_deref()), pretty)
}

pub fn report(font: &Font, check: Option<&str>) -> FontReport {
    FontReport {
        file: font.file_name().display().to_string(),
        backend: font.backend_name(),
        metrics: font.metrics().into(),
        glyph_count: glyph_count(font),
        surfaces: font.surface_count(),
        coverage: check.map(|text| CoverageReport::check(font, text)),
    }
}

#[cfg(feature = "bitmap")]
fn glyph_count(font: &Font) -> Option<usize> {
    font.backend::<fontsheet::bitmap::BitmapProvider>()
        .map(|provider| provider.table().len())
}

#[cfg(not(feature = "bitmap"))]
fn glyph_count(_font: &Font) -> Option<usize> {
    None
}
