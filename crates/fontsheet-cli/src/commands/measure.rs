//! Measure command

use crate::cli::TextArgs;
use crate::output::{emit, CoverageReport, MeasureReport};

pub fn run(args: &TextArgs, pretty: bool) -> anyhow::Result<()> {
    let font = super::open_font(&args.font)?;
    let text = super::read_text(args)?;
    log::debug!("Measuring {} chars with {}", text.chars().count(), font.backend_name());

    emit(
        &MeasureReport {
            width: font.text_width(&text),
            height: font.text_height(&text),
            lines: fontsheet::layout::line_count(&text),
            coverage: CoverageReport::check(&font, &text),
        },
        pretty,
    )
}
