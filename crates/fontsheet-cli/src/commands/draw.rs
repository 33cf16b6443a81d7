//! Draw command: queue the text, flush it into a recorder, print the calls

use std::sync::Arc;

use fontsheet::{DrawingContext, RecordingPainter, Vector};

use crate::cli::DrawArgs;
use crate::output::{emit, DrawReport};

pub fn run(args: &DrawArgs, pretty: bool) -> anyhow::Result<()> {
    let font = Arc::new(super::open_font(&args.input.font)?);
    let text = super::read_text(&args.input)?;

    let mut context = DrawingContext::new();
    context.set_alpha(args.alpha);
    context.set_drawing_effect(args.effect.into());
    context.draw_text(
        &font,
        &text,
        Vector::new(args.x, args.y),
        args.align.into(),
        args.layer,
        args.color,
    );

    let mut painter = RecordingPainter::new();
    context.do_drawing(&mut painter);
    log::debug!("Recorded {} draw calls", painter.commands.len());

    emit(
        &DrawReport {
            width: font.text_width(&text),
            height: font.text_height(&text),
            commands: painter.commands.iter().map(Into::into).collect(),
        },
        pretty,
    )
}
