//! Wrap command
//!
//! One call of the wrapper by default: the head becomes the only line and
//! the rest is reported as overflow. With `--all` the overflow is fed back
//! in until it runs dry.

use fontsheet::Font;

use crate::cli::WrapArgs;
use crate::output::{emit, WrapReport};

pub fn run(args: &WrapArgs, pretty: bool) -> anyhow::Result<()> {
    let font = super::open_font(&args.input.font)?;
    let text = super::read_text(&args.input)?;

    let step = |text: &str| match (args.chars, args.width) {
        (Some(max_chars), _) => Font::wrap_to_chars(text, max_chars),
        (None, Some(budget)) => font.wrap_to_width(text, budget),
        (None, None) => (text.to_string(), String::new()),
    };
    emit(&wrap(&text, args.all, step), pretty)
}

/// Apply `step` once, or repeatedly while it keeps consuming input
pub fn wrap<F>(text: &str, all: bool, step: F) -> WrapReport
where
    F: Fn(&str) -> (String, String),
{
    let mut lines = Vec::new();
    let mut rest = text.to_string();
    loop {
        let (head, overflow) = step(&rest);
        let stalled = overflow.len() >= rest.len();
        lines.push(head);
        rest = overflow;
        if !all || rest.is_empty() {
            break;
        }
        if stalled {
            log::warn!("Wrap made no progress on {:?}; stopping", rest);
            break;
        }
    }
    WrapReport {
        lines,
        overflow: rest,
    }
}
