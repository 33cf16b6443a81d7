//! One module per subcommand

pub mod draw;
pub mod info;
pub mod measure;
pub mod wrap;

use std::io::Read;

use anyhow::Context;
use fontsheet::Font;

use crate::cli::{FontArgs, TextArgs};

/// Open the font the arguments describe
pub fn open_font(args: &FontArgs) -> anyhow::Result<Font> {
    let source = args.source()?;
    fontsheet::load_with(&source, args.layout())
        .with_context(|| format!("failed to load {}", source.path().display()))
}

/// The text argument, or all of stdin when there is none
pub fn read_text(args: &TextArgs) -> anyhow::Result<String> {
    if let Some(text) = &args.text {
        return Ok(text.clone());
    }
    let mut text = String::new();
    std::io::stdin()
        .read_to_string(&mut text)
        .context("failed to read text from stdin")?;
    // A trailing newline from `echo` is not a line of its own
    if text.ends_with('\n') {
        text.pop();
        if text.ends_with('\r') {
            text.pop();
        }
    }
    Ok(text)
}
