//! Fontsheet CLI - inspect, measure, wrap and lay out fonts from the shell

mod cli;
mod commands;
mod output;

use clap::Parser;
use cli::{Cli, Commands};

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    if let Some(dir) = &cli.font_dir {
        fontsheet::config::set_font_dir(Some(dir.clone()));
    }

    match &cli.command {
        Commands::Info(args) => commands::info::run(args, cli.pretty),
        Commands::Measure(args) => commands::measure::run(args, cli.pretty),
        Commands::Wrap(args) => commands::wrap::run(args, cli.pretty),
        Commands::Draw(args) => commands::draw::run(args, cli.pretty),
    }
}
