//! comfyup - ComfyUI + ZLUDA installer
//!
//! Provisions a ComfyUI checkout: virtual environment, requirements, an
//! optional launcher script and desktop shortcut, and ZLUDA's renamed CUDA
//! libraries copied into torch.

use clap::Parser;
use miette::Diagnostic;

mod cli;
mod commands;
mod config;
mod error;
mod launcher;
mod logging;
mod preflight;
mod process;
mod sequencer;
mod shell;
mod shortcut;
mod ui;
mod vendor;
mod venv;

#[cfg(all(test, unix))]
mod test_fixtures;

use cli::{Cli, Commands};

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let result = match cli.command {
        Some(Commands::Version) => commands::version::run(),
        Some(Commands::Completions(args)) => commands::completions::run(args),
        None => commands::install::run(cli.install),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        if let Some(help) = e.help() {
            eprintln!("  help: {}", help);
        }
        std::process::exit(1);
    }
}
