//! CLI definitions using clap derive API
//!
//! Running `comfyup` without a subcommand performs the install. Its options
//! live in `install`; `completions` holds the completions subcommand.

use clap::builder::{Styles, styling::AnsiColor};
use clap::{Parser, Subcommand};

pub mod completions;
pub mod install;

pub use completions::CompletionsArgs;
pub use install::InstallArgs;

/// comfyup - ComfyUI + ZLUDA installer
///
/// Creates the virtual environment, installs requirements, writes a launcher
/// and copies the ZLUDA libraries into torch.
#[derive(Parser, Debug)]
#[command(
    name = "comfyup",
    author,
    version,
    color = clap::ColorChoice::Auto,
    styles = Styles::styled()
        .header(AnsiColor::Green.on_default().bold())
        .usage(AnsiColor::Green.on_default().bold())
        .literal(AnsiColor::Cyan.on_default().bold())
        .placeholder(AnsiColor::Cyan.on_default()),
    about = "Installer for ComfyUI with ZLUDA",
    long_about = "comfyup provisions a ComfyUI checkout: it creates a virtual environment, \
                  installs requirements.txt, optionally writes a launcher script and desktop \
                  shortcut, and copies ZLUDA's renamed CUDA libraries into torch.",
    after_help = "\x1b[1m\x1b[32mExamples:\x1b[0m\n   \
                  comfyup                               \x1b[90m# Interactive install\x1b[0m\n   \
                  comfyup -y --args \"--lowvram\"         \x1b[90m# Launcher with arguments, no prompts\x1b[0m\n   \
                  comfyup --no-launcher -r ~/ComfyUI    \x1b[90m# Install only, explicit directory\x1b[0m\n   \
                  comfyup --shell powershell            \x1b[90m# PowerShell launcher\x1b[0m\n\n\
                  "
)]
pub struct Cli {
    /// Enable verbose output
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    #[command(flatten)]
    pub install: InstallArgs,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show version information
    #[command(hide = true)]
    Version,

    /// Generate shell completions
    Completions(CompletionsArgs),
}
