use clap::Args;
use std::path::PathBuf;

use crate::shell::ShellDialect;

/// Options of the install run (the default action)
#[derive(Args, Debug, Default)]
pub struct InstallArgs {
    /// Install directory (defaults to the executable's directory when it holds
    /// requirements.txt, else the current directory)
    #[arg(long, short = 'r', value_name = "DIR", env = "COMFYUP_ROOT")]
    pub root: Option<PathBuf>,

    /// Configuration file (defaults to <root>/comfyup.yaml when present)
    #[arg(long, short = 'c', value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Shell dialect used for activation and the launcher script
    #[arg(long, value_enum, value_name = "SHELL")]
    pub shell: Option<ShellDialect>,

    /// Create the launcher and shortcut without asking
    #[arg(long, short = 'y', conflicts_with = "no_launcher")]
    pub yes: bool,

    /// Skip the launcher and shortcut without asking
    #[arg(long)]
    pub no_launcher: bool,

    /// Arguments written into the launcher (e.g. "--lowvram")
    #[arg(long, value_name = "ARGS", allow_hyphen_values = true)]
    pub args: Option<String>,
}

impl InstallArgs {
    /// Launcher answer given on the command line, if any
    pub fn launcher_answer(&self) -> Option<bool> {
        if self.yes {
            Some(true)
        } else if self.no_launcher {
            Some(false)
        } else {
            None
        }
    }
}
