//! Shell dialects used to run commands inside the virtual environment
//!
//! The dialect is picked once at startup. Each variant knows how to activate
//! the environment and how to wrap a command line so the host shell runs it
//! with the environment active. Call sites never assemble activation strings
//! themselves.

use std::fmt;
use std::path::Path;
use std::process::Command;

use serde::{Deserialize, Serialize};

/// Supported command interpreters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ShellDialect {
    /// POSIX `sh`
    Posix,
    /// Windows command interpreter (`cmd.exe`)
    Cmd,
    /// Windows PowerShell
    #[value(name = "powershell", alias = "pwsh")]
    #[serde(alias = "pwsh")]
    PowerShell,
}

impl ShellDialect {
    /// Dialect used when nothing is configured
    pub fn host_default() -> Self {
        if cfg!(windows) {
            ShellDialect::Cmd
        } else {
            ShellDialect::Posix
        }
    }

    /// Program that interprets this dialect
    pub fn program(self) -> &'static str {
        match self {
            ShellDialect::Posix => "sh",
            ShellDialect::Cmd => "cmd",
            ShellDialect::PowerShell if cfg!(windows) => "powershell",
            ShellDialect::PowerShell => "pwsh",
        }
    }

    /// File extension for generated launcher scripts
    pub fn script_extension(self) -> &'static str {
        match self {
            ShellDialect::Posix => "sh",
            ShellDialect::Cmd => "bat",
            ShellDialect::PowerShell => "ps1",
        }
    }

    /// Name of the activation script inside the environment's scripts directory
    pub fn activation_script_name(self) -> &'static str {
        match self {
            ShellDialect::Posix => "activate",
            ShellDialect::Cmd => "activate.bat",
            ShellDialect::PowerShell => "Activate.ps1",
        }
    }

    /// Prefix that activates the environment and chains into the next command.
    ///
    /// The prefix always ends with the dialect's command separator, so
    /// `format!("{prefix} {command}")` is a complete command line.
    pub fn activation_prefix(self, activate_script: &Path) -> String {
        let script = activate_script.display();
        match self {
            ShellDialect::Posix => format!(". \"{script}\" &&"),
            ShellDialect::Cmd => format!("call \"{script}\" &&"),
            ShellDialect::PowerShell => format!("& \"{script}\";"),
        }
    }

    /// Prefix that enters `dir` and chains into the next command
    pub fn change_dir(self, dir: &Path) -> String {
        let dir = dir.display();
        match self {
            ShellDialect::Posix => format!("cd \"{dir}\" &&"),
            ShellDialect::Cmd => format!("cd /d \"{dir}\" &&"),
            ShellDialect::PowerShell => format!("Set-Location \"{dir}\";"),
        }
    }

    /// Full command line running `command` with the environment active
    pub fn command_line(self, activate_script: &Path, command: &str) -> String {
        format!("{} {}", self.activation_prefix(activate_script), command)
    }

    /// Build a process that runs `command` inside the environment
    pub fn in_env_command(self, activate_script: &Path, command: &str) -> Command {
        let line = self.command_line(activate_script, command);
        let mut cmd = Command::new(self.program());
        match self {
            ShellDialect::Posix => {
                cmd.arg("-c").arg(line);
            }
            ShellDialect::Cmd => {
                cmd.arg("/C");
                push_cmd_line(&mut cmd, line);
            }
            ShellDialect::PowerShell => {
                cmd.args(["-NoProfile", "-ExecutionPolicy", "Bypass", "-Command"])
                    .arg(line);
            }
        }
        cmd
    }
}

// cmd.exe does not understand the backslash escaping applied to regular
// arguments, so the line is passed through untouched.
#[cfg(windows)]
fn push_cmd_line(cmd: &mut Command, line: String) {
    use std::os::windows::process::CommandExt;
    cmd.raw_arg(line);
}

#[cfg(not(windows))]
fn push_cmd_line(cmd: &mut Command, line: String) {
    cmd.arg(line);
}

impl fmt::Display for ShellDialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ShellDialect::Posix => "posix",
            ShellDialect::Cmd => "cmd",
            ShellDialect::PowerShell => "powershell",
        };
        f.write_str(name)
    }
}
