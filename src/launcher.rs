//! Launcher script generation
//!
//! The launcher is a single command line: enter the install root, activate
//! the environment, then start the entry point with the user's arguments.

use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use tracing::debug;

use crate::error::{InstallerError, Result};
use crate::shell::ShellDialect;

/// Render the launcher contents.
///
/// The entry point is relative to `root`, so the line changes into it first.
/// `args` is embedded verbatim; an empty value leaves no trailing space.
pub fn render(
    dialect: ShellDialect,
    root: &Path,
    activate_script: &Path,
    entry_point: &str,
    args: &str,
) -> String {
    let command = if args.is_empty() {
        entry_point.to_string()
    } else {
        format!("{entry_point} {args}")
    };
    format!(
        "{} {}\n",
        dialect.change_dir(root),
        dialect.command_line(activate_script, &command)
    )
}

/// Write `contents` to `path`, replacing any existing launcher.
///
/// The file is staged next to its destination and renamed into place.
pub fn write(path: &Path, contents: &str) -> Result<PathBuf> {
    let dir = path.parent().unwrap_or_else(|| Path::new("."));
    let write_err = |e: std::io::Error| InstallerError::FileWriteFailed {
        path: path.display().to_string(),
        reason: e.to_string(),
    };

    let mut staged = NamedTempFile::new_in(dir).map_err(write_err)?;
    staged.write_all(contents.as_bytes()).map_err(write_err)?;
    staged.flush().map_err(write_err)?;
    staged
        .persist(path)
        .map_err(|e| write_err(e.error))?;

    mark_executable(path)?;
    debug!("Launcher written to {}", path.display());
    Ok(path.to_path_buf())
}

#[cfg(unix)]
fn mark_executable(path: &Path) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;
    std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o755)).map_err(|e| {
        InstallerError::FileWriteFailed {
            path: path.display().to_string(),
            reason: e.to_string(),
        }
    })
}

#[cfg(not(unix))]
fn mark_executable(_path: &Path) -> Result<()> {
    Ok(())
}
