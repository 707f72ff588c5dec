//! Desktop shortcut creation
//!
//! Two backends:
//! - Windows `.lnk` files, written through PowerShell's `WScript.Shell` COM object
//! - freedesktop.org `.desktop` entries on Linux and the BSDs
//!
//! Availability is detected up front by the pre-flight checks. Creating a
//! shortcut never installs anything on the host. Both backends overwrite an
//! existing shortcut of the same name.

use std::path::{Path, PathBuf};
use std::process::Command;

use tracing::{debug, info};

use crate::error::{InstallerError, Result};
use crate::shell::ShellDialect;

/// Environment variable overriding the desktop directory
pub const DESKTOP_ENV: &str = "COMFYUP_DESKTOP_DIR";

/// Where and how shortcuts can be created on this host
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShortcutBackend {
    WindowsLink { desktop: PathBuf, powershell: PathBuf },
    Freedesktop { desktop: PathBuf },
}

/// Everything a shortcut points at
#[derive(Debug, Clone)]
pub struct ShortcutSpec {
    /// File stem of the shortcut
    pub name: String,
    /// Launcher script the shortcut starts
    pub target: PathBuf,
    /// Dialect of the launcher, decides how it is started
    pub dialect: ShellDialect,
    pub icon: PathBuf,
    pub description: String,
}

impl ShortcutSpec {
    /// Working directory: the launcher's parent
    pub fn working_dir(&self) -> &Path {
        self.target.parent().unwrap_or_else(|| Path::new("."))
    }
}

/// Resolve the user's desktop directory
pub fn desktop_dir() -> Option<PathBuf> {
    match std::env::var(DESKTOP_ENV) {
        Ok(dir) if !dir.is_empty() => Some(PathBuf::from(dir)),
        _ => dirs::desktop_dir(),
    }
}

/// Work out which backend this host supports.
///
/// `find` looks up executables on PATH; it is injected so the choice can be
/// tested without touching the host.
pub fn detect_backend<F>(find: F) -> std::result::Result<ShortcutBackend, String>
where
    F: Fn(&str) -> Option<PathBuf>,
{
    let desktop = desktop_dir()
        .ok_or_else(|| format!("could not determine the desktop directory (set {DESKTOP_ENV})"))?;

    if cfg!(windows) {
        let powershell = find("powershell")
            .ok_or_else(|| "PowerShell is required to create .lnk shortcuts".to_string())?;
        Ok(ShortcutBackend::WindowsLink {
            desktop,
            powershell,
        })
    } else if cfg!(target_os = "macos") {
        Err("desktop shortcuts are not supported on macOS".to_string())
    } else {
        Ok(ShortcutBackend::Freedesktop { desktop })
    }
}

impl ShortcutBackend {
    /// Path the shortcut for `spec` will be written to
    pub fn shortcut_path(&self, spec: &ShortcutSpec) -> PathBuf {
        match self {
            ShortcutBackend::WindowsLink { desktop, .. } => {
                desktop.join(format!("{}.lnk", spec.name))
            }
            ShortcutBackend::Freedesktop { desktop } => {
                desktop.join(format!("{}.desktop", spec.name))
            }
        }
    }

    /// Create (or overwrite) the shortcut and return its path
    pub fn create(&self, spec: &ShortcutSpec) -> Result<PathBuf> {
        let path = self.shortcut_path(spec);
        if !spec.icon.exists() {
            debug!("Shortcut icon {} not found", spec.icon.display());
        }
        match self {
            ShortcutBackend::WindowsLink { powershell, .. } => {
                let script = powershell_link_script(&path, spec);
                debug!("Creating shortcut via PowerShell: {}", script);
                let output = Command::new(powershell)
                    .args([
                        "-NoProfile",
                        "-NonInteractive",
                        "-ExecutionPolicy",
                        "Bypass",
                        "-Command",
                    ])
                    .arg(&script)
                    .output()
                    .map_err(|e| InstallerError::ShortcutFailed {
                        reason: format!("could not start PowerShell: {e}"),
                    })?;
                if !output.status.success() {
                    return Err(InstallerError::ShortcutFailed {
                        reason: String::from_utf8_lossy(&output.stderr).trim().to_string(),
                    });
                }
            }
            ShortcutBackend::Freedesktop { desktop } => {
                std::fs::create_dir_all(desktop).map_err(|e| InstallerError::ShortcutFailed {
                    reason: format!("{}: {e}", desktop.display()),
                })?;
                std::fs::write(&path, desktop_entry(spec)).map_err(|e| {
                    InstallerError::ShortcutFailed {
                        reason: format!("{}: {e}", path.display()),
                    }
                })?;
                mark_executable(&path)?;
            }
        }
        info!("Shortcut written to {}", path.display());
        Ok(path)
    }
}

/// Quote a value for a single-quoted PowerShell string
fn ps_quote(value: &str) -> String {
    format!("'{}'", value.replace('\'', "''"))
}

/// PowerShell snippet creating a `.lnk` at `path`
pub fn powershell_link_script(path: &Path, spec: &ShortcutSpec) -> String {
    let target = spec.target.display().to_string();
    let (target_path, arguments) = match spec.dialect {
        ShellDialect::PowerShell => (
            "powershell.exe".to_string(),
            format!("-NoExit -ExecutionPolicy Bypass -File \"{target}\""),
        ),
        ShellDialect::Cmd | ShellDialect::Posix => (target, String::new()),
    };

    let mut script = format!(
        "$s = (New-Object -ComObject WScript.Shell).CreateShortcut({}); \
         $s.TargetPath = {}; \
         $s.WorkingDirectory = {}; \
         $s.IconLocation = {}; \
         $s.Description = {}; ",
        ps_quote(&path.display().to_string()),
        ps_quote(&target_path),
        ps_quote(&spec.working_dir().display().to_string()),
        ps_quote(&spec.icon.display().to_string()),
        ps_quote(&spec.description),
    );
    if !arguments.is_empty() {
        script.push_str(&format!("$s.Arguments = {}; ", ps_quote(&arguments)));
    }
    script.push_str("$s.Save()");
    script
}

/// Quote one argument of a desktop entry `Exec` key
fn exec_quote(arg: &str) -> String {
    let needs_quotes = arg
        .chars()
        .any(|c| c.is_whitespace() || "\"'\\><~|&;$*?#()`".contains(c));
    if !needs_quotes {
        return arg.to_string();
    }
    let mut quoted = String::from("\"");
    for c in arg.chars() {
        if matches!(c, '"' | '`' | '$' | '\\') {
            quoted.push('\\');
        }
        quoted.push(c);
    }
    quoted.push('"');
    quoted
}

/// Contents of a freedesktop `.desktop` entry for `spec`
pub fn desktop_entry(spec: &ShortcutSpec) -> String {
    let target = exec_quote(&spec.target.display().to_string());
    let exec = match spec.dialect {
        ShellDialect::Posix => format!("sh {target}"),
        ShellDialect::PowerShell => format!("{} -File {target}", spec.dialect.program()),
        ShellDialect::Cmd => target,
    };
    format!(
        "[Desktop Entry]\n\
         Type=Application\n\
         Version=1.0\n\
         Name={}\n\
         Comment={}\n\
         Exec={}\n\
         Path={}\n\
         Icon={}\n\
         Terminal=true\n",
        spec.name,
        spec.description,
        exec,
        spec.working_dir().display(),
        spec.icon.display(),
    )
}

#[cfg(unix)]
fn mark_executable(path: &Path) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;
    std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o755)).map_err(|e| {
        InstallerError::ShortcutFailed {
            reason: format!("{}: {e}", path.display()),
        }
    })
}

#[cfg(not(unix))]
fn mark_executable(_path: &Path) -> Result<()> {
    Ok(())
}
