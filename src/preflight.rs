//! Pre-flight capability checks
//!
//! Runs before the first step touches the filesystem. Hard requirements
//! (interpreter, manifest, shell) fail the run with an actionable error.
//! Optional capabilities (desktop shortcut) are only reported. Nothing is
//! installed on the host here.

use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::config::InstallerConfig;
use crate::error::{InstallerError, Result};
use crate::shell::ShellDialect;
use crate::shortcut::{self, ShortcutBackend};

/// Interpreter names probed on PATH, in order
pub fn python_candidates() -> &'static [&'static str] {
    if cfg!(windows) {
        &["python", "py"]
    } else {
        &["python3", "python"]
    }
}

/// What the host can do, as established before installing
#[derive(Debug, Clone)]
pub struct Capabilities {
    /// Interpreter used for `-m venv`
    pub python: PathBuf,
    /// Shortcut backend, or the reason none is available
    pub shortcut: std::result::Result<ShortcutBackend, String>,
}

/// Locate an executable on PATH
fn find_on_path(name: &str) -> Option<PathBuf> {
    which::which(name).ok()
}

/// Resolve the interpreter: explicit config/env value first, then PATH
pub fn resolve_python(config: &InstallerConfig) -> Result<PathBuf> {
    if let Some(explicit) = &config.python {
        if explicit.is_file() {
            return Ok(explicit.clone());
        }
        // A bare name like "python3.11" is looked up on PATH
        if let Some(found) = find_on_path(&explicit.to_string_lossy()) {
            return Ok(found);
        }
        return Err(InstallerError::PythonNotFound {
            tried: explicit.display().to_string(),
        });
    }

    python_candidates()
        .iter()
        .find_map(|name| find_on_path(name))
        .ok_or_else(|| InstallerError::PythonNotFound {
            tried: python_candidates().join(", "),
        })
}

/// Check that the manifest exists in the install root
pub fn check_manifest(root: &Path, config: &InstallerConfig) -> Result<PathBuf> {
    let manifest = root.join(&config.manifest);
    if manifest.is_file() {
        Ok(manifest)
    } else {
        Err(InstallerError::ManifestMissing {
            path: manifest.display().to_string(),
        })
    }
}

/// Check that the dialect's interpreter can be started
pub fn check_shell(dialect: ShellDialect) -> Result<()> {
    match find_on_path(dialect.program()) {
        Some(path) => {
            debug!("{} shell found at {}", dialect, path.display());
            Ok(())
        }
        None => Err(InstallerError::ShellUnavailable {
            program: dialect.program().to_string(),
            dialect: dialect.to_string(),
        }),
    }
}

/// Run every check, failing on the first hard requirement that is not met
pub fn run(root: &Path, config: &InstallerConfig, dialect: ShellDialect) -> Result<Capabilities> {
    debug!("Running pre-flight checks in {}", root.display());

    let python = resolve_python(config)?;
    check_manifest(root, config)?;
    check_shell(dialect)?;

    let shortcut = shortcut::detect_backend(find_on_path);
    match &shortcut {
        Ok(backend) => debug!("Shortcut backend available: {:?}", backend),
        Err(reason) => debug!("No shortcut backend: {}", reason),
    }

    info!("Pre-flight checks passed (python: {})", python.display());
    Ok(Capabilities { python, shortcut })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_manifest_present() {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join("requirements.txt"), "torch\n").unwrap();
        let path = check_manifest(temp.path(), &InstallerConfig::default()).unwrap();
        assert!(path.ends_with("requirements.txt"));
    }

    #[test]
    fn test_manifest_missing() {
        let temp = TempDir::new().unwrap();
        let err = check_manifest(temp.path(), &InstallerConfig::default()).unwrap_err();
        assert!(matches!(err, InstallerError::ManifestMissing { .. }));
    }

    #[test]
    fn test_explicit_python_file_is_used() {
        let temp = TempDir::new().unwrap();
        let fake = temp.path().join("python-fake");
        std::fs::write(&fake, "").unwrap();
        let config = InstallerConfig {
            python: Some(fake.clone()),
            ..InstallerConfig::default()
        };
        assert_eq!(resolve_python(&config).unwrap(), fake);
    }

    #[test]
    fn test_explicit_python_missing_reports_it() {
        let config = InstallerConfig {
            python: Some(PathBuf::from("/nonexistent/python-comfyup-test")),
            ..InstallerConfig::default()
        };
        match resolve_python(&config).unwrap_err() {
            InstallerError::PythonNotFound { tried } => {
                assert!(tried.contains("python-comfyup-test"));
            }
            other => panic!("Expected PythonNotFound, got {other:?}"),
        }
    }

    #[test]
    #[cfg(unix)]
    fn test_posix_shell_is_available() {
        assert!(check_shell(ShellDialect::Posix).is_ok());
    }

    #[test]
    fn test_candidates_not_empty() {
        assert!(!python_candidates().is_empty());
    }
}
