//! Installer configuration (comfyup.yaml)
//!
//! Every field has a default matching the stock ComfyUI + ZLUDA layout, so
//! the file is optional. Environment variables override individual values.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::sections::{ProgressStyle, ShortcutConfig, VendorConfig};
use crate::error::{InstallerError, Result};
use crate::shell::ShellDialect;

/// Default configuration file name looked up in the install root
pub const CONFIG_FILE: &str = "comfyup.yaml";

/// Environment variable naming an explicit Python interpreter
pub const PYTHON_ENV: &str = "COMFYUP_PYTHON";

/// Installer configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct InstallerConfig {
    /// Environment directory, relative to the install root
    pub venv_dir: PathBuf,

    /// Dependency manifest consumed by pip
    pub manifest: PathBuf,

    /// Command starting the application, written into the launcher
    pub entry_point: String,

    /// Launcher file stem; the extension follows the shell dialect
    pub launcher_name: String,

    /// Explicit interpreter used to create the environment
    pub python: Option<PathBuf>,

    /// Shell dialect; host default when unset
    pub shell: Option<ShellDialect>,

    /// Indicator shown while the environment is created
    pub progress: ProgressStyle,

    /// Answer used when the launcher prompt gets empty input
    pub create_launcher_default: bool,

    pub vendor: VendorConfig,

    pub shortcut: ShortcutConfig,
}

impl Default for InstallerConfig {
    fn default() -> Self {
        Self {
            venv_dir: PathBuf::from(".venv"),
            manifest: PathBuf::from("requirements.txt"),
            entry_point: "python main.py".to_string(),
            launcher_name: "run_comfyui".to_string(),
            python: None,
            shell: None,
            progress: ProgressStyle::default(),
            create_launcher_default: false,
            vendor: VendorConfig::default(),
            shortcut: ShortcutConfig::default(),
        }
    }
}

impl InstallerConfig {
    /// Parse configuration from YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration for an install root.
    ///
    /// An explicit path must exist. Without one, `<root>/comfyup.yaml` is used
    /// when present and built-in defaults otherwise.
    pub fn load(root: &Path, explicit: Option<&Path>) -> Result<Self> {
        let path = match explicit {
            Some(path) => path.to_path_buf(),
            None => {
                let candidate = root.join(CONFIG_FILE);
                if !candidate.is_file() {
                    debug!("No {} in {}, using defaults", CONFIG_FILE, root.display());
                    return Ok(Self::default().with_env_overrides());
                }
                candidate
            }
        };

        debug!("Loading configuration from {}", path.display());
        let content =
            std::fs::read_to_string(&path).map_err(|e| InstallerError::FileReadFailed {
                path: path.display().to_string(),
                reason: e.to_string(),
            })?;

        let config = Self::from_yaml(&content).map_err(|e| match e {
            InstallerError::ConfigParseFailed { reason, .. } => InstallerError::ConfigParseFailed {
                path: path.display().to_string(),
                reason,
            },
            other => other,
        })?;
        Ok(config.with_env_overrides())
    }

    fn with_env_overrides(mut self) -> Self {
        if let Ok(python) = std::env::var(PYTHON_ENV) {
            if !python.is_empty() && self.python.is_none() {
                self.python = Some(PathBuf::from(python));
            }
        }
        self
    }

    fn validate(&self) -> Result<()> {
        if self.entry_point.trim().is_empty() {
            return Err(InstallerError::ConfigInvalid {
                message: "entry_point must not be empty".to_string(),
            });
        }
        if self.launcher_name.trim().is_empty() {
            return Err(InstallerError::ConfigInvalid {
                message: "launcher_name must not be empty".to_string(),
            });
        }
        if let Some(bad) = self
            .vendor
            .binaries
            .iter()
            .find(|name| name.contains('/') || name.contains('\\'))
        {
            return Err(InstallerError::ConfigInvalid {
                message: format!("vendor binary '{bad}' must be a bare file name"),
            });
        }
        Ok(())
    }

    /// Shell dialect after applying the command-line override
    pub fn dialect(&self, cli_override: Option<ShellDialect>) -> ShellDialect {
        cli_override
            .or(self.shell)
            .unwrap_or_else(ShellDialect::host_default)
    }

    /// Launcher path for a dialect inside the install root
    pub fn launcher_path(&self, root: &Path, dialect: ShellDialect) -> PathBuf {
        root.join(format!(
            "{}.{}",
            self.launcher_name,
            dialect.script_extension()
        ))
    }
}
