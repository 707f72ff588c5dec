//! Virtual environment layout
//!
//! `python -m venv` lays out Windows environments differently from POSIX
//! ones (`Scripts/` vs `bin/`, `Lib/site-packages` vs
//! `lib/pythonX.Y/site-packages`). This module hides that difference.

use std::path::{Path, PathBuf};

use crate::shell::ShellDialect;

/// Site-packages relative location of torch's native libraries
const TORCH_LIB: &[&str] = &["torch", "lib"];

/// Which directory convention an environment follows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VenvFlavor {
    Windows,
    Posix,
}

impl VenvFlavor {
    /// Flavor produced by the interpreter on this host
    pub fn host() -> Self {
        if cfg!(windows) {
            VenvFlavor::Windows
        } else {
            VenvFlavor::Posix
        }
    }
}

/// Paths inside a virtual environment
#[derive(Debug, Clone)]
pub struct VenvLayout {
    root: PathBuf,
    flavor: VenvFlavor,
}

impl VenvLayout {
    pub fn new(root: impl Into<PathBuf>, flavor: VenvFlavor) -> Self {
        Self {
            root: root.into(),
            flavor,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Directory holding the interpreter and activation scripts
    pub fn scripts_dir(&self) -> PathBuf {
        match self.flavor {
            VenvFlavor::Windows => self.root.join("Scripts"),
            VenvFlavor::Posix => self.root.join("bin"),
        }
    }

    /// Activation script for the given dialect
    pub fn activate_script(&self, dialect: ShellDialect) -> PathBuf {
        self.scripts_dir().join(dialect.activation_script_name())
    }

    /// The environment's `site-packages` directory.
    ///
    /// On POSIX the directory name embeds the interpreter version, so the
    /// first `lib/python*` entry (sorted) is used. Falls back to
    /// `lib/site-packages` when no versioned directory exists yet.
    pub fn site_packages(&self) -> PathBuf {
        match self.flavor {
            VenvFlavor::Windows => self.root.join("Lib").join("site-packages"),
            VenvFlavor::Posix => {
                let lib = self.root.join("lib");
                let mut versioned: Vec<PathBuf> = std::fs::read_dir(&lib)
                    .map(|entries| {
                        entries
                            .filter_map(std::result::Result::ok)
                            .filter(|e| e.file_name().to_string_lossy().starts_with("python"))
                            .map(|e| e.path())
                            .collect()
                    })
                    .unwrap_or_default();
                versioned.sort();
                versioned
                    .into_iter()
                    .next()
                    .unwrap_or(lib)
                    .join("site-packages")
            }
        }
    }

    /// Target directory for vendor binary overrides.
    ///
    /// `override_dir` is interpreted relative to the environment root.
    pub fn library_dir(&self, override_dir: Option<&Path>) -> PathBuf {
        match override_dir {
            Some(dir) => self.root.join(dir),
            None => TORCH_LIB
                .iter()
                .fold(self.site_packages(), |acc, part| acc.join(part)),
        }
    }
}
