//! Vendor binary overrides
//!
//! Copies the renamed ZLUDA libraries over the CUDA libraries bundled with
//! torch. Each binary is handled on its own: a missing file is reported and
//! the rest are still copied. A missing source directory aborts before any
//! copy is attempted.

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{InstallerError, Result};
use crate::ui;

/// Outcome of copying the configured binaries
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CopyReport {
    /// Destination paths written
    pub copied: Vec<PathBuf>,
    /// Source paths that did not exist
    pub missing: Vec<PathBuf>,
}

impl CopyReport {
    pub fn is_complete(&self) -> bool {
        self.missing.is_empty()
    }
}

/// Copy `binaries` from `source_dir` into `target_dir`, overwriting.
pub fn copy_overrides(source_dir: &Path, target_dir: &Path, binaries: &[String]) -> Result<CopyReport> {
    if !source_dir.is_dir() {
        return Err(InstallerError::VendorDirMissing {
            path: source_dir.display().to_string(),
        });
    }
    if !target_dir.is_dir() {
        return Err(InstallerError::TargetLibraryMissing {
            path: target_dir.display().to_string(),
        });
    }

    let mut report = CopyReport::default();
    for name in binaries {
        let src = source_dir.join(name);
        let dest = target_dir.join(name);

        if !src.is_file() {
            debug!("Vendor binary {} missing", src.display());
            ui::error_line(&format!("{} does not exist.", src.display()));
            report.missing.push(src);
            continue;
        }

        let bytes = std::fs::copy(&src, &dest).map_err(|e| InstallerError::FileWriteFailed {
            path: dest.display().to_string(),
            reason: e.to_string(),
        })?;
        debug!("Copied {} bytes from {}", bytes, src.display());
        println!("Copied {} to {}", name, dest.display());
        report.copied.push(dest);
    }

    Ok(report)
}
