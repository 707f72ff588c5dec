//! Nested sections of `comfyup.yaml`

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Vendor binary override settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct VendorConfig {
    /// Directory holding the vendor binaries, relative to the install root
    pub source_dir: PathBuf,

    /// Target directory relative to the environment root.
    /// When unset, torch's library directory is used.
    pub target_dir: Option<PathBuf>,

    /// File names copied from `source_dir` into the target directory
    pub binaries: Vec<String>,
}

impl Default for VendorConfig {
    fn default() -> Self {
        Self {
            source_dir: PathBuf::from("zluda").join("renamed_dlls"),
            target_dir: None,
            binaries: vec![
                "cublas64_11.dll".to_string(),
                "cusparse64_11.dll".to_string(),
            ],
        }
    }
}

/// Desktop shortcut settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ShortcutConfig {
    /// Shortcut file stem on the desktop
    pub name: String,

    /// Icon resource, relative to the install root
    pub icon: PathBuf,

    /// Tooltip / comment shown by the desktop shell
    pub description: String,
}

impl Default for ShortcutConfig {
    fn default() -> Self {
        Self {
            name: "ComfyUI".to_string(),
            icon: PathBuf::from("comfyui.ico"),
            description: "Launch ComfyUI".to_string(),
        }
    }
}

/// How the environment creation wait is rendered
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ProgressStyle {
    /// One dot per tick followed by "Done."
    #[default]
    Dots,
    /// Animated spinner
    Spinner,
}
