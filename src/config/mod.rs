//! Configuration file handling for comfyup
//!
//! This module contains data structures for:
//! - `comfyup.yaml` - Installer configuration (every field optional)
//! - vendor and shortcut sections nested inside it

pub mod installer;
pub mod sections;

// Re-export commonly used types
pub use installer::InstallerConfig;
pub use sections::ProgressStyle;
