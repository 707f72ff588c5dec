//! Command implementations for the comfyup CLI

pub mod completions;
pub mod install;
pub mod version;
