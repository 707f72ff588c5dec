//! Error types and handling for comfyup
//!
//! Uses `thiserror` for error definitions and `miette` for pretty diagnostics.

use miette::Diagnostic;
use thiserror::Error;

/// Main error type for installer operations
#[derive(Error, Diagnostic, Debug)]
pub enum InstallerError {
    // Preflight errors
    #[error("Install directory {path} does not exist")]
    #[diagnostic(
        code(comfyup::root::missing),
        help("Pass an existing directory with --root or COMFYUP_ROOT")
    )]
    RootMissing { path: String },

    #[error("No Python interpreter found (tried: {tried})")]
    #[diagnostic(
        code(comfyup::preflight::python_not_found),
        help("Install Python 3.10+ and make sure it is on PATH, or set COMFYUP_PYTHON")
    )]
    PythonNotFound { tried: String },

    #[error("Dependency manifest not found: {path}")]
    #[diagnostic(
        code(comfyup::preflight::manifest_missing),
        help("Run comfyup from the ComfyUI checkout, or pass --root <DIR>")
    )]
    ManifestMissing { path: String },

    #[error("Shell '{program}' is not available for the {dialect} dialect")]
    #[diagnostic(
        code(comfyup::preflight::shell_unavailable),
        help("Pick another dialect with --shell posix|cmd|powershell")
    )]
    ShellUnavailable { program: String, dialect: String },

    // Process errors
    #[error("Failed to start '{program}': {reason}")]
    #[diagnostic(code(comfyup::process::spawn_failed))]
    CommandSpawnFailed { program: String, reason: String },

    #[error("Dependency installation failed ({status})\n{stderr}")]
    #[diagnostic(
        code(comfyup::deps::install_failed),
        help("Check the pip output above; re-running comfyup repeats the install")
    )]
    DependencyInstallFailed { status: String, stderr: String },

    // Vendor binary errors
    #[error("vendor directory {path} does not exist.")]
    #[diagnostic(
        code(comfyup::vendor::dir_missing),
        help("Extract the ZLUDA release so that the renamed DLLs are in this directory")
    )]
    VendorDirMissing { path: String },

    #[error("Target library directory {path} does not exist")]
    #[diagnostic(
        code(comfyup::vendor::target_missing),
        help("torch does not appear to be installed in the environment")
    )]
    TargetLibraryMissing { path: String },

    // Shortcut errors
    #[error("Failed to create desktop shortcut: {reason}")]
    #[diagnostic(code(comfyup::shortcut::failed))]
    ShortcutFailed { reason: String },

    // Interaction errors
    #[error("Failed to read answer: {message}")]
    #[diagnostic(code(comfyup::prompt::failed))]
    PromptFailed { message: String },

    // Configuration errors
    #[error("Failed to parse configuration file: {path}: {reason}")]
    #[diagnostic(code(comfyup::config::parse_failed))]
    ConfigParseFailed { path: String, reason: String },

    #[error("Invalid configuration: {message}")]
    #[diagnostic(code(comfyup::config::invalid))]
    ConfigInvalid { message: String },

    #[error("Unknown shell: {name}")]
    #[diagnostic(
        code(comfyup::cli::unknown_shell),
        help("Supported shells: bash, elvish, fish, powershell, zsh")
    )]
    UnknownShell { name: String },

    // File system errors
    #[error("Failed to read file: {path}")]
    #[diagnostic(code(comfyup::fs::read_failed))]
    FileReadFailed { path: String, reason: String },

    #[error("Failed to write file: {path}: {reason}")]
    #[diagnostic(code(comfyup::fs::write_failed))]
    FileWriteFailed { path: String, reason: String },

    #[error("IO error: {message}")]
    #[diagnostic(code(comfyup::fs::io_error))]
    IoError { message: String },
}

impl From<std::io::Error> for InstallerError {
    fn from(err: std::io::Error) -> Self {
        InstallerError::IoError {
            message: err.to_string(),
        }
    }
}

impl From<serde_yaml::Error> for InstallerError {
    fn from(err: serde_yaml::Error) -> Self {
        InstallerError::ConfigParseFailed {
            path: "unknown".to_string(),
            reason: err.to_string(),
        }
    }
}

impl From<inquire::InquireError> for InstallerError {
    fn from(err: inquire::InquireError) -> Self {
        InstallerError::PromptFailed {
            message: err.to_string(),
        }
    }
}

/// Result type alias using miette for error handling
pub type Result<T> = miette::Result<T, InstallerError>;
