//! Terminal interaction layer
//!
//! This module handles:
//! - Liveness indicators (dots or spinner) while child processes run
//! - Interactive questions behind the `Prompter` trait
//! - Styled status lines shared by the installer steps

pub mod liveness;
pub mod prompt;

use console::Style;

pub use liveness::{Liveness, LivenessOptions};
pub use prompt::Prompter;

/// Print a step heading
pub fn step(message: &str) {
    println!("{}", Style::new().bold().apply_to(message));
}

/// Print a non-fatal problem. Goes to stdout so it stays in order with progress output.
pub fn error_line(message: &str) {
    println!("{}", Style::new().red().apply_to(format!("Error: {message}")));
}

/// Print a warning
pub fn warning(message: &str) {
    println!("{}", Style::new().yellow().apply_to(format!("Warning: {message}")));
}
