//! Install command implementation
//!
//! The default action of `comfyup`. The installation process:
//! 1. Resolve the install root
//! 2. Load `comfyup.yaml` (or built-in defaults)
//! 3. Pick the prompter for the current terminal
//! 4. Hand everything to the sequencer

use tracing::{debug, info};

use crate::cli::InstallArgs;
use crate::config::InstallerConfig;
use crate::error::Result;
use crate::sequencer::{self, Sequencer, SequencerOptions};
use crate::ui::prompt;

/// Run the installation
pub fn run(args: InstallArgs) -> Result<()> {
    let default_manifest = InstallerConfig::default().manifest;
    let root = sequencer::resolve_root(args.root.as_deref(), &default_manifest)?;
    let config = InstallerConfig::load(&root, args.config.as_deref())?;
    debug!("Effective configuration: {:?}", config);

    let options = SequencerOptions {
        dialect: args.shell,
        create_launcher: args.launcher_answer(),
        launcher_args: args.args,
        hide_indicators: false,
    };

    let summary = Sequencer::new(root, config, options, prompt::for_terminal()).run()?;

    info!(
        "Install finished: launcher={:?} shortcut={:?} copied={} missing={}",
        summary.launcher,
        summary.shortcut,
        summary.vendor.copied.len(),
        summary.vendor.missing.len()
    );
    Ok(())
}
