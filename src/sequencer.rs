//! Installation sequencer
//!
//! Runs the install pipeline in a fixed order and stops at the first fatal
//! error. Every run executes every stage again; stages that write files
//! overwrite what a previous run left behind.

use std::path::{Path, PathBuf};
use std::process::Command;

use tracing::{debug, info, warn};

use crate::config::{InstallerConfig, ProgressStyle};
use crate::error::{InstallerError, Result};
use crate::launcher;
use crate::preflight::{self, Capabilities};
use crate::process;
use crate::shell::ShellDialect;
use crate::shortcut::ShortcutSpec;
use crate::ui::{self, LivenessOptions, Prompter};
use crate::vendor::{self, CopyReport};
use crate::venv::{VenvFlavor, VenvLayout};

/// Document listing the application's command-line options
const ARGUMENTS_DOC: &str = "command_line_arguments.md";

/// Pipeline stages, in execution order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    ResolveRoot,
    Preflight,
    CreateEnvironment,
    InstallDependencies,
    PromptLauncher,
    CollectArguments,
    WriteLauncher,
    CreateShortcut,
    CopyVendorBinaries,
    Finish,
}

impl Stage {
    pub const FIRST: Stage = Stage::ResolveRoot;

    /// The following stage; `None` after [`Stage::Finish`]
    pub fn next(self) -> Option<Stage> {
        match self {
            Stage::ResolveRoot => Some(Stage::Preflight),
            Stage::Preflight => Some(Stage::CreateEnvironment),
            Stage::CreateEnvironment => Some(Stage::InstallDependencies),
            Stage::InstallDependencies => Some(Stage::PromptLauncher),
            Stage::PromptLauncher => Some(Stage::CollectArguments),
            Stage::CollectArguments => Some(Stage::WriteLauncher),
            Stage::WriteLauncher => Some(Stage::CreateShortcut),
            Stage::CreateShortcut => Some(Stage::CopyVendorBinaries),
            Stage::CopyVendorBinaries => Some(Stage::Finish),
            Stage::Finish => None,
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Stage::ResolveRoot => "Resolving install directory",
            Stage::Preflight => "Checking prerequisites",
            Stage::CreateEnvironment => "Creating virtual environment",
            Stage::InstallDependencies => "Installing dependencies",
            Stage::PromptLauncher => "Launcher setup",
            Stage::CollectArguments => "Launcher arguments",
            Stage::WriteLauncher => "Writing launcher script",
            Stage::CreateShortcut => "Creating desktop shortcut",
            Stage::CopyVendorBinaries => "Copying ZLUDA binaries",
            Stage::Finish => "Finishing",
        }
    }

    /// Stages that only run when the user asked for a launcher
    fn needs_launcher(self) -> bool {
        matches!(
            self,
            Stage::CollectArguments | Stage::WriteLauncher | Stage::CreateShortcut
        )
    }
}

/// Answers supplied up front instead of prompting
#[derive(Debug, Clone, Default)]
pub struct SequencerOptions {
    /// Overrides the shell dialect from config
    pub dialect: Option<ShellDialect>,
    /// `Some(true)` for `--yes`, `Some(false)` for `--no-launcher`
    pub create_launcher: Option<bool>,
    /// Launcher arguments; skips the text prompt
    pub launcher_args: Option<String>,
    /// Suppress liveness indicators
    pub hide_indicators: bool,
}

/// What a completed run produced
#[derive(Debug, Clone, Default)]
pub struct RunSummary {
    pub launcher: Option<PathBuf>,
    pub shortcut: Option<PathBuf>,
    pub vendor: CopyReport,
}

/// Pick the install root.
///
/// An explicit directory wins. Otherwise the executable's directory is used
/// when it contains `manifest`, and the current directory when it does not.
pub fn resolve_root(explicit: Option<&Path>, manifest: &Path) -> Result<PathBuf> {
    if let Some(dir) = explicit {
        if !dir.is_dir() {
            return Err(InstallerError::RootMissing {
                path: dir.display().to_string(),
            });
        }
        return Ok(std::path::absolute(dir)?);
    }

    let exe_dir = std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf));
    if let Some(dir) = exe_dir.filter(|dir| dir.join(manifest).is_file()) {
        debug!("Using executable directory {}", dir.display());
        return Ok(dir);
    }

    Ok(std::env::current_dir()?)
}

/// Drives one installation run
pub struct Sequencer {
    root: PathBuf,
    config: InstallerConfig,
    options: SequencerOptions,
    dialect: ShellDialect,
    layout: VenvLayout,
    prompter: Box<dyn Prompter>,

    capabilities: Option<Capabilities>,
    wants_launcher: bool,
    launcher_args: String,
    summary: RunSummary,
}

impl Sequencer {
    pub fn new(
        root: PathBuf,
        config: InstallerConfig,
        options: SequencerOptions,
        prompter: Box<dyn Prompter>,
    ) -> Self {
        let dialect = config.dialect(options.dialect);
        let layout = VenvLayout::new(root.join(&config.venv_dir), VenvFlavor::host());
        Self {
            root,
            config,
            options,
            dialect,
            layout,
            prompter,
            capabilities: None,
            wants_launcher: false,
            launcher_args: String::new(),
            summary: RunSummary::default(),
        }
    }

    /// Execute every stage in order
    pub fn run(mut self) -> Result<RunSummary> {
        let mut stage = Some(Stage::FIRST);
        while let Some(current) = stage {
            if current.needs_launcher() && !self.wants_launcher {
                debug!("Skipping {:?}", current);
            } else {
                debug!("Entering {:?}", current);
                self.execute(current)?;
            }
            stage = current.next();
        }
        Ok(self.summary)
    }

    fn execute(&mut self, stage: Stage) -> Result<()> {
        match stage {
            Stage::ResolveRoot => {
                println!("Installing into {}", self.root.display());
                Ok(())
            }
            Stage::Preflight => {
                self.capabilities = Some(preflight::run(&self.root, &self.config, self.dialect)?);
                Ok(())
            }
            Stage::CreateEnvironment => self.create_environment(),
            Stage::InstallDependencies => self.install_dependencies(),
            Stage::PromptLauncher => self.prompt_launcher(),
            Stage::CollectArguments => self.collect_arguments(),
            Stage::WriteLauncher => self.write_launcher(),
            Stage::CreateShortcut => self.create_shortcut(),
            Stage::CopyVendorBinaries => self.copy_vendor_binaries(),
            Stage::Finish => {
                println!();
                print!("{}", self.final_instructions());
                Ok(())
            }
        }
    }

    fn indicator(&self, style: ProgressStyle, stage: Stage) -> LivenessOptions {
        LivenessOptions::new(style, stage.description()).hidden(self.options.hide_indicators)
    }

    fn create_environment(&mut self) -> Result<()> {
        let python = match &self.capabilities {
            Some(caps) => caps.python.clone(),
            None => preflight::resolve_python(&self.config)?,
        };
        ui::step(&format!("{}...", Stage::CreateEnvironment.description()));

        let mut cmd = Command::new(&python);
        cmd.arg("-m").arg("venv").arg(self.layout.root());
        let outcome = process::run_monitored(
            cmd,
            &self.root,
            self.indicator(self.config.progress, Stage::CreateEnvironment),
        )?;

        // Continue regardless; a broken environment fails the next stage
        if !outcome.success() {
            warn!("venv creation stderr: {}", outcome.stderr_tail());
            ui::warning(&format!(
                "creating the virtual environment exited with {}",
                outcome.status_text()
            ));
        }
        Ok(())
    }

    fn install_dependencies(&mut self) -> Result<()> {
        ui::step(&format!("{}...", Stage::InstallDependencies.description()));

        let activate = self.layout.activate_script(self.dialect);
        let install = format!("pip install -r \"{}\"", self.config.manifest.display());
        let cmd = self.dialect.in_env_command(&activate, &install);
        let outcome = process::run_monitored(
            cmd,
            &self.root,
            self.indicator(ProgressStyle::Spinner, Stage::InstallDependencies),
        )?;

        if !outcome.success() {
            return Err(InstallerError::DependencyInstallFailed {
                status: outcome.status_text(),
                stderr: outcome.stderr_tail(),
            });
        }
        info!("Dependencies installed from {}", self.config.manifest.display());
        println!("Dependencies installed.");
        Ok(())
    }

    fn shortcut_available(&self) -> bool {
        matches!(&self.capabilities, Some(caps) if caps.shortcut.is_ok())
    }

    fn prompt_launcher(&mut self) -> Result<()> {
        if let Some(answer) = self.options.create_launcher {
            self.wants_launcher = answer;
            return Ok(());
        }

        let question = if self.shortcut_available() {
            "Create a launcher script and desktop shortcut?"
        } else {
            if let Some(Err(reason)) = self.capabilities.as_ref().map(|c| &c.shortcut) {
                println!("No desktop shortcut will be offered: {reason}");
            }
            "Create a launcher script?"
        };
        self.wants_launcher = self
            .prompter
            .confirm(question, self.config.create_launcher_default)?;
        Ok(())
    }

    fn collect_arguments(&mut self) -> Result<()> {
        let args = match self.options.launcher_args.clone() {
            Some(args) => args,
            None => {
                let help = format!("See {ARGUMENTS_DOC} for the available arguments");
                self.prompter.text(
                    "Arguments to pass to ComfyUI (leave empty for none)",
                    Some(&help),
                )?
            }
        };
        self.launcher_args = args.trim().to_string();
        Ok(())
    }

    fn write_launcher(&mut self) -> Result<()> {
        let path = self.config.launcher_path(&self.root, self.dialect);
        let contents = launcher::render(
            self.dialect,
            &self.root,
            &self.layout.activate_script(self.dialect),
            &self.config.entry_point,
            &self.launcher_args,
        );
        launcher::write(&path, &contents)?;
        println!("Launcher written to {}", path.display());
        self.summary.launcher = Some(path);
        Ok(())
    }

    fn create_shortcut(&mut self) -> Result<()> {
        let (Some(launcher), Some(Ok(backend))) = (
            self.summary.launcher.clone(),
            self.capabilities.as_ref().map(|c| &c.shortcut),
        ) else {
            return Ok(());
        };

        let spec = ShortcutSpec {
            name: self.config.shortcut.name.clone(),
            target: launcher,
            dialect: self.dialect,
            icon: self.root.join(&self.config.shortcut.icon),
            description: self.config.shortcut.description.clone(),
        };
        let path = backend.create(&spec)?;
        println!("Shortcut created at {}", path.display());
        self.summary.shortcut = Some(path);
        Ok(())
    }

    fn copy_vendor_binaries(&mut self) -> Result<()> {
        ui::step(&format!("{}...", Stage::CopyVendorBinaries.description()));
        let vendor = &self.config.vendor;
        let source = self.root.join(&vendor.source_dir);
        let target = self.layout.library_dir(vendor.target_dir.as_deref());
        self.summary.vendor = vendor::copy_overrides(&source, &target, &vendor.binaries)?;
        Ok(())
    }

    /// Closing text: how to start the application
    pub fn final_instructions(&self) -> String {
        let mut text = String::from("Installation complete.\n");
        match &self.summary.launcher {
            Some(launcher) => {
                text.push_str(&format!("Start ComfyUI with: {}\n", launcher.display()));
                if let Some(shortcut) = &self.summary.shortcut {
                    text.push_str(&format!(
                        "or use the desktop shortcut {}\n",
                        shortcut.display()
                    ));
                }
            }
            None => {
                text.push_str("To start ComfyUI, activate the environment and run the entry point:\n");
                text.push_str(&format!(
                    "  {}\n",
                    self.dialect.command_line(
                        &self.layout.activate_script(self.dialect),
                        &self.config.entry_point
                    )
                ));
            }
        }
        text
    }
}
