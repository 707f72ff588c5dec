//! Running external tools under a liveness indicator
//!
//! The foreground thread blocks on the child while the indicator thread
//! renders. Both pipes are drained by `wait_with_output`, so a chatty child
//! (pip) cannot fill a pipe buffer and stall.

use std::path::Path;
use std::process::{Command, ExitStatus, Stdio};

use tracing::{debug, info};

use crate::error::{InstallerError, Result};
use crate::ui::{Liveness, LivenessOptions};

/// Lines of stderr kept when reporting a failure
const STDERR_TAIL_LINES: usize = 20;

/// Captured result of a finished child process
#[derive(Debug, Clone)]
pub struct ProcessOutcome {
    pub status: ExitStatus,
    pub stdout: String,
    pub stderr: String,
}

impl ProcessOutcome {
    pub fn success(&self) -> bool {
        self.status.success()
    }

    /// Human-readable exit status
    pub fn status_text(&self) -> String {
        match self.status.code() {
            Some(code) => format!("exit code {code}"),
            None => "terminated by signal".to_string(),
        }
    }

    /// Last lines of stderr, for error reports
    pub fn stderr_tail(&self) -> String {
        let lines: Vec<&str> = self.stderr.lines().collect();
        let start = lines.len().saturating_sub(STDERR_TAIL_LINES);
        lines[start..].join("\n")
    }
}

/// Spawn `cmd` in `cwd`, render the indicator until it exits, and collect its output.
///
/// The exit status is returned, not judged; callers decide whether a
/// non-zero exit is fatal.
pub fn run_monitored(
    mut cmd: Command,
    cwd: &Path,
    indicator: LivenessOptions,
) -> Result<ProcessOutcome> {
    let program = cmd.get_program().to_string_lossy().to_string();
    info!("Running {:?} in {}", cmd, cwd.display());

    let child = cmd
        .current_dir(cwd)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(|e| InstallerError::CommandSpawnFailed {
            program: program.clone(),
            reason: e.to_string(),
        })?;

    let liveness = Liveness::spawn(indicator);
    let waited = child.wait_with_output();
    liveness.finish();

    let output = waited.map_err(|e| InstallerError::CommandSpawnFailed {
        program,
        reason: format!("failed waiting for process: {e}"),
    })?;

    let outcome = ProcessOutcome {
        status: output.status,
        stdout: String::from_utf8_lossy(&output.stdout).to_string(),
        stderr: String::from_utf8_lossy(&output.stderr).to_string(),
    };
    debug!("Process finished with {}", outcome.status_text());
    for line in outcome.stdout.lines() {
        debug!(target: "comfyup::child", "{}", line);
    }
    Ok(outcome)
}
