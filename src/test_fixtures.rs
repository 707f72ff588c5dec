//! Test fixtures shared by unit tests.
//!
//! Builds a fake install root with a stub interpreter, so the whole install
//! sequence can run without a real Python or network access. Unix only, the
//! stub is a shell script.
//!
//! ```ignore
//! let root = create_install_root(PipBehavior::Succeed);
//! let config = root.config();
//! ```

use std::path::{Path, PathBuf};

use tempfile::TempDir;

use crate::config::InstallerConfig;

/// What the stub `pip` does when invoked
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipBehavior {
    Succeed,
    Fail,
}

/// A temporary install root
pub struct InstallRoot {
    pub temp: TempDir,
    pub python: PathBuf,
}

impl InstallRoot {
    pub fn path(&self) -> &Path {
        self.temp.path()
    }

    /// Configuration pointing at the stub interpreter
    pub fn config(&self) -> InstallerConfig {
        InstallerConfig {
            python: Some(self.python.clone()),
            ..InstallerConfig::default()
        }
    }

    /// Put vendor binaries into `zluda/renamed_dlls`
    pub fn add_vendor_binaries(&self, names: &[&str]) {
        let dir = self.path().join("zluda/renamed_dlls");
        std::fs::create_dir_all(&dir).expect("Failed to create vendor dir");
        for name in names {
            std::fs::write(dir.join(name), b"zluda").expect("Failed to write vendor binary");
        }
    }

    /// torch's library directory inside the stub environment
    pub fn torch_lib(&self) -> PathBuf {
        self.path()
            .join(".venv/lib/python3.11/site-packages/torch/lib")
    }
}

/// Shell script standing in for `python -m venv <dir>`.
///
/// Creates a POSIX environment whose `activate` puts a stub `pip` on PATH.
pub fn stub_python_script(pip: PipBehavior) -> String {
    let pip_body = match pip {
        PipBehavior::Succeed => "echo \"Successfully installed torch\"",
        PipBehavior::Fail => {
            "echo \"ERROR: No matching distribution found for torch\" >&2\nexit 1"
        }
    };
    format!(
        r#"#!/bin/sh
dir="$3"
mkdir -p "$dir/bin" "$dir/lib/python3.11/site-packages/torch/lib"
bin="$(cd "$dir/bin" && pwd)"
printf 'PATH="%s:$PATH"\nexport PATH\n' "$bin" > "$dir/bin/activate"
cat > "$dir/bin/pip" <<'PIP'
#!/bin/sh
{pip_body}
PIP
chmod +x "$dir/bin/pip"
"#
    )
}

/// Create an install root with a manifest and a stub interpreter.
///
/// # Panics
///
/// Panics if any file cannot be written.
#[must_use]
pub fn create_install_root(pip: PipBehavior) -> InstallRoot {
    use std::os::unix::fs::PermissionsExt;

    let temp = TempDir::new().expect("Failed to create temp directory");
    std::fs::write(temp.path().join("requirements.txt"), "torch\n")
        .expect("Failed to write manifest");

    let python = temp.path().join("stub-python");
    std::fs::write(&python, stub_python_script(pip)).expect("Failed to write stub python");
    std::fs::set_permissions(&python, std::fs::Permissions::from_mode(0o755))
        .expect("Failed to mark stub python executable");

    InstallRoot { temp, python }
}
