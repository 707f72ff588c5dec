//! Common test utilities for comfyup integration tests

use std::path::PathBuf;
use tempfile::TempDir;

/// What the stub `pip` does when invoked
#[allow(dead_code)]
#[derive(Clone, Copy)]
pub enum Pip {
    Succeed,
    Fail,
}

/// A fake ComfyUI checkout for integration tests
#[allow(dead_code)]
pub struct TestInstall {
    /// Temporary directory
    #[allow(dead_code)]
    pub temp: TempDir,
    /// Path to the install root
    pub path: PathBuf,
    /// Directory used as the desktop
    pub desktop: PathBuf,
}

impl TestInstall {
    /// Create an install root with `requirements.txt`
    pub fn new() -> Self {
        let temp = TempDir::new().expect("Failed to create temp directory");
        let path = temp.path().join("ComfyUI");
        let desktop = temp.path().join("Desktop");
        std::fs::create_dir_all(&path).expect("Failed to create install root");
        let install = Self {
            temp,
            path,
            desktop,
        };
        install.write_file("requirements.txt", "torch\n");
        install
    }

    /// Write a file in the install root
    pub fn write_file(&self, path: &str, content: &str) {
        let file_path = self.path.join(path);
        if let Some(parent) = file_path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create parent directory");
        }
        std::fs::write(&file_path, content).expect("Failed to write file");
    }

    /// Read a file from the install root
    #[allow(dead_code)]
    pub fn read_file(&self, path: &str) -> String {
        std::fs::read_to_string(self.path.join(path)).expect("Failed to read file")
    }

    /// Check if a file exists in the install root
    #[allow(dead_code)]
    pub fn file_exists(&self, path: &str) -> bool {
        self.path.join(path).exists()
    }

    /// Place vendor binaries into `zluda/renamed_dlls`
    #[allow(dead_code)]
    pub fn add_vendor_binaries(&self, names: &[&str]) {
        for name in names {
            self.write_file(&format!("zluda/renamed_dlls/{name}"), "zluda");
        }
    }

    /// torch's library directory inside the stub environment
    #[allow(dead_code)]
    pub fn torch_lib(&self) -> PathBuf {
        self.path
            .join(".venv/lib/python3.11/site-packages/torch/lib")
    }

    /// Install a stub interpreter and return its path.
    ///
    /// `python -m venv <dir>` creates a POSIX layout whose `activate` puts a
    /// stub `pip` on PATH.
    #[cfg(unix)]
    #[allow(dead_code)]
    pub fn stub_python(&self, pip: Pip) -> PathBuf {
        use std::os::unix::fs::PermissionsExt;

        let pip_body = match pip {
            Pip::Succeed => "echo \"Successfully installed torch\"",
            Pip::Fail => "echo \"ERROR: No matching distribution found for torch\" >&2\nexit 1",
        };
        let script = format!(
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
        );

        let python = self.temp.path().join("stub-python");
        std::fs::write(&python, script).expect("Failed to write stub python");
        std::fs::set_permissions(&python, std::fs::Permissions::from_mode(0o755))
            .expect("Failed to mark stub python executable");
        python
    }

    /// Command running the real binary against this install root
    #[allow(dead_code)]
    pub fn command(&self) -> assert_cmd::Command {
        #[allow(deprecated)]
        let mut cmd = assert_cmd::Command::cargo_bin("comfyup").expect("Failed to find binary");
        cmd.arg("--root")
            .arg(&self.path)
            .env("COMFYUP_DESKTOP_DIR", &self.desktop)
            .env_remove("COMFYUP_ROOT")
            .env_remove("COMFYUP_PYTHON")
            .env_remove("COMFYUP_LOG");
        cmd
    }
}
