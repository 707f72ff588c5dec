//! End-to-end install runs against a stub interpreter
//!
//! The stub `python -m venv` lays out a POSIX environment with a fake `pip`,
//! so these run without Python or network access.

#![cfg(unix)]

mod common;

use common::{Pip, TestInstall};
use predicates::prelude::*;

const BINARIES: &[&str] = &["cublas64_11.dll", "cusparse64_11.dll"];

#[test]
fn test_interactive_yes_writes_launcher() {
    let install = TestInstall::new();
    let python = install.stub_python(Pip::Succeed);
    install.add_vendor_binaries(BINARIES);

    install
        .command()
        .args(["--shell", "posix"])
        .env("COMFYUP_PYTHON", &python)
        .write_stdin("yes\n--lowvram\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("command_line_arguments.md"))
        .stdout(predicate::str::contains("Installation complete."));

    let launcher = install.read_file("run_comfyui.sh");
    assert!(launcher.ends_with("python main.py --lowvram\n"));
    assert!(launcher.starts_with("cd \""));
    assert!(launcher.contains("&& . \""));
}

#[test]
fn test_launcher_starts_from_any_directory() {
    let install = TestInstall::new();
    let python = install.stub_python(Pip::Succeed);
    install.add_vendor_binaries(BINARIES);
    install.write_file("main.py", "");
    install.write_file(
        "comfyup.yaml",
        "entry_point: 'test -f main.py && echo started'\n",
    );

    install
        .command()
        .args(["--shell", "posix", "-y"])
        .env("COMFYUP_PYTHON", &python)
        .assert()
        .success();

    let elsewhere = tempfile::TempDir::new().unwrap();
    assert_cmd::Command::new("sh")
        .arg(install.path.join("run_comfyui.sh"))
        .current_dir(elsewhere.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("started"));
}

#[test]
fn test_empty_answer_uses_default_no() {
    let install = TestInstall::new();
    let python = install.stub_python(Pip::Succeed);
    install.add_vendor_binaries(BINARIES);

    install
        .command()
        .args(["--shell", "posix"])
        .env("COMFYUP_PYTHON", &python)
        .write_stdin("\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("activate the environment"));

    assert!(!install.file_exists("run_comfyui.sh"));
}

#[test]
fn test_config_default_yes() {
    let install = TestInstall::new();
    let python = install.stub_python(Pip::Succeed);
    install.add_vendor_binaries(BINARIES);
    install.write_file("comfyup.yaml", "create_launcher_default: true\n");

    install
        .command()
        .args(["--shell", "posix"])
        .env("COMFYUP_PYTHON", &python)
        .write_stdin("\n\n")
        .assert()
        .success();

    let launcher = install.read_file("run_comfyui.sh");
    assert!(launcher.ends_with("python main.py\n"));
}

#[test]
fn test_flags_skip_prompts() {
    let install = TestInstall::new();
    let python = install.stub_python(Pip::Succeed);
    install.add_vendor_binaries(BINARIES);

    install
        .command()
        .args(["--shell", "posix", "-y", "--args", "--listen 0.0.0.0"])
        .env("COMFYUP_PYTHON", &python)
        .assert()
        .success();

    let launcher = install.read_file("run_comfyui.sh");
    assert!(launcher.ends_with("python main.py --listen 0.0.0.0\n"));
}

#[test]
fn test_rerun_leaves_one_launcher_and_shortcut() {
    let install = TestInstall::new();
    let python = install.stub_python(Pip::Succeed);
    install.add_vendor_binaries(BINARIES);

    for args in ["--lowvram", "--highvram"] {
        install
            .command()
            .args(["--shell", "posix", "-y", "--args", args])
            .env("COMFYUP_PYTHON", &python)
            .assert()
            .success();
    }

    let launchers: Vec<_> = std::fs::read_dir(&install.path)
        .unwrap()
        .filter_map(Result::ok)
        .filter(|e| e.file_name().to_string_lossy().starts_with("run_comfyui"))
        .collect();
    assert_eq!(launchers.len(), 1);
    assert!(install.read_file("run_comfyui.sh").ends_with("--highvram\n"));

    #[cfg(not(target_os = "macos"))]
    {
        let shortcuts: Vec<_> = std::fs::read_dir(&install.desktop)
            .unwrap()
            .filter_map(Result::ok)
            .collect();
        assert_eq!(shortcuts.len(), 1);
    }
}

#[test]
fn test_vendor_dir_missing_is_fatal() {
    let install = TestInstall::new();
    let python = install.stub_python(Pip::Succeed);

    let assert = install
        .command()
        .args(["--shell", "posix", "--no-launcher"])
        .env("COMFYUP_PYTHON", &python)
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Error: vendor directory"))
        .stdout(predicate::str::contains("Copied").not());

    let output = assert.get_output();
    let combined = format!(
        "{}{}",
        String::from_utf8_lossy(&output.stdout),
        String::from_utf8_lossy(&output.stderr)
    );
    assert_eq!(combined.matches("does not exist").count(), 1);

    assert_eq!(std::fs::read_dir(install.torch_lib()).unwrap().count(), 0);
}

#[test]
fn test_one_vendor_binary_missing_continues() {
    let install = TestInstall::new();
    let python = install.stub_python(Pip::Succeed);
    install.add_vendor_binaries(&["cublas64_11.dll"]);

    let assert = install
        .command()
        .args(["--shell", "posix", "--no-launcher"])
        .env("COMFYUP_PYTHON", &python)
        .assert()
        .success();
    let output = assert.get_output();
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);

    assert_eq!(stdout.matches("Copied ").count(), 1);
    assert!(stdout.contains("Copied cublas64_11.dll to "));
    assert!(stdout.contains("cusparse64_11.dll does not exist."));
    assert!(!stderr.contains("WARN"));
    let reported = stdout
        .lines()
        .chain(stderr.lines())
        .filter(|line| line.contains("Error") || line.contains("WARN"))
        .count();
    assert_eq!(reported, 1);
    assert!(install.torch_lib().join("cublas64_11.dll").exists());
}

#[test]
fn test_pip_failure_exits_one() {
    let install = TestInstall::new();
    let python = install.stub_python(Pip::Fail);
    install.add_vendor_binaries(BINARIES);

    install
        .command()
        .args(["--shell", "posix", "-y"])
        .env("COMFYUP_PYTHON", &python)
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Dependency installation failed"))
        .stderr(predicate::str::contains("No matching distribution"));

    assert!(!install.file_exists("run_comfyui.sh"));
    assert!(!install.torch_lib().join("cublas64_11.dll").exists());
}
