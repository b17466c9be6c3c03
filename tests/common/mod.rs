//! Shared test infrastructure for integration tests.

use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::TempDir;

pub fn manifest_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
}

/// The bundled sample content root.
#[allow(dead_code)]
pub fn sample_content() -> PathBuf {
    manifest_dir().join("content")
}

/// Captured output of one `casefile` invocation.
#[allow(dead_code)]
#[derive(Debug)]
pub struct CliOutput {
    pub success: bool,
    pub stdout: String,
    pub stderr: String,
}

impl CliOutput {
    /// Parse stdout as JSON, panicking with both streams on failure.
    #[allow(dead_code)]
    pub fn json(&self) -> Value {
        serde_json::from_str(&self.stdout).unwrap_or_else(|err| {
            panic!(
                "stdout is not JSON ({err})\nstdout:\n{}\nstderr:\n{}",
                self.stdout, self.stderr
            )
        })
    }
}

/// A scratch copy of the sample content plus a private progress file.
#[allow(dead_code)]
pub struct Sandbox {
    temp_dir: TempDir,
}

#[allow(dead_code)]
impl Sandbox {
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("create temp dir");
        copy_dir(&sample_content(), &temp_dir.path().join("content"));
        Sandbox { temp_dir }
    }

    pub fn content(&self) -> PathBuf {
        self.temp_dir.path().join("content")
    }

    pub fn cases_dir(&self) -> PathBuf {
        self.content().join("cases")
    }

    pub fn progress(&self) -> PathBuf {
        self.temp_dir.path().join("progress.json")
    }

    #[allow(dead_code)]
    pub fn write_case(&self, name: &str, document: &Value) {
        let text = serde_json::to_string_pretty(document).expect("serialize case");
        fs::write(self.cases_dir().join(name), text).expect("write case");
    }

    /// Run `casefile` with `args`; `--progress` always points into the sandbox.
    pub fn run(&self, args: &[&str]) -> CliOutput {
        run_cli(args, Some(&self.progress()))
    }
}

/// Run the built binary. When `progress` is given it is appended as
/// `--progress` to commands that accept it.
#[allow(dead_code)]
pub fn run_cli(args: &[&str], progress: Option<&Path>) -> CliOutput {
    let mut command = Command::new(env!("CARGO_BIN_EXE_casefile"));
    command.args(args).env_remove("RUST_LOG");
    let takes_progress = matches!(
        args.first().copied(),
        Some("list" | "grade" | "accuse" | "progress")
    );
    if let (Some(path), true) = (progress, takes_progress) {
        command.arg("--progress").arg(path);
    }
    let output = command.output().expect("run casefile");
    CliOutput {
        success: output.status.success(),
        stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
        stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
    }
}

#[allow(dead_code)]
fn copy_dir(from: &Path, to: &Path) {
    fs::create_dir_all(to).expect("create dir");
    for entry in fs::read_dir(from).expect("read dir") {
        let entry = entry.expect("dir entry");
        let target = to.join(entry.file_name());
        if entry.path().is_dir() {
            copy_dir(&entry.path(), &target);
        } else {
            fs::copy(entry.path(), &target).expect("copy file");
        }
    }
}
