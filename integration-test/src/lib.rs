//! Test driver for getopt integration tests.
//!
//! Builds the workspace once, then runs the `demo` binary with given
//! argument vectors and captures its output for assertions.

use std::process::Command;
use std::sync::Once;

static BUILD_INIT: Once = Once::new();

fn target_dir() -> String {
    let manifest_dir = env!("CARGO_MANIFEST_DIR");
    format!("{manifest_dir}/../target/debug")
}

/// Path to the demo binary, building the getopt package on first use.
pub fn demo_binary() -> String {
    BUILD_INIT.call_once(|| {
        let manifest_dir = env!("CARGO_MANIFEST_DIR");
        let workspace_root = format!("{manifest_dir}/..");
        let status = Command::new("cargo")
            .args(["build", "-p", "getopt"])
            .current_dir(&workspace_root)
            .status()
            .expect("failed to run cargo build");
        assert!(status.success(), "cargo build -p getopt failed");
    });
    format!("{}/demo", target_dir())
}

/// Output of one completed demo run.
pub struct RunOutput {
    pub stdout: String,
    pub stderr: String,
    pub code: i32,
}

impl RunOutput {
    /// The stdout lines, for order-sensitive assertions.
    pub fn lines(&self) -> Vec<&str> {
        self.stdout.lines().collect()
    }
}

/// Run the demo binary with the given arguments and wait for it.
pub fn run_demo(args: &[&str]) -> RunOutput {
    let output = Command::new(demo_binary())
        .args(args)
        .output()
        .expect("failed to run demo");
    RunOutput {
        stdout: String::from_utf8_lossy(&output.stdout).to_string(),
        stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        code: output.status.code().unwrap_or(-1),
    }
}
