//! Command runner — a single blocking call-and-capture around the
//! terraform binary (or anything else given an argv and a workdir).

use crate::core::config::Config;
use crate::core::types::CommandKind;
use std::path::PathBuf;
use std::process::Command;

/// One external invocation: argv plus the directory to run it in.
/// Built per user action and discarded after the outcome is shown.
#[derive(Debug, Clone)]
pub struct Invocation {
    pub program: String,
    pub args: Vec<String>,
    pub workdir: PathBuf,
}

impl Invocation {
    /// Build a terraform invocation for the configured binary and workdir.
    pub fn terraform(config: &Config, kind: &CommandKind) -> Self {
        Self {
            program: config.terraform_bin.clone(),
            args: kind.argv(),
            workdir: config.working_dir.clone(),
        }
    }
}

/// Captured result of an invocation.
#[derive(Debug, Clone)]
pub struct Outcome {
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
}

impl Outcome {
    pub fn success(&self) -> bool {
        self.exit_code == 0
    }

    /// stdout on success, stderr on failure.
    pub fn detail(&self) -> &str {
        if self.success() {
            &self.stdout
        } else {
            &self.stderr
        }
    }
}

/// Execute an invocation, blocking until it exits. Outcome is classified
/// by exit status alone. A launch failure (missing binary, permission,
/// missing workdir) is folded into a failed outcome with the OS error
/// text standing in for stderr — callers never see a crash.
pub fn run(inv: &Invocation) -> Outcome {
    let output = Command::new(&inv.program)
        .args(&inv.args)
        .current_dir(&inv.workdir)
        .output();

    match output {
        Ok(output) => Outcome {
            // Killed-by-signal has no exit code
            exit_code: output.status.code().unwrap_or(-1),
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        },
        Err(e) => Outcome {
            exit_code: -1,
            stdout: String::new(),
            stderr: format!("failed to launch {}: {}", inv.program, e),
        },
    }
}
