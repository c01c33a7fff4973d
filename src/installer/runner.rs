//! External installer process execution
//!
//! A trait seam so the verifier and the driver can be exercised against
//! scripted output in tests.

use std::path::Path;
use std::process::{Command, Stdio};

use tracing::debug;

use crate::error::{Result, SyncError};

/// Captured result of one installer invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOutput {
    pub success: bool,
    pub code: Option<i32>,
    /// stdout followed by stderr
    pub text: String,
}

impl CommandOutput {
    /// Short description of a failed run for diagnostics
    pub fn failure_reason(&self) -> String {
        let status = self
            .code
            .map_or_else(|| "terminated by signal".to_string(), |c| format!("exit status {c}"));
        let last_line = self.text.lines().rev().find(|l| !l.trim().is_empty());
        match last_line {
            Some(line) => format!("{status}: {}", line.trim()),
            None => status,
        }
    }
}

/// Runs a program to completion and captures its output
pub trait CommandRunner {
    fn run(&self, program: &str, args: &[String], cwd: &Path) -> Result<CommandOutput>;
}

/// Spawns real processes
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    fn run(&self, program: &str, args: &[String], cwd: &Path) -> Result<CommandOutput> {
        debug!(program, ?args, cwd = %cwd.display(), "spawning installer");
        let output = Command::new(program)
            .args(args)
            .current_dir(cwd)
            .stdin(Stdio::null())
            .output()
            .map_err(|e| SyncError::IoError {
                message: format!("failed to run '{program}': {e}"),
            })?;

        let mut text = String::from_utf8_lossy(&output.stdout).into_owned();
        text.push_str(&String::from_utf8_lossy(&output.stderr));

        Ok(CommandOutput {
            success: output.status.success(),
            code: output.status.code(),
            text,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failure_reason_uses_last_non_empty_line() {
        let output = CommandOutput {
            success: false,
            code: Some(1),
            text: "Checking registry.\nSomething went wrong.\n\n".to_string(),
        };
        assert_eq!(
            output.failure_reason(),
            "exit status 1: Something went wrong."
        );
    }

    #[test]
    fn test_failure_reason_without_output() {
        let output = CommandOutput {
            success: false,
            code: None,
            text: String::new(),
        };
        assert_eq!(output.failure_reason(), "terminated by signal");
    }

    #[test]
    fn test_missing_program_is_error() {
        let temp = tempfile::TempDir::new().unwrap();
        let result = SystemRunner.run("compsync-no-such-installer", &[], temp.path());
        assert!(matches!(result, Err(SyncError::IoError { .. })));
    }

    #[cfg(unix)]
    #[test]
    fn test_captures_stdout_and_stderr() {
        let temp = tempfile::TempDir::new().unwrap();
        let args = vec!["-c".to_string(), "echo out; echo err >&2".to_string()];
        let output = SystemRunner.run("sh", &args, temp.path()).unwrap();
        assert!(output.success);
        assert_eq!(output.text, "out\nerr\n");
    }
}
