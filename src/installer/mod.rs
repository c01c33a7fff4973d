//! Installer driver
//!
//! Adds or overwrites one component by invoking the external installer and
//! classifies what it did. Persistence is entirely the installer's job.

pub mod runner;

pub use runner::{CommandOutput, CommandRunner, SystemRunner};

use std::fmt;

use tracing::{debug, warn};

use crate::config::Config;
use crate::error::install_failed;

/// Result of one install invocation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateOutcome {
    Updated,
    Skipped,
    Failed,
}

impl fmt::Display for UpdateOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            UpdateOutcome::Updated => "updated",
            UpdateOutcome::Skipped => "skipped",
            UpdateOutcome::Failed => "failed",
        };
        f.write_str(s)
    }
}

/// Drives the external installer in mutating mode
pub struct Installer<'a> {
    config: &'a Config,
    runner: &'a dyn CommandRunner,
}

impl<'a> Installer<'a> {
    pub fn new(config: &'a Config, runner: &'a dyn CommandRunner) -> Self {
        Self { config, runner }
    }

    /// Arguments for an install of the bundle at `url`.
    ///
    /// `--overwrite` is passed whether or not `force` is set.
    pub fn install_args(&self, url: &str, force: bool) -> Vec<String> {
        let (_, leading) = self.config.installer_command();
        let mut args = leading.to_vec();
        args.push(url.to_string());
        args.push("--yes".to_string());
        if !force {
            debug!(url, "force is off but overwrite is still requested");
        }
        args.push("--overwrite".to_string());
        args
    }

    /// Install one component; failures become [`UpdateOutcome::Failed`]
    pub fn install(&self, name: &str, url: &str, force: bool) -> UpdateOutcome {
        let (program, _) = self.config.installer_command();
        let args = self.install_args(url, force);

        match self.runner.run(program, &args, &self.config.project_root) {
            Ok(output) if output.success => {
                let outcome = classify_install_output(&output.text);
                debug!(name, %outcome, "installer finished");
                outcome
            }
            Ok(output) => {
                let err = install_failed(name, output.failure_reason());
                warn!("{err}");
                UpdateOutcome::Failed
            }
            Err(e) => {
                let err = install_failed(name, e.to_string());
                warn!("{err}");
                UpdateOutcome::Failed
            }
        }
    }
}

/// Classify the output of a successful install run
pub fn classify_install_output(text: &str) -> UpdateOutcome {
    if text.to_lowercase().contains("identical") {
        return UpdateOutcome::Skipped;
    }
    // "Updated", "Created" and "Installing dependencies" all mean files were
    // written, as does any other clean exit.
    UpdateOutcome::Updated
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{Result, SyncError};
    use std::cell::RefCell;
    use std::path::Path;

    struct ScriptedRunner {
        output: Option<CommandOutput>,
        calls: RefCell<Vec<(String, Vec<String>)>>,
    }

    impl ScriptedRunner {
        fn ok(text: &str) -> Self {
            Self {
                output: Some(CommandOutput {
                    success: true,
                    code: Some(0),
                    text: text.to_string(),
                }),
                calls: RefCell::new(Vec::new()),
            }
        }

        fn exit(code: i32) -> Self {
            Self {
                output: Some(CommandOutput {
                    success: false,
                    code: Some(code),
                    text: "boom".to_string(),
                }),
                calls: RefCell::new(Vec::new()),
            }
        }

        fn unavailable() -> Self {
            Self {
                output: None,
                calls: RefCell::new(Vec::new()),
            }
        }
    }

    impl CommandRunner for ScriptedRunner {
        fn run(&self, program: &str, args: &[String], _cwd: &Path) -> Result<CommandOutput> {
            self.calls
                .borrow_mut()
                .push((program.to_string(), args.to_vec()));
            self.output.clone().ok_or_else(|| SyncError::IoError {
                message: "npx: not found".to_string(),
            })
        }
    }

    const URL: &str = "http://localhost:3000/r/card.json";

    #[test]
    fn test_install_args_always_overwrite() {
        let config = Config::defaults("/project");
        let runner = ScriptedRunner::ok("");
        let installer = Installer::new(&config, &runner);

        let expected = ["shadcn@latest", "add", URL, "--yes", "--overwrite"];
        assert_eq!(installer.install_args(URL, true), expected);
        assert_eq!(installer.install_args(URL, false), expected);
    }

    #[test]
    fn test_install_invokes_configured_program() {
        let config = Config::defaults("/project");
        let runner = ScriptedRunner::ok("Created 1 file");
        Installer::new(&config, &runner).install("card", URL, true);

        let calls = runner.calls.borrow();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].0, "npx");
        assert!(calls[0].1.contains(&URL.to_string()));
    }

    #[test]
    fn test_identical_output_is_skipped() {
        let config = Config::defaults("/project");
        let runner = ScriptedRunner::ok("Skipped 1 file: (files might be identical)");
        let outcome = Installer::new(&config, &runner).install("card", URL, true);
        assert_eq!(outcome, UpdateOutcome::Skipped);
    }

    #[test]
    fn test_clean_exit_is_updated() {
        assert_eq!(
            classify_install_output("Updated 2 files:\n  - components/ui/card.tsx"),
            UpdateOutcome::Updated
        );
        assert_eq!(
            classify_install_output("Installing dependencies."),
            UpdateOutcome::Updated
        );
        assert_eq!(classify_install_output(""), UpdateOutcome::Updated);
    }

    #[test]
    fn test_non_zero_exit_is_failed() {
        let config = Config::defaults("/project");
        let runner = ScriptedRunner::exit(1);
        let outcome = Installer::new(&config, &runner).install("card", URL, true);
        assert_eq!(outcome, UpdateOutcome::Failed);
    }

    #[test]
    fn test_spawn_error_is_failed() {
        let config = Config::defaults("/project");
        let runner = ScriptedRunner::unavailable();
        let outcome = Installer::new(&config, &runner).install("card", URL, false);
        assert_eq!(outcome, UpdateOutcome::Failed);
    }
}
