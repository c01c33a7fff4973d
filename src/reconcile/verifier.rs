//! Existence verification through the installer's check mode
//!
//! The installer is asked to add a component without overwriting. When the
//! local files already match, it reports them as skipped; that report is the
//! only evidence we have that a differently named local file is the component.
//!
//! Check mode is not guaranteed to be read-only: an installer that finds the
//! files absent will write them.

use std::sync::LazyLock;

use regex::Regex;
use tracing::{debug, warn};

use crate::config::Config;
use crate::error::verification_failed;
use crate::installer::CommandRunner;

#[allow(clippy::unwrap_used)]
static SKIPPED_COUNT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Skipped (\d+) files?").unwrap());

#[allow(clippy::unwrap_used)]
static LISTED_PATH: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\s*-\s+(\S+)\s*$").unwrap());

/// Decides whether a component is missing despite no exact name match
pub struct ExistenceVerifier<'a> {
    config: &'a Config,
    runner: &'a dyn CommandRunner,
}

impl<'a> ExistenceVerifier<'a> {
    pub fn new(config: &'a Config, runner: &'a dyn CommandRunner) -> Self {
        Self { config, runner }
    }

    pub fn check_args(&self, url: &str) -> Vec<String> {
        let (_, leading) = self.config.installer_command();
        let mut args = leading.to_vec();
        args.push(url.to_string());
        args.push("--yes".to_string());
        args
    }

    /// Whether the component at `url` still needs installing.
    ///
    /// Any check failure counts as missing so an available update is never hidden.
    pub fn is_missing(&self, name: &str, url: &str) -> bool {
        let (program, _) = self.config.installer_command();
        let args = self.check_args(url);

        let output = match self.runner.run(program, &args, &self.config.project_root) {
            Ok(output) if output.success => output,
            Ok(output) => {
                warn!("{}", verification_failed(name, output.failure_reason()));
                return true;
            }
            Err(e) => {
                warn!("{}", verification_failed(name, e.to_string()));
                return true;
            }
        };

        let present = check_reports_present(&output.text);
        debug!(name, present, "existence check finished");
        !present
    }
}

/// Interpret check output.
///
/// Present when the declared skip count equals the number of listed paths, or
/// when skipped files are declared identical but the counts disagree.
pub fn check_reports_present(text: &str) -> bool {
    let lines: Vec<&str> = text.lines().collect();
    let Some((decl_index, declared)) = lines.iter().enumerate().find_map(|(i, line)| {
        let count = SKIPPED_COUNT.captures(line)?.get(1)?.as_str().parse::<usize>().ok()?;
        Some((i, count))
    }) else {
        return false;
    };

    if declared == 0 {
        return false;
    }

    let listed = lines[decl_index + 1..]
        .iter()
        .take_while(|line| LISTED_PATH.is_match(line))
        .count();

    if listed == declared {
        return true;
    }

    text.to_lowercase().contains("identical")
}
