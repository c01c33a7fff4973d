//! Sync command
//!
//! Wires the production registry, installer and terminal into a session and
//! prints its report.

use tracing::debug;

use crate::cli::ParsedArguments;
use crate::config::Config;
use crate::error::Result;
use crate::installer::SystemRunner;
use crate::registry::HttpRegistry;
use crate::session::{Session, SessionReport};
use crate::ui::{InquireConfirmer, display, progress_for_terminal};

/// Run one session; returns the process exit code
pub fn run(args: ParsedArguments, config: &Config) -> Result<i32> {
    debug!(mode = ?args.mode, root = %config.project_root.display(), "starting session");

    let registry = HttpRegistry::new(&config.registry_url)?;
    let runner = SystemRunner;
    let mut confirmer = InquireConfirmer;
    let mut progress = progress_for_terminal();

    let report = Session::new(
        args.mode,
        config,
        &registry,
        &runner,
        &mut confirmer,
        progress.as_mut(),
    )
    .run()?;

    print!("{}", display::render_report(&report));
    Ok(exit_code(&report))
}

/// Non-zero when any batch item failed
pub fn exit_code(report: &SessionReport) -> i32 {
    match report {
        SessionReport::Results(log) if log.tally().failed > 0 => 1,
        _ => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::installer::UpdateOutcome;
    use crate::session::InstallLog;

    #[test]
    fn test_exit_code_reflects_failures() {
        let mut log = InstallLog::default();
        log.append("button", UpdateOutcome::Updated);
        assert_eq!(exit_code(&SessionReport::Results(log.clone())), 0);

        log.append("card", UpdateOutcome::Failed);
        assert_eq!(exit_code(&SessionReport::Results(log)), 1);
        assert_eq!(exit_code(&SessionReport::Listing(Vec::new())), 0);
    }
}
