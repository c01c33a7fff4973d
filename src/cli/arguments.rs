//! Validated command-line arguments
//!
//! Built once in `main` and passed explicitly to the session.

use std::path::PathBuf;

use super::Cli;
use crate::error::{Result, invalid_arguments};

/// Operating mode selected by the arguments
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    /// Registry and local breakdown
    Summary,
    /// Install or update one component
    Single { name: String, force: bool },
    /// Install every verified-missing component
    AddMissing,
    /// List what `--add-all --force` would install
    AddAllDryRun,
    /// Install or overwrite every registry component
    AddAll,
    /// Diff one component against the registry
    Diff { name: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedArguments {
    pub mode: Mode,
    pub project_dir: PathBuf,
    pub registry_url: Option<String>,
    pub verbose: bool,
}

impl TryFrom<Cli> for ParsedArguments {
    type Error = crate::error::SyncError;

    fn try_from(cli: Cli) -> Result<Self> {
        let mode = resolve_mode(&cli)?;
        Ok(Self {
            mode,
            project_dir: cli.project_dir.unwrap_or_else(|| PathBuf::from(".")),
            registry_url: cli.registry_url,
            verbose: cli.verbose,
        })
    }
}

fn resolve_mode(cli: &Cli) -> Result<Mode> {
    if let Some(name) = cli.component.as_deref().filter(|n| !is_valid_component_name(n)) {
        return Err(invalid_arguments(format!(
            "'{name}' is not a valid component name (expected lowercase letters, digits and dashes)"
        )));
    }

    if cli.add_missing && cli.add_all {
        return Err(invalid_arguments(
            "--add-missing and --add-all cannot be used together",
        ));
    }

    if cli.diff {
        if cli.add_missing || cli.add_all {
            return Err(invalid_arguments(
                "--diff cannot be combined with --add-missing or --add-all",
            ));
        }
        return match &cli.component {
            Some(name) => Ok(Mode::Diff { name: name.clone() }),
            None => Err(invalid_arguments("--diff requires a component name")),
        };
    }

    if cli.component.is_some() && (cli.add_missing || cli.add_all) {
        return Err(invalid_arguments(
            "a component name cannot be combined with --add-missing or --add-all",
        ));
    }

    if cli.force && cli.component.is_none() && !cli.add_all {
        return Err(invalid_arguments(
            "--force requires a component name (or --add-all)",
        ));
    }

    let mode = match (&cli.component, cli.add_missing, cli.add_all) {
        (Some(name), _, _) => Mode::Single {
            name: name.clone(),
            force: cli.force,
        },
        (None, true, _) => Mode::AddMissing,
        (None, _, true) if cli.force => Mode::AddAll,
        (None, _, true) => Mode::AddAllDryRun,
        (None, false, false) => Mode::Summary,
    };
    Ok(mode)
}

/// Registry names are kebab-case: `[a-z0-9][a-z0-9-]*`
pub fn is_valid_component_name(name: &str) -> bool {
    let mut chars = name.chars();
    chars
        .next()
        .is_some_and(|c| c.is_ascii_lowercase() || c.is_ascii_digit())
        && chars.all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
}
