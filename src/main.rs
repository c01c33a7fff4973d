//! compsync - component registry sync
//!
//! Compares a remote component registry with the components of a local
//! project and adds or updates them through the registry's installer.

use std::io::IsTerminal;

use clap::Parser;
use clap::error::ErrorKind;
use miette::Diagnostic;
use tracing_subscriber::EnvFilter;

mod cli;
mod commands;
mod config;
mod diff;
mod error;
mod installer;
mod inventory;
mod reconcile;
mod registry;
mod session;
mod ui;

use cli::{Cli, ParsedArguments};
use config::Config;

/// Log to stderr; `RUST_LOG` wins over `--verbose`
fn initialize_tracing(verbose: bool) {
    let default_level = if verbose { "compsync=debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .with_target(false)
        .without_time()
        .try_init();
}

fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            e.exit()
        }
        Err(e) => {
            let _ = e.print();
            std::process::exit(1);
        }
    };

    let args = match ParsedArguments::try_from(cli) {
        Ok(args) => args,
        Err(e) => {
            eprintln!("Error: {}", e);
            if e.wants_usage() {
                eprintln!("\n{}", cli::usage());
            }
            std::process::exit(1);
        }
    };

    initialize_tracing(args.verbose);

    let result = Config::load(&args.project_dir, args.registry_url.as_deref())
        .and_then(|config| commands::sync::run(args, &config));

    match result {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            eprintln!("Error: {}", e);
            if let Some(help) = e.help() {
                eprintln!("  help: {help}");
            }
            std::process::exit(1);
        }
    }
}
