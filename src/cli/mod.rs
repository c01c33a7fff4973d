//! CLI definitions using clap derive API
//!
//! There are no subcommands: an optional component name plus flags select
//! the mode. Flag combinations are validated in [`arguments`] into a single
//! immutable [`ParsedArguments`] before anything touches the network.

use clap::builder::{Styles, styling::AnsiColor};
use clap::{CommandFactory, Parser};
use std::path::PathBuf;

pub mod arguments;

pub use arguments::{Mode, ParsedArguments};

/// compsync - keep UI components in sync with a component registry
#[derive(Parser, Debug)]
#[command(
    name = "compsync",
    author,
    version,
    styles = Styles::styled()
        .header(AnsiColor::Green.on_default().bold())
        .usage(AnsiColor::Green.on_default().bold())
        .literal(AnsiColor::Cyan.on_default().bold())
        .placeholder(AnsiColor::Cyan.on_default()),
    about = "Keep a project's UI components in sync with a component registry",
    long_about = "compsync compares a remote component registry with the components in your \
                  project, and adds or updates them through the registry's installer. \
                  Without arguments it prints a summary of what the registry offers and \
                  what is installed locally.",
    after_help = "\x1b[1m\x1b[32mExamples:\x1b[0m\n   \
                  compsync                        \x1b[90m# Summary of registry vs. local components\x1b[0m\n   \
                  compsync button                 \x1b[90m# Install or update one component, with confirmation\x1b[0m\n   \
                  compsync button --force         \x1b[90m# Same, without confirmation\x1b[0m\n   \
                  compsync button --diff          \x1b[90m# Show what would change, install nothing\x1b[0m\n   \
                  compsync --add-missing          \x1b[90m# Install every component that is missing\x1b[0m\n   \
                  compsync --add-all              \x1b[90m# List what --add-all --force would install\x1b[0m\n   \
                  compsync --add-all --force      \x1b[90m# Install or overwrite every component\x1b[0m\n"
)]
pub struct Cli {
    /// Component to install, update or diff
    #[arg(value_name = "COMPONENT")]
    pub component: Option<String>,

    /// Install every component verified to be missing
    #[arg(long)]
    pub add_missing: bool,

    /// Install every registry component (dry run unless --force is given)
    #[arg(long)]
    pub add_all: bool,

    /// Skip confirmation
    #[arg(long)]
    pub force: bool,

    /// Show a diff against the registry instead of installing
    #[arg(long)]
    pub diff: bool,

    /// Project directory (defaults to current directory)
    #[arg(long, short = 'C', value_name = "DIR", env = "COMPSYNC_PROJECT_DIR")]
    pub project_dir: Option<PathBuf>,

    /// Registry base URL
    #[arg(long, value_name = "URL", env = "COMPSYNC_REGISTRY_URL")]
    pub registry_url: Option<String>,

    /// Enable verbose output
    #[arg(long, short = 'v')]
    pub verbose: bool,
}

/// One-line usage text, printed after argument errors
pub fn usage() -> String {
    let usage = Cli::command().render_usage().to_string();
    format!("{usage}\n\nFor more information, try '--help'.")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    fn test_cli_parsing_no_arguments() {
        let cli = Cli::try_parse_from(["compsync"]).unwrap();
        assert_eq!(cli.component, None);
        assert!(!cli.add_missing && !cli.add_all && !cli.force && !cli.diff);
    }

    #[test]
    fn test_cli_parsing_component_and_flags() {
        let cli = Cli::try_parse_from(["compsync", "button", "--diff", "-v"]).unwrap();
        assert_eq!(cli.component, Some("button".to_string()));
        assert!(cli.diff);
        assert!(cli.verbose);
    }

    #[test]
    fn test_cli_parsing_flags_before_component() {
        let cli = Cli::try_parse_from(["compsync", "--force", "card"]).unwrap();
        assert_eq!(cli.component, Some("card".to_string()));
        assert!(cli.force);
    }

    #[test]
    fn test_cli_rejects_second_component() {
        assert!(Cli::try_parse_from(["compsync", "button", "card"]).is_err());
    }

    #[test]
    #[serial]
    fn test_cli_registry_url_from_env() {
        unsafe {
            std::env::set_var("COMPSYNC_REGISTRY_URL", "https://env.example.dev");
        }
        let cli = Cli::try_parse_from(["compsync"]).unwrap();
        assert_eq!(cli.registry_url.as_deref(), Some("https://env.example.dev"));

        let cli =
            Cli::try_parse_from(["compsync", "--registry-url", "http://127.0.0.1:1"]).unwrap();
        assert_eq!(cli.registry_url.as_deref(), Some("http://127.0.0.1:1"));
        unsafe {
            std::env::remove_var("COMPSYNC_REGISTRY_URL");
        }
    }

    #[test]
    fn test_usage_mentions_binary() {
        assert!(usage().contains("compsync"));
    }
}
