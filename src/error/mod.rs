//! Error types and handling for compsync
//!
//! Uses `thiserror` for error definitions and `miette` for pretty diagnostics.
//!
//! This module is organized into sub-modules by error domain:
//! - [`registry`]: Registry fetch and schema errors
//! - [`process`]: Installer subprocess errors
//! - [`config`]: Configuration and argument errors

pub mod config;
pub mod process;
pub mod registry;


pub use config::{invalid_arguments, invalid_config};
pub use process::{install_failed, verification_failed};
pub use registry::{component_not_found, registry_malformed, registry_unavailable};

use miette::Diagnostic;
use thiserror::Error;

/// Main error type for compsync operations
#[derive(Error, Diagnostic, Debug)]
pub enum SyncError {
    // Registry errors
    #[error("Registry unavailable at {url}: {reason}")]
    #[diagnostic(
        code(compsync::registry::unavailable),
        help("Check the registry URL (--registry-url or COMPSYNC_REGISTRY_URL) and your network")
    )]
    RegistryUnavailable { url: String, reason: String },

    #[error("Registry response from {url} is malformed: {reason}")]
    #[diagnostic(code(compsync::registry::malformed))]
    RegistryMalformed { url: String, reason: String },

    #[error("Component '{name}' not found in registry (HTTP {status})")]
    #[diagnostic(
        code(compsync::registry::component_not_found),
        help("Run compsync without arguments to see what the registry provides")
    )]
    ComponentNotFound { name: String, status: u16 },

    // Installer errors
    #[error("Could not verify '{name}': {reason}")]
    #[diagnostic(code(compsync::process::verification_failed))]
    VerificationFailed { name: String, reason: String },

    #[error("Failed to install '{name}': {reason}")]
    #[diagnostic(code(compsync::process::install_failed))]
    InstallFailed { name: String, reason: String },

    // Argument and configuration errors
    #[error("{message}")]
    #[diagnostic(code(compsync::cli::invalid_arguments))]
    InvalidArguments { message: String },

    #[error("Failed to read configuration file {path}: {reason}")]
    #[diagnostic(code(compsync::config::read_failed))]
    ConfigReadFailed { path: String, reason: String },

    #[error("Failed to parse configuration file {path}: {reason}")]
    #[diagnostic(code(compsync::config::parse_failed))]
    ConfigParseFailed { path: String, reason: String },

    #[error("Invalid configuration: {message}")]
    #[diagnostic(code(compsync::config::invalid))]
    InvalidConfig { message: String },

    // Terminal errors
    #[error("Failed to read confirmation: {message}")]
    #[diagnostic(code(compsync::ui::prompt_failed))]
    PromptFailed { message: String },

    #[error("IO error: {message}")]
    #[diagnostic(code(compsync::fs::io_error))]
    IoError { message: String },
}

impl From<std::io::Error> for SyncError {
    fn from(err: std::io::Error) -> Self {
        SyncError::IoError {
            message: err.to_string(),
        }
    }
}

impl From<serde_yaml::Error> for SyncError {
    fn from(err: serde_yaml::Error) -> Self {
        SyncError::ConfigParseFailed {
            path: "unknown".to_string(),
            reason: err.to_string(),
        }
    }
}

impl From<serde_json::Error> for SyncError {
    fn from(err: serde_json::Error) -> Self {
        SyncError::RegistryMalformed {
            url: "unknown".to_string(),
            reason: err.to_string(),
        }
    }
}

impl From<reqwest::Error> for SyncError {
    fn from(err: reqwest::Error) -> Self {
        let url = err
            .url()
            .map_or_else(|| "unknown".to_string(), ToString::to_string);
        SyncError::RegistryUnavailable {
            url,
            reason: err.to_string(),
        }
    }
}

impl From<inquire::InquireError> for SyncError {
    fn from(err: inquire::InquireError) -> Self {
        SyncError::PromptFailed {
            message: err.to_string(),
        }
    }
}

impl SyncError {
    /// Whether this error should be followed by the usage text when printed
    pub fn wants_usage(&self) -> bool {
        matches!(self, SyncError::InvalidArguments { .. })
    }
}

/// Result type alias using miette for error handling
pub type Result<T> = miette::Result<T, SyncError>;
