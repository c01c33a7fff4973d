//! Project configuration
//!
//! Values are layered, lowest precedence first:
//! 1. Built-in defaults
//! 2. `compsync.yaml` in the project root
//! 3. Environment and command-line flags (resolved by clap before we get here)

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::config::{parse_failed, read_failed};
use crate::error::{Result, invalid_config};

/// Project-level configuration file name
pub const CONFIG_FILE_NAME: &str = "compsync.yaml";

pub const DEFAULT_REGISTRY_URL: &str = "http://localhost:3000";

/// Local name contributed when the global stylesheet exists
pub const THEME_SENTINEL: &str = "theme";

const DEFAULT_INSTALLER: &[&str] = &["npx", "shadcn@latest", "add"];
const DEFAULT_STYLE_FILE: &str = "app/globals.css";

/// A local directory scanned for installed components
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanDirectory {
    pub path: PathBuf,
    pub extensions: Vec<String>,
}

impl ScanDirectory {
    fn new(path: &str, extensions: &[&str]) -> Self {
        Self {
            path: PathBuf::from(path),
            extensions: extensions.iter().map(|e| (*e).to_string()).collect(),
        }
    }
}

fn default_directories() -> Vec<ScanDirectory> {
    vec![
        ScanDirectory::new("components/ui", &["tsx", "ts", "jsx", "js"]),
        ScanDirectory::new("hooks", &["ts", "tsx"]),
        ScanDirectory::new("components/icons", &["tsx", "ts"]),
    ]
}

/// On-disk shape of `compsync.yaml`; every key is optional
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    registry_url: Option<String>,
    installer: Option<Vec<String>>,
    style_file: Option<PathBuf>,
    directories: Option<Vec<ScanDirectory>>,
}

/// Resolved configuration for one session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Absolute project root; all relative paths resolve against it
    pub project_root: PathBuf,
    /// Registry base URL without a trailing slash
    pub registry_url: String,
    /// Installer program followed by its leading arguments
    pub installer: Vec<String>,
    /// Global stylesheet, relative to the project root
    pub style_file: PathBuf,
    pub directories: Vec<ScanDirectory>,
}

impl Config {
    pub fn defaults(project_root: impl Into<PathBuf>) -> Self {
        Self {
            project_root: project_root.into(),
            registry_url: DEFAULT_REGISTRY_URL.to_string(),
            installer: DEFAULT_INSTALLER.iter().map(|s| (*s).to_string()).collect(),
            style_file: PathBuf::from(DEFAULT_STYLE_FILE),
            directories: default_directories(),
        }
    }

    /// Load configuration for `project_dir`, applying `registry_url` last
    pub fn load(project_dir: &Path, registry_url: Option<&str>) -> Result<Self> {
        let project_root = dunce::canonicalize(project_dir).map_err(|e| {
            invalid_config(format!(
                "Project directory '{}' is not accessible: {e}",
                project_dir.display()
            ))
        })?;

        let mut config = Self::defaults(project_root);
        let config_path = config.project_root.join(CONFIG_FILE_NAME);
        if config_path.is_file() {
            debug!(path = %config_path.display(), "loading project configuration");
            config.apply(read_config_file(&config_path)?);
        }

        if let Some(url) = registry_url {
            config.registry_url = url.to_string();
        }

        config.validate()
    }

    fn apply(&mut self, file: ConfigFile) {
        if let Some(url) = file.registry_url {
            self.registry_url = url;
        }
        if let Some(installer) = file.installer {
            self.installer = installer;
        }
        if let Some(style_file) = file.style_file {
            self.style_file = style_file;
        }
        if let Some(directories) = file.directories {
            self.directories = directories;
        }
    }

    fn validate(mut self) -> Result<Self> {
        self.registry_url = self.registry_url.trim().trim_end_matches('/').to_string();
        if self.registry_url.is_empty() {
            return Err(invalid_config("registry_url must not be empty"));
        }
        if self.installer.first().is_none_or(|program| program.trim().is_empty()) {
            return Err(invalid_config(
                "installer must name a program, e.g. [npx, shadcn@latest, add]",
            ));
        }
        for dir in &mut self.directories {
            for ext in &mut dir.extensions {
                *ext = ext.trim_start_matches('.').to_string();
            }
        }
        Ok(self)
    }

    /// Installer program and its leading arguments
    pub fn installer_command(&self) -> (&str, &[String]) {
        match self.installer.split_first() {
            Some((program, args)) => (program.as_str(), args),
            None => (DEFAULT_INSTALLER[0], &[]),
        }
    }

    pub fn style_file_path(&self) -> PathBuf {
        self.project_root.join(&self.style_file)
    }
}

fn read_config_file(path: &Path) -> Result<ConfigFile> {
    let display = path.display().to_string();
    let content = std::fs::read_to_string(path).map_err(|e| read_failed(&display, e.to_string()))?;
    if content.trim().is_empty() {
        return Ok(ConfigFile::default());
    }
    serde_yaml::from_str(&content).map_err(|e| parse_failed(&display, e.to_string()))
}
