//! Local component inventory
//!
//! Infers which components a project already has from file names in the
//! configured directories. Nothing is cached; every call reads the disk.

use std::collections::HashSet;
use std::path::Path;

use tracing::debug;
use walkdir::WalkDir;

use crate::config::{Config, THEME_SENTINEL};

/// Names of components found locally
pub type LocalComponentNames = HashSet<String>;

/// Scan the project for installed components.
///
/// A configured directory that does not exist contributes nothing.
pub fn scan(config: &Config) -> LocalComponentNames {
    let mut names = LocalComponentNames::new();

    for dir in &config.directories {
        let root = config.project_root.join(&dir.path);
        names.extend(scan_directory(&root, &dir.extensions));
    }

    if config.style_file_path().is_file() {
        names.insert(THEME_SENTINEL.to_string());
    }

    debug!(count = names.len(), "local inventory scanned");
    names
}

fn scan_directory(dir: &Path, extensions: &[String]) -> Vec<String> {
    if !dir.is_dir() {
        debug!(dir = %dir.display(), "scan directory absent, skipping");
        return Vec::new();
    }

    WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .into_iter()
        .filter_map(std::result::Result::ok)
        .filter(|entry| entry.file_type().is_file())
        .filter_map(|entry| component_name(entry.file_name().to_str()?, extensions))
        .filter(|name| name != "index")
        .collect()
}

/// Strip a recognized extension from `file_name`
fn component_name(file_name: &str, extensions: &[String]) -> Option<String> {
    extensions
        .iter()
        .find_map(|ext| file_name.strip_suffix(ext.as_str())?.strip_suffix('.'))
        .filter(|stem| !stem.is_empty())
        .map(str::to_string)
}
