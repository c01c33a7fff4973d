//! Line diff between local files and their registry versions
//!
//! Lines are compared by position, not aligned: a line inserted near the top
//! of a file makes every following line show up as changed. Output is
//! unified-diff shaped so it reads familiarly, but it is not a minimal diff.

pub mod paths;

pub use paths::resolve_local_path;

use std::fmt::Write;
use std::path::{Path, PathBuf};

use crate::error::{Result, SyncError};
use crate::registry::ComponentDetails;

/// A contiguous block of differing lines
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hunk {
    /// Zero-based index of the first differing line (same on both sides)
    pub start: usize,
    pub removed: Vec<String>,
    pub added: Vec<String>,
}

impl Hunk {
    fn new(start: usize) -> Self {
        Self {
            start,
            removed: Vec::new(),
            added: Vec::new(),
        }
    }

    pub fn header(&self) -> String {
        format!(
            "@@ -{},{} +{},{} @@",
            self.start + 1,
            self.removed.len(),
            self.start + 1,
            self.added.len()
        )
    }
}

/// Split on `\n` so that a trailing newline survives as a final empty line
fn split_lines(text: &str) -> Vec<&str> {
    text.split('\n').collect()
}

/// Positional comparison of two line sequences
pub fn hunks_for_lines(local: &[&str], registry: &[&str]) -> Vec<Hunk> {
    let mut hunks = Vec::new();
    let mut open: Option<Hunk> = None;

    for i in 0..local.len().max(registry.len()) {
        let left = local.get(i);
        let right = registry.get(i);

        if left.is_some() && left == right {
            if let Some(hunk) = open.take() {
                hunks.push(hunk);
            }
            continue;
        }

        let hunk = open.get_or_insert_with(|| Hunk::new(i));
        if let Some(line) = left {
            hunk.removed.push((*line).to_string());
        }
        if let Some(line) = right {
            hunk.added.push((*line).to_string());
        }
    }

    hunks.extend(open);
    hunks
}

pub fn hunks(local: &str, registry: &str) -> Vec<Hunk> {
    hunks_for_lines(&split_lines(local), &split_lines(registry))
}

fn render(label: &str, hunks: &[Hunk]) -> String {
    let mut out = format!("--- a/{label}\n+++ b/{label}\n");
    for hunk in hunks {
        let _ = writeln!(out, "{}", hunk.header());
        for line in &hunk.removed {
            let _ = writeln!(out, "-{line}");
        }
        for line in &hunk.added {
            let _ = writeln!(out, "+{line}");
        }
    }
    out
}

/// Unified-diff text from `local` to `registry`
pub fn unified_diff(local: &str, registry: &str, label: &str) -> String {
    render(label, &hunks(local, registry))
}

/// Unified-diff text for a file that does not exist locally
pub fn new_file_diff(registry: &str, label: &str) -> String {
    render(label, &hunks_for_lines(&[], &split_lines(registry)))
}

/// How a registry file compares to its local counterpart
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileStatus {
    Identical,
    Changed,
    New,
}

/// Diff of one file of one component
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiffRecord {
    pub file_name: String,
    pub diff_text: String,
    pub local_path: Option<PathBuf>,
    pub status: FileStatus,
}

/// Diff every file of `details` against the project at `root`
pub fn diff_component(root: &Path, details: &ComponentDetails) -> Result<Vec<DiffRecord>> {
    details
        .files
        .iter()
        .map(|file| {
            let file_name = file.file_name().to_string();
            let Some(local_path) = resolve_local_path(root, &details.name, &file.path) else {
                return Ok(DiffRecord {
                    diff_text: new_file_diff(&file.content, &file_name),
                    file_name,
                    local_path: None,
                    status: FileStatus::New,
                });
            };

            let bytes = std::fs::read(&local_path).map_err(|e| SyncError::IoError {
                message: format!("{}: {e}", local_path.display()),
            })?;
            // Invalid UTF-8 shows up as replacement characters in the diff
            let local = String::from_utf8_lossy(&bytes);
            let status = if local == file.content {
                FileStatus::Identical
            } else {
                FileStatus::Changed
            };

            Ok(DiffRecord {
                diff_text: unified_diff(&local, &file.content, &file_name),
                file_name,
                local_path: Some(local_path),
                status,
            })
        })
        .collect()
}
