//! Mapping registry file paths onto the local project layout

use std::path::{Component, Path, PathBuf};

use tracing::warn;

/// Registry directory prefix and its local equivalent
const PREFIX_MAP: &[(&str, &str)] = &[
    ("registry/ui/", "components/ui/"),
    ("registry/hooks/", "hooks/"),
    ("registry/lib/", "lib/"),
    ("registry/icons/", "components/icons/"),
];

/// Paths that already use the local layout
const LOCAL_PREFIXES: &[&str] = &["components/", "hooks/", "lib/"];

const FALLBACK_EXTENSIONS: &[&str] = &["tsx", "ts", "jsx", "js"];
const FALLBACK_DIRS: &[&str] = &["components/ui", "hooks", "components/icons"];

/// Local project-relative path for a registry file, without touching the disk
pub fn map_registry_path(registry_path: &str) -> Option<String> {
    for (from, to) in PREFIX_MAP {
        if let Some(rest) = registry_path.strip_prefix(from) {
            return Some(format!("{to}{}", collapse_index(rest)));
        }
    }

    LOCAL_PREFIXES
        .iter()
        .any(|prefix| registry_path.starts_with(prefix))
        .then(|| registry_path.to_string())
}

/// `chart/index.tsx` becomes `chart.tsx`
fn collapse_index(rest: &str) -> String {
    match rest.split_once('/') {
        Some((dir, file)) if !file.contains('/') => match file.strip_prefix("index.") {
            Some(ext) => format!("{dir}.{ext}"),
            None => rest.to_string(),
        },
        _ => rest.to_string(),
    }
}

/// Relative path made only of plain segments
fn stays_inside_root(path: &str) -> bool {
    Path::new(path)
        .components()
        .all(|c| matches!(c, Component::Normal(_) | Component::CurDir))
}

/// Find the local file corresponding to `registry_path`, if any.
///
/// Tries the direct mapping first, then other extensions in the same
/// directory, then the standard component, hook and icon directories.
/// Paths that are absolute or climb with `..` never resolve.
pub fn resolve_local_path(root: &Path, component: &str, registry_path: &str) -> Option<PathBuf> {
    if !stays_inside_root(registry_path) || !stays_inside_root(component) {
        warn!(path = registry_path, "registry path escapes the project, not reading it");
        return None;
    }

    let mapped = map_registry_path(registry_path);
    if let Some(rel) = &mapped {
        let direct = root.join(rel);
        if direct.is_file() {
            return Some(direct);
        }
    }

    let source = Path::new(mapped.as_deref().unwrap_or(registry_path));
    let stem = match source.file_stem().and_then(|s| s.to_str()) {
        Some("index") | None => component,
        Some(stem) => stem,
    };

    let same_dir = mapped
        .as_ref()
        .and_then(|_| source.parent())
        .map(|dir| root.join(dir));

    same_dir
        .into_iter()
        .chain(FALLBACK_DIRS.iter().map(|dir| root.join(dir)))
        .flat_map(|dir| {
            FALLBACK_EXTENSIONS
                .iter()
                .map(move |ext| dir.join(format!("{stem}.{ext}")))
        })
        .find(|candidate| candidate.is_file())
}
