//! Registry/local name reconciliation
//!
//! Exact name matches are settled by set lookup. Only the remaining names go
//! through the [`verifier`], since each verification spawns the installer.

pub mod verifier;

pub use verifier::ExistenceVerifier;

use crate::inventory::LocalComponentNames;

/// Registry names split by literal presence in the local inventory
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Partition {
    pub exact: Vec<String>,
    pub mismatched: Vec<String>,
}

/// Split `registry_names` into names present verbatim locally and the rest.
///
/// Registry order is preserved in both lists.
pub fn partition(registry_names: &[String], local_names: &LocalComponentNames) -> Partition {
    let (exact, mismatched): (Vec<String>, Vec<String>) = registry_names
        .iter()
        .cloned()
        .partition(|name| local_names.contains(name));
    Partition { exact, mismatched }
}

/// Outcome of verifying every mismatched name
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Reconciliation {
    pub exact: Vec<String>,
    pub verified_missing: Vec<String>,
    /// Present locally, but under a file name that differs from the registry name
    pub installed_elsewhere: Vec<String>,
}

impl Reconciliation {
    /// Run `is_missing` over each mismatched name, in order
    pub fn verify(partition: Partition, mut is_missing: impl FnMut(&str) -> bool) -> Self {
        let mut verified_missing = Vec::new();
        let mut installed_elsewhere = Vec::new();
        for name in partition.mismatched {
            if is_missing(&name) {
                verified_missing.push(name);
            } else {
                installed_elsewhere.push(name);
            }
        }
        Self {
            exact: partition.exact,
            verified_missing,
            installed_elsewhere,
        }
    }
}
