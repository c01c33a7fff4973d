//! Registry errors

use super::SyncError;

/// Creates a registry unavailable error
pub fn registry_unavailable(url: impl Into<String>, reason: impl Into<String>) -> SyncError {
    SyncError::RegistryUnavailable {
        url: url.into(),
        reason: reason.into(),
    }
}

/// Creates a registry malformed error
pub fn registry_malformed(url: impl Into<String>, reason: impl Into<String>) -> SyncError {
    SyncError::RegistryMalformed {
        url: url.into(),
        reason: reason.into(),
    }
}

/// Creates a component not found error
pub fn component_not_found(name: impl Into<String>, status: u16) -> SyncError {
    SyncError::ComponentNotFound {
        name: name.into(),
        status,
    }
}
