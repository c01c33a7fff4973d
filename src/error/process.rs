//! Installer subprocess errors
//!
//! Neither of these escapes a batch: the verifier turns a failure into
//! "missing" and the installer driver into a `failed` outcome.

use super::SyncError;

/// Creates a verification failed error
pub fn verification_failed(name: impl Into<String>, reason: impl Into<String>) -> SyncError {
    SyncError::VerificationFailed {
        name: name.into(),
        reason: reason.into(),
    }
}

/// Creates an install failed error
pub fn install_failed(name: impl Into<String>, reason: impl Into<String>) -> SyncError {
    SyncError::InstallFailed {
        name: name.into(),
        reason: reason.into(),
    }
}
