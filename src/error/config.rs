//! Configuration and argument errors

use super::SyncError;

/// Creates an invalid arguments error
pub fn invalid_arguments(message: impl Into<String>) -> SyncError {
    SyncError::InvalidArguments {
        message: message.into(),
    }
}

/// Creates an invalid config error
pub fn invalid_config(message: impl Into<String>) -> SyncError {
    SyncError::InvalidConfig {
        message: message.into(),
    }
}

/// Creates a config read failed error
pub fn read_failed(path: impl Into<String>, reason: impl Into<String>) -> SyncError {
    SyncError::ConfigReadFailed {
        path: path.into(),
        reason: reason.into(),
    }
}

/// Creates a config parse failed error
pub fn parse_failed(path: impl Into<String>, reason: impl Into<String>) -> SyncError {
    SyncError::ConfigParseFailed {
        path: path.into(),
        reason: reason.into(),
    }
}
