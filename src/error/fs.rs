//! File system and archive errors

use super::TargetError;

/// Creates a file not found error
pub fn not_found(path: impl Into<String>) -> TargetError {
    TargetError::FileNotFound { path: path.into() }
}

/// Creates a file read failed error
pub fn read_failed(path: impl Into<String>, reason: impl std::fmt::Display) -> TargetError {
    TargetError::FileReadFailed {
        path: path.into(),
        reason: reason.to_string(),
    }
}

/// Creates a file write failed error
pub fn write_failed(path: impl Into<String>, reason: impl std::fmt::Display) -> TargetError {
    TargetError::FileWriteFailed {
        path: path.into(),
        reason: reason.to_string(),
    }
}

/// Creates an archive read error
pub fn archive_read_failed(path: impl Into<String>, reason: impl std::fmt::Display) -> TargetError {
    TargetError::ArchiveRead {
        path: path.into(),
        reason: reason.to_string(),
    }
}
