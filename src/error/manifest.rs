//! Manifest and platform filter errors

use super::TargetError;

/// Creates a manifest read error
pub fn read_failed(path: impl Into<String>, reason: impl std::fmt::Display) -> TargetError {
    TargetError::ManifestRead {
        path: path.into(),
        reason: reason.to_string(),
    }
}

/// Creates a manifest parse error for a specific header
pub fn parse_failed(
    path: impl Into<String>,
    header: impl Into<String>,
    reason: impl Into<String>,
) -> TargetError {
    TargetError::ManifestParse {
        path: path.into(),
        header: header.into(),
        reason: reason.into(),
    }
}

/// Wraps a filter syntax error with the manifest it came from
pub fn filter_syntax(
    path: impl Into<String>,
    err: &crate::filter::FilterSyntaxError,
) -> TargetError {
    TargetError::FilterSyntax {
        path: path.into(),
        expression: err.expression.clone(),
        position: err.position,
        reason: err.reason.clone(),
    }
}
