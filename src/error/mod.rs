//! Error types and handling for osgi-target
//!
//! Uses `thiserror` for error definitions and `miette` for pretty diagnostics.
//!
//! This module is organized into sub-modules by error domain:
//! - [`manifest`]: Manifest and platform filter errors
//! - [`config`]: Configuration errors
//! - [`fs`]: File system and archive errors
//!
//! Unsatisfied `Require-Bundle` / `Import-Package` directives are not errors;
//! they are reported as warnings by the resolver.

pub mod config;
pub mod fs;
pub mod manifest;

use miette::Diagnostic;
use thiserror::Error;

/// Main error type for osgi-target operations
#[derive(Error, Diagnostic, Debug)]
pub enum TargetError {
    // Manifest errors
    #[error("Failed to read manifest of {path}: {reason}")]
    #[diagnostic(
        code(osgi_target::manifest::read_failed),
        help("Every jar in the target platform must carry a readable META-INF/MANIFEST.MF")
    )]
    ManifestRead { path: String, reason: String },

    #[error("Malformed manifest {path}: header '{header}': {reason}")]
    #[diagnostic(code(osgi_target::manifest::parse_failed))]
    ManifestParse {
        path: String,
        header: String,
        reason: String,
    },

    #[error("Invalid platform filter in {path} at position {position}: {reason} (filter: {expression})")]
    #[diagnostic(
        code(osgi_target::filter::syntax),
        help("Platform filters use LDAP syntax, e.g. (&(osgi.os=linux)(osgi.arch=x86_64))")
    )]
    FilterSyntax {
        path: String,
        expression: String,
        position: usize,
        reason: String,
    },

    // Resolution errors
    #[error("{count} dependency directive(s) not satisfied")]
    #[diagnostic(
        code(osgi_target::resolve::unsatisfied),
        help("Add the missing bundles to the target platform or drop --strict")
    )]
    Unsatisfied { count: usize },

    // Target platform errors
    #[error("Target platform location is a file, not a directory: {path}")]
    #[diagnostic(code(osgi_target::platform::not_a_directory))]
    TargetPlatformNotDirectory { path: String },

    #[error("Failed to read archive {path}: {reason}")]
    #[diagnostic(code(osgi_target::platform::archive_read_failed))]
    ArchiveRead { path: String, reason: String },

    // Configuration errors
    #[error("Configuration file not found: {path}")]
    #[diagnostic(code(osgi_target::config::not_found))]
    ConfigNotFound { path: String },

    #[error("Failed to parse configuration file: {path}: {reason}")]
    #[diagnostic(code(osgi_target::config::parse_failed))]
    ConfigParseFailed { path: String, reason: String },

    #[error("Failed to read configuration file: {path}")]
    #[diagnostic(code(osgi_target::config::read_failed))]
    ConfigReadFailed { path: String, reason: String },

    // File system errors
    #[error("File not found: {path}")]
    #[diagnostic(code(osgi_target::fs::not_found))]
    FileNotFound { path: String },

    #[error("Failed to read file: {path}: {reason}")]
    #[diagnostic(code(osgi_target::fs::read_failed))]
    FileReadFailed { path: String, reason: String },

    #[error("Failed to write file: {path}: {reason}")]
    #[diagnostic(code(osgi_target::fs::write_failed))]
    FileWriteFailed { path: String, reason: String },

    #[error("IO error: {message}")]
    #[diagnostic(code(osgi_target::fs::io_error))]
    IoError { message: String },
}

impl From<std::io::Error> for TargetError {
    fn from(err: std::io::Error) -> Self {
        TargetError::IoError {
            message: err.to_string(),
        }
    }
}

impl From<serde_yaml::Error> for TargetError {
    fn from(err: serde_yaml::Error) -> Self {
        TargetError::ConfigParseFailed {
            path: "unknown".to_string(),
            reason: err.to_string(),
        }
    }
}

impl From<serde_json::Error> for TargetError {
    fn from(err: serde_json::Error) -> Self {
        TargetError::IoError {
            message: err.to_string(),
        }
    }
}

/// Result type alias using miette for error handling
pub type Result<T> = miette::Result<T, TargetError>;
