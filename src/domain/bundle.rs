//! Resolved bundle domain type

use std::path::PathBuf;

use serde::Serialize;

/// A bundle that must be attached as a build dependency
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedBundle {
    /// Bundle symbolic name
    pub symbolic_name: String,

    /// Jar location inside the target platform
    pub location: PathBuf,
}

impl ResolvedBundle {
    pub fn new(symbolic_name: impl Into<String>, location: impl Into<PathBuf>) -> Self {
        Self {
            symbolic_name: symbolic_name.into(),
            location: location.into(),
        }
    }
}
