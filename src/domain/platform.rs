//! Platform descriptor domain type
//!
//! The descriptor names the windowing system, operating system, architecture
//! and locale a target platform is assembled for. Fragments whose
//! `Eclipse-PlatformFilter` does not match it are ignored.

use std::fmt;

use serde::{Deserialize, Serialize};

pub const KEY_WS: &str = "osgi.ws";
pub const KEY_OS: &str = "osgi.os";
pub const KEY_ARCH: &str = "osgi.arch";
pub const KEY_NL: &str = "osgi.nl";

/// Fixed platform the build is produced for
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PlatformDescriptor {
    pub ws: String,
    pub os: String,
    pub arch: String,
    pub nl: String,
}

impl Default for PlatformDescriptor {
    fn default() -> Self {
        Self {
            ws: "win32".to_string(),
            os: "win32".to_string(),
            arch: "x86".to_string(),
            nl: "en".to_string(),
        }
    }
}

impl PlatformDescriptor {
    pub fn new(
        ws: impl Into<String>,
        os: impl Into<String>,
        arch: impl Into<String>,
        nl: impl Into<String>,
    ) -> Self {
        Self {
            ws: ws.into(),
            os: os.into(),
            arch: arch.into(),
            nl: nl.into(),
        }
    }

    /// Look up a filter key (`osgi.ws`, `osgi.os`, `osgi.arch`, `osgi.nl`)
    pub fn get(&self, key: &str) -> Option<&str> {
        match key {
            KEY_WS => Some(&self.ws),
            KEY_OS => Some(&self.os),
            KEY_ARCH => Some(&self.arch),
            KEY_NL => Some(&self.nl),
            _ => None,
        }
    }
}

impl fmt::Display for PlatformDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}={}, {}={}, {}={}, {}={}",
            KEY_WS, self.ws, KEY_OS, self.os, KEY_ARCH, self.arch, KEY_NL, self.nl
        )
    }
}
