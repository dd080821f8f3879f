//! Configuration file (`osgi-target.yaml`)
//!
//! ```yaml
//! target_platform: ../target-platform
//! manifest: META-INF/MANIFEST.MF
//! platform:
//!   ws: gtk
//!   os: linux
//!   arch: x86_64
//!   nl: en
//! ```
//!
//! Every key is optional. Command line flags override the file, which
//! overrides the built-in defaults. Relative paths are resolved against the
//! directory containing the file.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::debug;

use crate::domain::PlatformDescriptor;
use crate::error::{Result, config as errors};

/// Default configuration file name, looked up in the current directory
pub const CONFIG_FILE: &str = "osgi-target.yaml";

/// Default bundle manifest location
pub const DEFAULT_MANIFEST: &str = "META-INF/MANIFEST.MF";

/// Default target platform location
pub const DEFAULT_TARGET_PLATFORM: &str = "target-platform";

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TargetConfig {
    pub target_platform: Option<PathBuf>,
    pub manifest: Option<PathBuf>,
    pub platform: PlatformDescriptor,
}

/// Per-key platform overrides from the command line
#[derive(Debug, Clone, Default)]
pub struct PlatformOverrides {
    pub ws: Option<String>,
    pub os: Option<String>,
    pub arch: Option<String>,
    pub nl: Option<String>,
}

impl TargetConfig {
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: Self = serde_yaml::from_str(yaml)?;
        Ok(config)
    }

    /// Load the configuration
    ///
    /// An explicitly given file must exist; the default file is optional.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let path = match explicit {
            Some(path) if !path.is_file() => {
                return Err(errors::not_found(path.display().to_string()));
            }
            Some(path) => path.to_path_buf(),
            None => {
                let path = PathBuf::from(CONFIG_FILE);
                if !path.is_file() {
                    debug!("No {} found, using defaults", CONFIG_FILE);
                    return Ok(Self::default());
                }
                path
            }
        };

        let location = path.display().to_string();
        let yaml = std::fs::read_to_string(&path)
            .map_err(|e| errors::read_failed(&location, e.to_string()))?;
        let config = Self::from_yaml(&yaml).map_err(|e| match e {
            crate::error::TargetError::ConfigParseFailed { reason, .. } => {
                errors::parse_failed(&location, reason)
            }
            other => other,
        })?;

        debug!("Loaded configuration from {}", location);
        let base = path.parent().unwrap_or_else(|| Path::new(""));
        Ok(config.relative_to(base))
    }

    fn relative_to(mut self, base: &Path) -> Self {
        self.target_platform = self.target_platform.map(|p| base.join(p));
        self.manifest = self.manifest.map(|p| base.join(p));
        self
    }

    /// Target platform location: flag, then file, then default
    pub fn target_platform(&self, flag: Option<&Path>) -> PathBuf {
        flag.map(Path::to_path_buf)
            .or_else(|| self.target_platform.clone())
            .unwrap_or_else(|| PathBuf::from(DEFAULT_TARGET_PLATFORM))
    }

    /// Bundle manifest path: flag, then file, then default
    pub fn manifest(&self, flag: Option<&Path>) -> PathBuf {
        flag.map(Path::to_path_buf)
            .or_else(|| self.manifest.clone())
            .unwrap_or_else(|| PathBuf::from(DEFAULT_MANIFEST))
    }

    /// Platform descriptor with command line overrides applied
    pub fn platform(&self, overrides: &PlatformOverrides) -> PlatformDescriptor {
        let base = &self.platform;
        PlatformDescriptor::new(
            overrides.ws.as_deref().unwrap_or(&base.ws),
            overrides.os.as_deref().unwrap_or(&base.os),
            overrides.arch.as_deref().unwrap_or(&base.arch),
            overrides.nl.as_deref().unwrap_or(&base.nl),
        )
    }
}
