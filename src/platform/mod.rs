//! Target platform directory
//!
//! A target platform is a directory laid out like an Eclipse installation;
//! candidate bundles live in `<location>/eclipse/plugins`. This module covers
//! the file operations around it: unpacking platform archives, copying built
//! jars into the plugin folder and deleting the whole platform.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::error::{Result, TargetError, fs as errors};
use crate::progress::ExtractProgress;

/// A target platform rooted at `location`
#[derive(Debug, Clone)]
pub struct TargetPlatform {
    location: PathBuf,
}

impl TargetPlatform {
    pub fn new(location: impl Into<PathBuf>) -> Self {
        Self {
            location: location.into(),
        }
    }

    pub fn location(&self) -> &Path {
        &self.location
    }

    /// Directory holding the candidate bundle jars
    pub fn plugins_dir(&self) -> PathBuf {
        self.location.join("eclipse").join("plugins")
    }

    /// Create the location if missing; fail if it is a file
    pub fn ensure_location(&self) -> Result<()> {
        if self.location.exists() && !self.location.is_dir() {
            return Err(TargetError::TargetPlatformNotDirectory {
                path: self.location.display().to_string(),
            });
        }
        if !self.location.exists() {
            debug!("Creating target platform folder {}", self.location.display());
            fs::create_dir_all(&self.location)
                .map_err(|e| errors::write_failed(self.location.display().to_string(), e))?;
        }
        Ok(())
    }

    /// Copy a jar into the plugin folder, returning its new path
    pub fn install(&self, jar: &Path) -> Result<PathBuf> {
        if !jar.is_file() {
            return Err(errors::not_found(jar.display().to_string()));
        }
        let file_name = jar
            .file_name()
            .ok_or_else(|| errors::not_found(jar.display().to_string()))?;

        let plugins = self.plugins_dir();
        fs::create_dir_all(&plugins)
            .map_err(|e| errors::write_failed(plugins.display().to_string(), e))?;

        let destination = plugins.join(file_name);
        fs::copy(jar, &destination)
            .map_err(|e| errors::write_failed(destination.display().to_string(), e))?;
        info!(
            "Copied {} to plugin folder {}",
            jar.display(),
            plugins.display()
        );
        Ok(destination)
    }

    /// Delete the target platform; returns `false` if there was nothing to delete
    pub fn clean(&self) -> Result<bool> {
        if !self.location.exists() {
            return Ok(false);
        }
        info!("Deleting directory {}", self.location.display());
        fs::remove_dir_all(&self.location)
            .map_err(|e| errors::write_failed(self.location.display().to_string(), e))?;
        Ok(true)
    }

    /// Unpack a local zip archive into the location without overwriting
    /// existing files; returns the number of files written
    pub fn materialize(&self, archive: &Path) -> Result<usize> {
        self.ensure_location()?;

        let archive_name = archive.display().to_string();
        let file = fs::File::open(archive).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => errors::not_found(&archive_name),
            _ => errors::archive_read_failed(&archive_name, e),
        })?;
        let mut zip =
            zip::ZipArchive::new(file).map_err(|e| errors::archive_read_failed(&archive_name, e))?;

        info!(
            "Extracting '{}' to target platform {}",
            archive_name,
            self.location.display()
        );
        let progress = ExtractProgress::new(zip.len() as u64, &archive_name);
        let mut written = 0;

        for index in 0..zip.len() {
            let mut entry = zip
                .by_index(index)
                .map_err(|e| errors::archive_read_failed(&archive_name, e))?;
            progress.inc();

            let Some(relative) = entry.enclosed_name() else {
                warn!("Skipping unsafe archive entry {}", entry.name());
                continue;
            };
            let target = self.location.join(relative);

            if entry.is_dir() {
                fs::create_dir_all(&target)
                    .map_err(|e| errors::write_failed(target.display().to_string(), e))?;
                continue;
            }
            if target.exists() {
                debug!("Keeping existing {}", target.display());
                continue;
            }
            if let Some(parent) = target.parent() {
                fs::create_dir_all(parent)
                    .map_err(|e| errors::write_failed(parent.display().to_string(), e))?;
            }

            let mut out = fs::File::create(&target)
                .map_err(|e| errors::write_failed(target.display().to_string(), e))?;
            let copied = io::copy(&mut entry, &mut out);
            drop(out);
            if let Err(e) = copied {
                // A partial file would block the next run, which never overwrites
                if let Err(remove) = fs::remove_file(&target) {
                    warn!("Could not remove partial file {}: {}", target.display(), remove);
                }
                return Err(errors::archive_read_failed(&archive_name, e));
            }
            written += 1;
        }

        progress.finish();
        Ok(written)
    }
}
