//! Test fixtures and utilities for reducing test setup duplication.
//!
//! Builds real bundle jars in temp directories so index and resolver tests
//! exercise the same zip and manifest code paths as production.
//!
//! # Usage
//!
//! ```ignore
//! use crate::test_fixtures::{ManifestBuilder, create_temp_dir, write_jar};
//!
//! let temp = create_temp_dir();
//! let jar = write_jar(
//!     temp.path(),
//!     "a_1.0.0.jar",
//!     &ManifestBuilder::bundle("a").exports(&["pkg.a"]).build(),
//! );
//! ```

#![allow(clippy::expect_used)]

use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::TempDir;
use zip::write::SimpleFileOptions;

use crate::manifest::MANIFEST_ENTRY;

/// Create a temp directory in the system temp location.
///
/// # Panics
///
/// Panics if the temp directory cannot be created.
#[must_use]
pub fn create_temp_dir() -> TempDir {
    TempDir::new().expect("Failed to create temp directory")
}

/// Fluent builder for manifest text
#[derive(Debug, Clone, Default)]
pub struct ManifestBuilder {
    headers: Vec<(String, String)>,
}

impl ManifestBuilder {
    /// Start a bundle manifest with the given `Bundle-SymbolicName` value
    pub fn bundle(symbolic_name: &str) -> Self {
        Self::default()
            .header("Bundle-ManifestVersion", "2")
            .header("Bundle-SymbolicName", symbolic_name)
    }

    pub fn header(mut self, name: &str, value: &str) -> Self {
        self.headers.push((name.to_string(), value.to_string()));
        self
    }

    pub fn version(self, version: &str) -> Self {
        self.header("Bundle-Version", version)
    }

    pub fn exports(self, packages: &[&str]) -> Self {
        self.header("Export-Package", &packages.join(","))
    }

    pub fn requires(self, bundles: &[&str]) -> Self {
        self.header("Require-Bundle", &bundles.join(","))
    }

    pub fn imports(self, packages: &[&str]) -> Self {
        self.header("Import-Package", &packages.join(","))
    }

    pub fn fragment_of(self, host: &str) -> Self {
        self.header("Fragment-Host", host)
    }

    pub fn platform_filter(self, filter: &str) -> Self {
        self.header("Eclipse-PlatformFilter", filter)
    }

    pub fn build(&self) -> String {
        let mut text = String::from("Manifest-Version: 1.0\r\n");
        for (name, value) in &self.headers {
            text.push_str(name);
            text.push_str(": ");
            text.push_str(value);
            text.push_str("\r\n");
        }
        text.push_str("\r\n");
        text
    }
}

/// Write a jar containing `manifest` as `META-INF/MANIFEST.MF`
pub fn write_jar(dir: &Path, file_name: &str, manifest: &str) -> PathBuf {
    let path = dir.join(file_name);
    let file = std::fs::File::create(&path).expect("Failed to create jar");
    let mut writer = zip::ZipWriter::new(file);
    let options =
        SimpleFileOptions::default().compression_method(zip::CompressionMethod::Deflated);

    writer
        .start_file(MANIFEST_ENTRY, options)
        .expect("Failed to start manifest entry");
    writer
        .write_all(manifest.as_bytes())
        .expect("Failed to write manifest");
    writer
        .start_file("plugin.xml", options)
        .expect("Failed to start plugin.xml entry");
    writer
        .write_all(b"<?xml version=\"1.0\"?><plugin/>")
        .expect("Failed to write plugin.xml");
    writer.finish().expect("Failed to finish jar");

    path
}

/// Write a jar that has no manifest entry at all
pub fn write_jar_without_manifest(dir: &Path, file_name: &str) -> PathBuf {
    let path = dir.join(file_name);
    let file = std::fs::File::create(&path).expect("Failed to create jar");
    let mut writer = zip::ZipWriter::new(file);
    writer
        .start_file("readme.txt", SimpleFileOptions::default())
        .expect("Failed to start entry");
    writer.write_all(b"no manifest").expect("Failed to write entry");
    writer.finish().expect("Failed to finish jar");
    path
}
