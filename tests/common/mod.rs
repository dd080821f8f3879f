//! Common test utilities for osgi-target integration tests

#![allow(dead_code)]

use std::io::Write;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use tempfile::TempDir;
use zip::write::SimpleFileOptions;

/// Plugin folder of the default target platform, relative to the project
pub const PLUGINS: &str = "target-platform/eclipse/plugins";

/// A project directory with a target platform next to it
pub struct TestProject {
    /// Temporary directory
    pub temp: TempDir,
    /// Path to project root
    pub path: PathBuf,
}

impl TestProject {
    pub fn new() -> Self {
        let temp = TempDir::new().expect("Failed to create temp directory");
        let path = temp.path().to_path_buf();
        Self { temp, path }
    }

    /// Path of the default plugin folder
    pub fn plugins_dir(&self) -> PathBuf {
        self.path.join(PLUGINS)
    }

    /// Write a bundle jar into the default plugin folder
    pub fn add_bundle(&self, file_name: &str, headers: &[(&str, &str)]) -> PathBuf {
        std::fs::create_dir_all(self.plugins_dir()).expect("Failed to create plugin folder");
        write_jar(&self.plugins_dir().join(file_name), &manifest(headers))
    }

    /// Write the manifest of the bundle under build
    pub fn write_manifest(&self, headers: &[(&str, &str)]) {
        self.write_file("META-INF/MANIFEST.MF", &manifest(headers));
    }

    /// Write a file in the project
    pub fn write_file(&self, path: &str, content: &str) {
        let file_path = self.path.join(path);
        if let Some(parent) = file_path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create parent directory");
        }
        std::fs::write(&file_path, content).expect("Failed to write file");
    }

    /// Read a file from the project
    pub fn read_file(&self, path: &str) -> String {
        std::fs::read_to_string(self.path.join(path)).expect("Failed to read file")
    }

    pub fn file_exists(&self, path: &str) -> bool {
        self.path.join(path).exists()
    }

    /// Command running in the project directory
    pub fn cmd(&self) -> Command {
        let mut cmd = osgi_target_cmd();
        cmd.current_dir(&self.path);
        cmd
    }
}

#[allow(deprecated)]
pub fn osgi_target_cmd() -> Command {
    let mut cmd = Command::cargo_bin("osgi-target").expect("binary is built");
    cmd.env_remove("RUST_LOG");
    cmd.env("NO_COLOR", "1");
    cmd
}

/// Manifest text with the given main attributes
pub fn manifest(headers: &[(&str, &str)]) -> String {
    let mut text = String::from("Manifest-Version: 1.0\r\nBundle-ManifestVersion: 2\r\n");
    for (name, value) in headers {
        text.push_str(&format!("{name}: {value}\r\n"));
    }
    text.push_str("\r\n");
    text
}

/// Write a jar holding `manifest` as its `META-INF/MANIFEST.MF`
pub fn write_jar(path: &Path, manifest: &str) -> PathBuf {
    write_zip(path, &[("META-INF/MANIFEST.MF", manifest)])
}

/// Write a zip archive with the given entries
pub fn write_zip(path: &Path, entries: &[(&str, &str)]) -> PathBuf {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).expect("Failed to create parent directory");
    }
    let file = std::fs::File::create(path).expect("Failed to create archive");
    let mut writer = zip::ZipWriter::new(file);
    for (name, content) in entries {
        writer
            .start_file(*name, SimpleFileOptions::default())
            .expect("Failed to start entry");
        writer
            .write_all(content.as_bytes())
            .expect("Failed to write entry");
    }
    writer.finish().expect("Failed to finish archive");
    path.to_path_buf()
}
