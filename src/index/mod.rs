//! Candidate pool index
//!
//! Scans a directory of bundle jars once and builds the lookup tables the
//! resolver walks:
//!
//! ```text
//! symbolic name  → jar location
//! package name   → exporting symbolic name
//! host name      → fragment symbolic name
//! ```
//!
//! Fragments are only indexed when their `Eclipse-PlatformFilter` matches the
//! configured [`PlatformDescriptor`]; a fragment without a filter, or with a
//! filter for another platform, does not exist for resolution purposes.
//! Jars are visited in file name order, and when two candidates claim the same
//! symbolic name or package the later one wins.

use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};

use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::domain::PlatformDescriptor;
use crate::error::{Result, fs as fs_errors, manifest as errors};
use crate::filter;
use crate::manifest::BundleManifest;

/// Read-only index over the bundles of a target platform
#[derive(Debug, Clone, Default)]
pub struct CandidatePool {
    bundles: BTreeMap<PathBuf, BundleManifest>,
    symbolic_names: HashMap<String, PathBuf>,
    exported_packages: HashMap<String, String>,
    fragments: HashMap<String, String>,
}

/// Build the candidate pool for `candidate_dir`
pub fn build_index(candidate_dir: &Path, platform: &PlatformDescriptor) -> Result<CandidatePool> {
    CandidatePool::build(candidate_dir, platform)
}

impl CandidatePool {
    /// Scan `candidate_dir` (non-recursively) for `.jar` files
    pub fn build(candidate_dir: &Path, platform: &PlatformDescriptor) -> Result<Self> {
        if !candidate_dir.is_dir() {
            return Err(fs_errors::not_found(candidate_dir.display().to_string()));
        }

        debug!(
            "Scanning {} for bundles ({})",
            candidate_dir.display(),
            platform
        );

        let mut pool = Self::default();
        for jar in candidate_jars(candidate_dir)? {
            match BundleManifest::from_jar(&jar)? {
                Some(manifest) => pool.add(jar, manifest, platform)?,
                None => debug!("Skipping {}: not an OSGi bundle", jar.display()),
            }
        }

        debug!(
            "Indexed {} bundles, {} exported packages, {} fragments",
            pool.symbolic_names.len(),
            pool.exported_packages.len(),
            pool.fragments.len()
        );
        Ok(pool)
    }

    /// Classify and register one candidate
    fn add(
        &mut self,
        location: PathBuf,
        manifest: BundleManifest,
        platform: &PlatformDescriptor,
    ) -> Result<()> {
        if let Some(host) = manifest.fragment_host.clone() {
            let Some(expression) = manifest.platform_filter.as_deref() else {
                debug!(
                    "Discarding fragment {}: no platform filter",
                    manifest.symbolic_name
                );
                return Ok(());
            };

            let applies = filter::matches(expression, platform)
                .map_err(|e| errors::filter_syntax(location.display().to_string(), &e))?;
            if !applies {
                debug!(
                    "Discarding fragment {}: {} does not match {}",
                    manifest.symbolic_name, expression, platform
                );
                return Ok(());
            }

            debug!(
                "Identified fragment {} for host {}",
                manifest.symbolic_name, host
            );
            if let Some(previous) = self.fragments.insert(host.clone(), manifest.symbolic_name.clone())
            {
                if previous != manifest.symbolic_name {
                    warn!(
                        "Host {} has several matching fragments; {} replaces {}",
                        host, manifest.symbolic_name, previous
                    );
                }
            }
            self.register_name(&manifest.symbolic_name, &location);
            self.bundles.insert(location, manifest);
            return Ok(());
        }

        debug!(
            "Identified bundle {} / {}",
            manifest.symbolic_name,
            manifest.version.as_deref().unwrap_or("unversioned")
        );
        self.register_name(&manifest.symbolic_name, &location);
        for package in &manifest.exported_packages {
            debug!(" Exports: {}", package);
            if let Some(previous) = self
                .exported_packages
                .insert(package.clone(), manifest.symbolic_name.clone())
            {
                if previous != manifest.symbolic_name {
                    warn!(
                        "Package {} is exported by both {} and {}; using {}",
                        package, previous, manifest.symbolic_name, manifest.symbolic_name
                    );
                }
            }
        }
        self.bundles.insert(location, manifest);
        Ok(())
    }

    fn register_name(&mut self, symbolic_name: &str, location: &Path) {
        if let Some(previous) = self
            .symbolic_names
            .insert(symbolic_name.to_string(), location.to_path_buf())
        {
            warn!(
                "Bundle {} found at {} and {}; using {}",
                symbolic_name,
                previous.display(),
                location.display(),
                location.display()
            );
            self.bundles.remove(&previous);
        }
    }

    /// Jar location registered for a symbolic name
    pub fn location(&self, symbolic_name: &str) -> Option<&Path> {
        self.symbolic_names.get(symbolic_name).map(PathBuf::as_path)
    }

    /// Symbolic name of the bundle exporting `package`
    pub fn exporter(&self, package: &str) -> Option<&str> {
        self.exported_packages.get(package).map(String::as_str)
    }

    /// Symbolic name of the platform fragment attached to `host`
    pub fn fragment_of(&self, host: &str) -> Option<&str> {
        self.fragments.get(host).map(String::as_str)
    }

    /// Re-read the manifest of an indexed jar
    ///
    /// The jar was readable when the pool was built, so any failure here is
    /// fatal for the resolution run.
    pub fn manifest_at(&self, location: &Path) -> Result<BundleManifest> {
        BundleManifest::from_jar(location)?.ok_or_else(|| {
            errors::read_failed(
                location.display().to_string(),
                "no longer carries a Bundle-SymbolicName",
            )
        })
    }

    /// Indexed candidates in location order
    pub fn bundles(&self) -> impl Iterator<Item = (&Path, &BundleManifest)> {
        self.bundles.iter().map(|(path, manifest)| (path.as_path(), manifest))
    }

    pub fn len(&self) -> usize {
        self.bundles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bundles.is_empty()
    }
}

/// `.jar` files directly inside `dir`, sorted by file name
fn candidate_jars(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut jars = Vec::new();
    for entry in WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
    {
        let entry = entry.map_err(|e| fs_errors::read_failed(dir.display().to_string(), e))?;
        // path().is_file() follows symlinked jars; dangling links are skipped
        if entry.path().is_file()
            && entry
                .file_name()
                .to_str()
                .is_some_and(|name| name.ends_with(".jar"))
        {
            jars.push(entry.into_path());
        }
    }
    Ok(jars)
}
