//! Bundle manifests
//!
//! Reads `META-INF/MANIFEST.MF` from a jar or a plain file and extracts the
//! OSGi headers the resolver needs into a [`BundleManifest`].

pub mod header;
pub mod parser;

use std::io::Read;
use std::path::Path;

pub use header::{HeaderElement, parse_header};
pub use parser::Manifest;

use crate::error::{Result, manifest as errors};

pub const BUNDLE_SYMBOLIC_NAME: &str = "Bundle-SymbolicName";
pub const BUNDLE_VERSION: &str = "Bundle-Version";
pub const EXPORT_PACKAGE: &str = "Export-Package";
pub const IMPORT_PACKAGE: &str = "Import-Package";
pub const REQUIRE_BUNDLE: &str = "Require-Bundle";
pub const FRAGMENT_HOST: &str = "Fragment-Host";
pub const PLATFORM_FILTER: &str = "Eclipse-PlatformFilter";

/// Manifest entry inside a bundle jar
pub const MANIFEST_ENTRY: &str = "META-INF/MANIFEST.MF";

/// OSGi attributes of one bundle
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BundleManifest {
    pub symbolic_name: String,
    pub version: Option<String>,
    pub exported_packages: Vec<String>,
    pub require_bundle: Vec<HeaderElement>,
    pub import_package: Vec<HeaderElement>,
    pub fragment_host: Option<String>,
    pub platform_filter: Option<String>,
}

impl BundleManifest {
    /// Extract OSGi headers from parsed main attributes
    ///
    /// Returns `Ok(None)` when the manifest has no `Bundle-SymbolicName`, i.e.
    /// it does not describe an OSGi bundle.
    pub fn from_manifest(manifest: &Manifest, origin: &Path) -> Result<Option<Self>> {
        let header = |name: &str| -> Result<Vec<HeaderElement>> {
            parse_header(manifest.get(name).unwrap_or_default())
                .map_err(|reason| errors::parse_failed(origin.display().to_string(), name, reason))
        };

        let Some(symbolic_name) = header(BUNDLE_SYMBOLIC_NAME)?
            .first()
            .map(|element| element.value().trim().to_string())
        else {
            return Ok(None);
        };

        let exported_packages = header(EXPORT_PACKAGE)?
            .iter()
            .flat_map(|element| element.values().iter().map(|pkg| pkg.trim().to_string()))
            .collect();

        let fragment_host = header(FRAGMENT_HOST)?
            .first()
            .map(|element| element.value().trim().to_string());

        let platform_filter = manifest
            .get(PLATFORM_FILTER)
            .map(str::trim)
            .filter(|filter| !filter.is_empty())
            .map(|filter| {
                filter
                    .strip_prefix('"')
                    .and_then(|f| f.strip_suffix('"'))
                    .unwrap_or(filter)
                    .to_string()
            });

        Ok(Some(Self {
            symbolic_name,
            version: manifest
                .get(BUNDLE_VERSION)
                .map(|v| v.trim().to_string()),
            exported_packages,
            require_bundle: header(REQUIRE_BUNDLE)?,
            import_package: header(IMPORT_PACKAGE)?,
            fragment_host,
            platform_filter,
        }))
    }

    /// Read the bundle manifest of a jar; `Ok(None)` if it is not a bundle
    pub fn from_jar(jar: &Path) -> Result<Option<Self>> {
        let manifest = read_jar_manifest(jar)?;
        Self::from_manifest(&manifest, jar)
    }

    /// Read a standalone `MANIFEST.MF`, which must describe a bundle
    pub fn from_file(path: &Path) -> Result<Self> {
        let manifest = read_manifest_file(path)?;
        Self::from_manifest(&manifest, path)?.ok_or_else(|| {
            errors::parse_failed(
                path.display().to_string(),
                BUNDLE_SYMBOLIC_NAME,
                "missing header; not an OSGi bundle manifest",
            )
        })
    }
}

/// Read and parse `META-INF/MANIFEST.MF` from a jar
pub fn read_jar_manifest(jar: &Path) -> Result<Manifest> {
    let location = jar.display().to_string();
    let file = std::fs::File::open(jar).map_err(|e| errors::read_failed(&location, e))?;
    let mut archive = zip::ZipArchive::new(file).map_err(|e| errors::read_failed(&location, e))?;
    let mut entry = archive
        .by_name(MANIFEST_ENTRY)
        .map_err(|e| errors::read_failed(&location, format!("{MANIFEST_ENTRY}: {e}")))?;

    let mut text = String::new();
    entry
        .read_to_string(&mut text)
        .map_err(|e| errors::read_failed(&location, format!("{MANIFEST_ENTRY}: {e}")))?;

    parse_text(&text, &location)
}

/// Read and parse a plain manifest file
pub fn read_manifest_file(path: &Path) -> Result<Manifest> {
    let location = path.display().to_string();
    let text = std::fs::read_to_string(path).map_err(|e| errors::read_failed(&location, e))?;
    parse_text(&text, &location)
}

fn parse_text(text: &str, location: &str) -> Result<Manifest> {
    Manifest::parse(text).map_err(|err| {
        errors::parse_failed(
            location,
            err.header.unwrap_or_else(|| format!("line {}", err.line)),
            format!("line {}: {}", err.line, err.reason),
        )
    })
}
