//! Bundle dependency resolution
//!
//! Walks `Require-Bundle` and `Import-Package` headers depth-first through a
//! [`CandidatePool`] and collects every bundle the starting manifest needs.
//!
//! ## Algorithm
//!
//! 1. A bundle already in the [`ResolutionState`] is skipped; this is the
//!    cycle guard.
//! 2. The bundle is marked analysed *before* its directives are walked, so a
//!    cycle `A → B → A` stops at the second visit to `A`.
//! 3. Each satisfied `Require-Bundle` entry is analysed recursively, then
//!    emitted.
//! 4. Each satisfied `Import-Package` entry emits its exporter (after
//!    analysing it) followed by the exporter's platform fragment, if any.
//!    Fragments are attached, never analysed.
//!
//! Unsatisfied directives are collected as warnings and never stop the walk.
//! The raw entry list may name a bundle several times; deduplication is left
//! to the sink (see [`crate::sink::dedup_by_symbolic_name`]).
//!
//! The starting bundle is never emitted as its own dependency.

use std::collections::HashSet;
use std::fmt;
use std::path::Path;

use tracing::debug;

use crate::domain::ResolvedBundle;
use crate::error::Result;
use crate::index::CandidatePool;
use crate::manifest::{BundleManifest, HeaderElement, IMPORT_PACKAGE, REQUIRE_BUNDLE};

const BUNDLE_VERSION_ATTRIBUTE: &str = "bundle-version";
const RESOLUTION_DIRECTIVE: &str = "resolution";
const RESOLUTION_OPTIONAL: &str = "optional";

/// Which header an unsatisfied entry came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DirectiveKind {
    RequireBundle,
    ImportPackage,
}

impl fmt::Display for DirectiveKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DirectiveKind::RequireBundle => write!(f, "{REQUIRE_BUNDLE}"),
            DirectiveKind::ImportPackage => write!(f, "{IMPORT_PACKAGE}"),
        }
    }
}

/// A directive naming a bundle or package absent from the pool
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnsatisfiedDirective {
    pub kind: DirectiveKind,
    pub name: String,
    /// Declared with `resolution:=optional`
    pub optional: bool,
}

impl fmt::Display for UnsatisfiedDirective {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} directive for {} is not satisfied", self.kind, self.name)?;
        if self.optional {
            write!(f, " (optional)")?;
        }
        Ok(())
    }
}

/// Symbolic names fully analysed during one top-level resolution
#[derive(Debug, Default)]
pub struct ResolutionState {
    analysed: HashSet<String>,
}

impl ResolutionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_analysed(&self, symbolic_name: &str) -> bool {
        self.analysed.contains(symbolic_name)
    }

    /// Returns `false` if the bundle was already analysed
    fn mark_analysed(&mut self, symbolic_name: &str) -> bool {
        self.analysed.insert(symbolic_name.to_string())
    }
}

/// Outcome of a resolution run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Resolution {
    /// Bundles in discovery order, possibly repeated
    pub entries: Vec<ResolvedBundle>,
    pub warnings: Vec<UnsatisfiedDirective>,
}

impl Resolution {
    /// Unsatisfied directives not marked `resolution:=optional`
    pub fn mandatory_warnings(&self) -> usize {
        self.warnings.iter().filter(|w| !w.optional).count()
    }
}

/// Resolve the dependencies of `start` with a fresh [`ResolutionState`]
pub fn resolve(start: &BundleManifest, pool: &CandidatePool) -> Result<Resolution> {
    let mut state = ResolutionState::new();
    resolve_with(start, pool, &mut state)
}

/// Resolve the dependencies of `start`, skipping bundles already in `state`
///
/// # Errors
///
/// Fails if the jar of an indexed bundle can no longer be read.
pub fn resolve_with(
    start: &BundleManifest,
    pool: &CandidatePool,
    state: &mut ResolutionState,
) -> Result<Resolution> {
    let mut walker = Walker {
        pool,
        state,
        root: &start.symbolic_name,
        resolution: Resolution::default(),
    };
    walker.analyse(start)?;
    Ok(walker.resolution)
}

/// Context for one depth-first walk
struct Walker<'a> {
    pool: &'a CandidatePool,
    state: &'a mut ResolutionState,
    /// Bundle under build
    root: &'a str,
    resolution: Resolution,
}

impl Walker<'_> {
    fn analyse(&mut self, manifest: &BundleManifest) -> Result<()> {
        if !self.state.mark_analysed(&manifest.symbolic_name) {
            return Ok(());
        }
        debug!("Analysing {}", manifest.symbolic_name);

        self.analyse_require_bundle(&manifest.require_bundle)?;
        self.analyse_import_package(&manifest.import_package)?;
        Ok(())
    }

    fn analyse_require_bundle(&mut self, elements: &[HeaderElement]) -> Result<()> {
        let pool = self.pool;
        for (element, name) in entries(elements) {
            if let Some(range) = element.attribute(BUNDLE_VERSION_ATTRIBUTE) {
                debug!("Ignoring bundle-version {} of {}", range, name);
            }
            let Some(location) = pool.location(name) else {
                self.unsatisfied(DirectiveKind::RequireBundle, element, name);
                continue;
            };

            self.descend(name, location)?;
            self.emit(name, location);
            debug!("{} directive for {} is satisfied", REQUIRE_BUNDLE, name);
        }
        Ok(())
    }

    fn analyse_import_package(&mut self, elements: &[HeaderElement]) -> Result<()> {
        let pool = self.pool;
        for (element, package) in entries(elements) {
            let Some((exporter, location)) = pool
                .exporter(package)
                .and_then(|exporter| pool.location(exporter).map(|location| (exporter, location)))
            else {
                self.unsatisfied(DirectiveKind::ImportPackage, element, package);
                continue;
            };

            self.descend(exporter, location)?;
            self.emit(exporter, location);

            if let Some((fragment, fragment_location)) = pool
                .fragment_of(exporter)
                .and_then(|fragment| pool.location(fragment).map(|l| (fragment, l)))
            {
                self.emit(fragment, fragment_location);
            }
            debug!("{} directive for {} is satisfied", IMPORT_PACKAGE, package);
        }
        Ok(())
    }

    /// Analyse an indexed bundle unless it was already analysed
    fn descend(&mut self, symbolic_name: &str, location: &Path) -> Result<()> {
        if self.state.is_analysed(symbolic_name) {
            return Ok(());
        }
        let manifest = self.pool.manifest_at(location)?;
        self.analyse(&manifest)
    }

    fn emit(&mut self, symbolic_name: &str, location: &Path) {
        if symbolic_name == self.root {
            return;
        }
        self.resolution
            .entries
            .push(ResolvedBundle::new(symbolic_name, location));
    }

    fn unsatisfied(&mut self, kind: DirectiveKind, element: &HeaderElement, name: &str) {
        self.resolution.warnings.push(UnsatisfiedDirective {
            kind,
            name: name.to_string(),
            optional: element.directive(RESOLUTION_DIRECTIVE) == Some(RESOLUTION_OPTIONAL),
        });
    }
}

/// Bare names of every clause with the clause they came from, in declaration order
fn entries(elements: &[HeaderElement]) -> impl Iterator<Item = (&HeaderElement, &str)> {
    elements.iter().flat_map(|element| {
        element
            .values()
            .iter()
            .map(move |name| (element, name.as_str()))
    })
}
