//! Dependency attachment sinks
//!
//! The resolver hands back raw entries that may repeat a bundle. Sinks receive
//! the deduplicated list (first occurrence wins) and register each bundle as a
//! build dependency, which for a command line tool means rendering it for the
//! calling build: a plain listing, a JSON document, or a classpath string.

use std::collections::HashSet;
use std::io::Write;
use std::path::PathBuf;

use clap::ValueEnum;
use serde::Serialize;

use crate::domain::ResolvedBundle;
use crate::error::{Result, TargetError};

/// Consumer of resolved bundles
pub trait AttachmentSink {
    /// Register one bundle
    fn attach(&mut self, bundle: &ResolvedBundle) -> Result<()>;

    /// Called once after the last bundle
    fn finish(&mut self) -> Result<()> {
        Ok(())
    }
}

/// Output format of the `gather` command
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// One `symbolic-name  path` line per bundle
    #[default]
    Text,
    /// `{"dependencies": [{symbolic_name, location}]}` document
    Json,
    /// Jar paths joined by the platform path separator
    Classpath,
}

/// Create the sink for `format` writing to `out`
pub fn for_format<'w>(format: OutputFormat, out: Box<dyn Write + 'w>) -> Box<dyn AttachmentSink + 'w> {
    match format {
        OutputFormat::Text => Box::new(TextSink::new(out)),
        OutputFormat::Json => Box::new(JsonSink::new(out)),
        OutputFormat::Classpath => Box::new(ClasspathSink::new(out)),
    }
}

/// Drop repeated symbolic names, keeping the first occurrence
pub fn dedup_by_symbolic_name(entries: &[ResolvedBundle]) -> Vec<ResolvedBundle> {
    let mut seen = HashSet::new();
    entries
        .iter()
        .filter(|entry| seen.insert(entry.symbolic_name.as_str()))
        .cloned()
        .collect()
}

/// Deduplicate `entries` and hand them to `sink`; returns the number attached
pub fn attach_all(sink: &mut dyn AttachmentSink, entries: &[ResolvedBundle]) -> Result<usize> {
    let bundles = dedup_by_symbolic_name(entries);
    for bundle in &bundles {
        sink.attach(bundle)?;
    }
    sink.finish()?;
    Ok(bundles.len())
}

pub struct TextSink<W: Write> {
    out: W,
}

impl<W: Write> TextSink<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }
}

impl<W: Write> AttachmentSink for TextSink<W> {
    fn attach(&mut self, bundle: &ResolvedBundle) -> Result<()> {
        writeln!(
            self.out,
            "{}  {}",
            bundle.symbolic_name,
            bundle.location.display()
        )?;
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        self.out.flush()?;
        Ok(())
    }
}

pub struct JsonSink<W: Write> {
    out: W,
    bundles: Vec<ResolvedBundle>,
}

impl<W: Write> JsonSink<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            bundles: Vec::new(),
        }
    }
}

#[derive(Serialize)]
struct JsonDocument<'a> {
    dependencies: &'a [ResolvedBundle],
}

impl<W: Write> AttachmentSink for JsonSink<W> {
    fn attach(&mut self, bundle: &ResolvedBundle) -> Result<()> {
        self.bundles.push(bundle.clone());
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        serde_json::to_writer_pretty(
            &mut self.out,
            &JsonDocument {
                dependencies: &self.bundles,
            },
        )?;
        writeln!(self.out)?;
        self.out.flush()?;
        Ok(())
    }
}

pub struct ClasspathSink<W: Write> {
    out: W,
    paths: Vec<PathBuf>,
}

impl<W: Write> ClasspathSink<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            paths: Vec::new(),
        }
    }
}

impl<W: Write> AttachmentSink for ClasspathSink<W> {
    fn attach(&mut self, bundle: &ResolvedBundle) -> Result<()> {
        self.paths.push(bundle.location.clone());
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        let joined = std::env::join_paths(&self.paths).map_err(|e| TargetError::IoError {
            message: format!("cannot build classpath: {e}"),
        })?;
        writeln!(self.out, "{}", joined.to_string_lossy())?;
        self.out.flush()?;
        Ok(())
    }
}
