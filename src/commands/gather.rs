//! Gather command implementation
//!
//! Indexes the target platform, resolves the bundle manifest against it and
//! hands the deduplicated dependency list to the selected sink. Nothing is
//! written to the output until resolution has completed.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use console::Style;
use tracing::{info, warn};

use crate::cli::GatherArgs;
use crate::config::TargetConfig;
use crate::error::{Result, TargetError, fs as fs_errors};
use crate::index::build_index;
use crate::manifest::BundleManifest;
use crate::platform::TargetPlatform;
use crate::resolver::resolve;
use crate::sink::{attach_all, for_format};

/// Run gather command
pub fn run(config: &TargetConfig, args: GatherArgs) -> Result<()> {
    let target = TargetPlatform::new(config.target_platform(args.location.target_platform.as_deref()));

    for jar in &args.with {
        info!("Copying dependency {} to plugin folder", jar.display());
        target.install(jar)?;
    }

    let plugins = canonical_dir(&target.plugins_dir())?;
    let platform = config.platform(&args.platform.overrides());
    let pool = build_index(&plugins, &platform)?;

    let manifest_path = config.manifest(args.manifest.as_deref());
    let start = BundleManifest::from_file(&manifest_path)?;
    let resolution = resolve(&start, &pool)?;

    for warning in &resolution.warnings {
        warn!("{}", warning);
    }

    let out: Box<dyn Write> = match &args.output {
        Some(path) => Box::new(BufWriter::new(
            File::create(path).map_err(|e| fs_errors::write_failed(path.display().to_string(), e))?,
        )),
        None => Box::new(std::io::stdout().lock()),
    };
    let mut sink = for_format(args.format, out);
    let attached = attach_all(sink.as_mut(), &resolution.entries)?;

    eprintln!(
        "{} {} bundle{} for {} from {} candidates",
        Style::new().bold().green().apply_to("Resolved"),
        attached,
        if attached == 1 { "" } else { "s" },
        Style::new().bold().yellow().apply_to(&start.symbolic_name),
        pool.len()
    );
    if !resolution.warnings.is_empty() {
        eprintln!(
            "{} {} unsatisfied directive{}",
            Style::new().bold().yellow().apply_to("Warning:"),
            resolution.warnings.len(),
            if resolution.warnings.len() == 1 { "" } else { "s" }
        );
    }

    let mandatory = resolution.mandatory_warnings();
    if args.strict && mandatory > 0 {
        return Err(TargetError::Unsatisfied { count: mandatory });
    }

    Ok(())
}

/// Absolute form of an existing directory, so emitted jar paths are absolute
fn canonical_dir(dir: &Path) -> Result<PathBuf> {
    if !dir.is_dir() {
        return Err(fs_errors::not_found(dir.display().to_string()));
    }
    dunce::canonicalize(dir).map_err(|e| fs_errors::read_failed(dir.display().to_string(), e))
}
