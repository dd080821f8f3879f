//! Index command implementation
//!
//! Lists the bundles the resolver would see for the configured platform.

use std::path::PathBuf;

use console::Style;
use serde::Serialize;

use crate::cli::IndexArgs;
use crate::config::TargetConfig;
use crate::error::{Result, fs as fs_errors};
use crate::index::{CandidatePool, build_index};
use crate::platform::TargetPlatform;

#[derive(Debug, Serialize)]
struct IndexEntry<'a> {
    symbolic_name: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    version: Option<&'a str>,
    location: PathBuf,
    #[serde(skip_serializing_if = "Option::is_none")]
    fragment_host: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    fragment: Option<&'a str>,
    exported_packages: usize,
}

/// Run index command
pub fn run(config: &TargetConfig, args: IndexArgs) -> Result<()> {
    let target = TargetPlatform::new(config.target_platform(args.location.target_platform.as_deref()));
    let plugins = target.plugins_dir();
    if !plugins.is_dir() {
        return Err(fs_errors::not_found(plugins.display().to_string()));
    }

    let platform = config.platform(&args.platform.overrides());
    let pool = build_index(&plugins, &platform)?;

    if args.json {
        let entries = entries(&pool);
        println!("{}", serde_json::to_string_pretty(&entries)?);
        return Ok(());
    }

    if pool.is_empty() {
        println!("No bundles found in {}.", plugins.display());
        return Ok(());
    }

    println!("Indexed bundles ({}) for {}:", pool.len(), platform);
    println!();
    for entry in entries(&pool) {
        print_entry(&entry);
    }
    Ok(())
}

fn entries(pool: &CandidatePool) -> Vec<IndexEntry<'_>> {
    pool.bundles()
        .map(|(location, manifest)| IndexEntry {
            symbolic_name: &manifest.symbolic_name,
            version: manifest.version.as_deref(),
            location: location.to_path_buf(),
            fragment_host: manifest.fragment_host.as_deref(),
            fragment: pool.fragment_of(&manifest.symbolic_name),
            exported_packages: manifest.exported_packages.len(),
        })
        .collect()
}

fn print_entry(entry: &IndexEntry<'_>) {
    match entry.version {
        Some(version) => println!(
            "  {} {}",
            Style::new().bold().yellow().apply_to(entry.symbolic_name),
            Style::new().dim().apply_to(version)
        ),
        None => println!("  {}", Style::new().bold().yellow().apply_to(entry.symbolic_name)),
    }
    println!(
        "    {} {}",
        Style::new().bold().apply_to("Location:"),
        entry.location.display()
    );
    if let Some(host) = entry.fragment_host {
        println!("    {} {}", Style::new().bold().apply_to("Fragment of:"), host);
    } else {
        println!(
            "    {} {}",
            Style::new().bold().apply_to("Exports:"),
            entry.exported_packages
        );
    }
    if let Some(fragment) = entry.fragment {
        println!("    {} {}", Style::new().bold().apply_to("Fragment:"), fragment);
    }
}
