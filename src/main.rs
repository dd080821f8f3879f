//! osgi-target - Eclipse target platform assembly and OSGi dependency gathering
//!
//! Builds an index over the bundles of a target platform and resolves the
//! transitive `Require-Bundle` / `Import-Package` closure of a bundle under
//! build, attaching platform-specific fragments along the way.

use clap::Parser;

mod cli;
mod commands;
mod config;
mod domain;
mod error;
mod filter;
mod index;
mod logging;
mod manifest;
mod platform;
mod progress;
mod resolver;
mod sink;

#[cfg(test)]
mod test_fixtures;

use cli::{Cli, Commands};
use config::TargetConfig;
use error::TargetError;

/// Exit status for a run that completed with unsatisfied directives under `--strict`
const EXIT_UNSATISFIED: i32 = 2;

fn exit_code(err: &TargetError) -> i32 {
    match err {
        TargetError::Unsatisfied { .. } => EXIT_UNSATISFIED,
        _ => 1,
    }
}

fn main() {
    let cli = Cli::parse();
    logging::init_logging(cli.verbose);

    // Version and completions never read the configuration file
    let config = || TargetConfig::load(cli.config.as_deref());
    let result = match cli.command {
        Commands::Gather(args) => config().and_then(|c| commands::gather::run(&c, args)),
        Commands::Index(args) => config().and_then(|c| commands::index::run(&c, args)),
        Commands::Install(args) => config().and_then(|c| commands::install::run(&c, args)),
        Commands::Clean(args) => config().and_then(|c| commands::clean::run(&c, args)),
        Commands::Materialize(args) => {
            config().and_then(|c| commands::materialize::run(&c, args))
        }
        Commands::Version => commands::version::run(),
        Commands::Completions(args) => commands::completions::run(args),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(exit_code(&e));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_code_unsatisfied() {
        assert_eq!(exit_code(&TargetError::Unsatisfied { count: 3 }), 2);
    }

    #[test]
    fn test_exit_code_other_errors() {
        let err = TargetError::FileNotFound {
            path: "tp/eclipse/plugins".to_string(),
        };
        assert_eq!(exit_code(&err), 1);
    }
}
