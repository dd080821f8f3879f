//! Materialize command implementation
//!
//! Archives are unpacked in the order given; files already present in the
//! target platform are kept, so earlier archives take precedence.

use console::Style;

use crate::cli::MaterializeArgs;
use crate::config::TargetConfig;
use crate::error::Result;
use crate::platform::TargetPlatform;

/// Run materialize command
pub fn run(config: &TargetConfig, args: MaterializeArgs) -> Result<()> {
    let target = TargetPlatform::new(config.target_platform(args.location.target_platform.as_deref()));

    let mut total = 0;
    for archive in &args.archives {
        let written = target.materialize(archive)?;
        println!(
            "{} {} file{} from {}",
            Style::new().bold().green().apply_to("Extracted"),
            written,
            if written == 1 { "" } else { "s" },
            archive.display()
        );
        total += written;
    }

    println!(
        "Target platform {} ready ({} new files)",
        Style::new().bold().yellow().apply_to(target.location().display()),
        total
    );
    Ok(())
}
