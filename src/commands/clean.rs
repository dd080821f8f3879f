//! Clean command implementation

use console::Style;

use crate::cli::CleanArgs;
use crate::config::TargetConfig;
use crate::error::Result;
use crate::platform::TargetPlatform;

/// Run clean command
pub fn run(config: &TargetConfig, args: CleanArgs) -> Result<()> {
    let target = TargetPlatform::new(config.target_platform(args.location.target_platform.as_deref()));
    if target.clean()? {
        println!(
            "{} {}",
            Style::new().bold().green().apply_to("Deleted"),
            target.location().display()
        );
    } else {
        println!("Nothing to clean at {}.", target.location().display());
    }
    Ok(())
}
