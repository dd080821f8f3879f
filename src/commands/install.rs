//! Install command implementation

use console::Style;

use crate::cli::InstallArgs;
use crate::config::TargetConfig;
use crate::error::Result;
use crate::platform::TargetPlatform;

/// Run install command
pub fn run(config: &TargetConfig, args: InstallArgs) -> Result<()> {
    let target = TargetPlatform::new(config.target_platform(args.location.target_platform.as_deref()));
    let installed = target.install(&args.jar)?;
    println!(
        "{} {}",
        Style::new().bold().green().apply_to("Installed"),
        installed.display()
    );
    Ok(())
}
