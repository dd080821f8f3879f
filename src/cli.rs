//! CLI definitions using clap derive API

use clap::builder::{Styles, styling::AnsiColor};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::config::PlatformOverrides;
use crate::sink::OutputFormat;

/// osgi-target - Eclipse target platform assembly and OSGi dependency gathering
#[derive(Parser, Debug)]
#[command(
    name = "osgi-target",
    author,
    version,
    styles = Styles::styled()
        .header(AnsiColor::Green.on_default().bold())
        .usage(AnsiColor::Green.on_default().bold())
        .literal(AnsiColor::Cyan.on_default().bold())
        .placeholder(AnsiColor::Cyan.on_default()),
    about = "Assemble Eclipse target platforms and gather OSGi bundle dependencies",
    long_about = "osgi-target materializes an Eclipse target platform from platform archives and \
                  resolves the bundles a bundle under build needs through its Require-Bundle and \
                  Import-Package headers, including platform-specific fragments.",
    after_help = "\x1b[1m\x1b[32mExamples:\x1b[0m\n    \
                  osgi-target materialize eclipse-platform-3.4-win32.zip\n    \
                  osgi-target gather --manifest META-INF/MANIFEST.MF\n    \
                  osgi-target gather --format classpath --os linux --ws gtk --arch x86_64\n    \
                  osgi-target install target/my.bundle_1.0.0.jar\n    \
                  osgi-target clean"
)]
pub struct Cli {
    /// Configuration file (defaults to ./osgi-target.yaml when present)
    #[arg(long, short = 'c', global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Resolve the bundles required by a bundle manifest
    Gather(GatherArgs),

    /// List the bundles indexed in the target platform
    Index(IndexArgs),

    /// Copy a built jar into the target platform
    Install(InstallArgs),

    /// Delete the target platform
    Clean(CleanArgs),

    /// Unpack platform archives into the target platform
    Materialize(MaterializeArgs),

    /// Show version information
    Version,

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Target platform location option shared by all platform commands
#[derive(Args, Debug, Default)]
pub struct LocationArgs {
    /// Target platform directory (bundles are read from <DIR>/eclipse/plugins)
    #[arg(long, short = 't', value_name = "DIR")]
    pub target_platform: Option<PathBuf>,
}

/// Platform descriptor overrides
#[derive(Args, Debug, Default)]
pub struct PlatformArgs {
    /// Windowing system (osgi.ws)
    #[arg(long, value_name = "WS")]
    pub ws: Option<String>,

    /// Operating system (osgi.os)
    #[arg(long, value_name = "OS")]
    pub os: Option<String>,

    /// Architecture (osgi.arch)
    #[arg(long, value_name = "ARCH")]
    pub arch: Option<String>,

    /// Locale (osgi.nl)
    #[arg(long, value_name = "NL")]
    pub nl: Option<String>,
}

impl PlatformArgs {
    pub fn overrides(&self) -> PlatformOverrides {
        PlatformOverrides {
            ws: self.ws.clone(),
            os: self.os.clone(),
            arch: self.arch.clone(),
            nl: self.nl.clone(),
        }
    }
}

/// Arguments for the gather command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  Resolve dependencies of the bundle in the current directory:\n    osgi-target gather\n\n\
                  Use another manifest and target platform:\n    osgi-target gather -m bundle/META-INF/MANIFEST.MF -t ../tp\n\n\
                  Add declared jars to the platform first:\n    osgi-target gather --with lib/commons-io.jar\n\n\
                  Emit a classpath for javac:\n    osgi-target gather --format classpath\n\n\
                  Fail when a directive is unsatisfied:\n    osgi-target gather --strict")]
pub struct GatherArgs {
    /// Bundle manifest to resolve (defaults to META-INF/MANIFEST.MF)
    #[arg(long, short = 'm', value_name = "FILE")]
    pub manifest: Option<PathBuf>,

    #[command(flatten)]
    pub location: LocationArgs,

    #[command(flatten)]
    pub platform: PlatformArgs,

    /// Jars to copy into the plugin folder before resolving
    #[arg(long = "with", value_name = "JAR", num_args = 1..)]
    pub with: Vec<PathBuf>,

    /// Output format
    #[arg(long, short = 'f', value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Write the result to a file instead of stdout
    #[arg(long, short = 'o', value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Exit with status 2 if a directive without resolution:=optional is unsatisfied
    #[arg(long)]
    pub strict: bool,
}

/// Arguments for the index command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  List indexed bundles:\n    osgi-target index\n\n\
                  Index for another platform:\n    osgi-target index --os linux --ws gtk\n\n\
                  Machine-readable output:\n    osgi-target index --json")]
pub struct IndexArgs {
    #[command(flatten)]
    pub location: LocationArgs,

    #[command(flatten)]
    pub platform: PlatformArgs,

    /// Print the index as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the install command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  Install the built bundle:\n    osgi-target install target/my.bundle_1.0.0.jar")]
pub struct InstallArgs {
    /// Jar to copy into the plugin folder
    pub jar: PathBuf,

    #[command(flatten)]
    pub location: LocationArgs,
}

/// Arguments for the clean command
#[derive(Parser, Debug)]
pub struct CleanArgs {
    #[command(flatten)]
    pub location: LocationArgs,
}

/// Arguments for the materialize command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  Unpack an SDK and a delta pack:\n    osgi-target materialize eclipse-SDK.zip eclipse-delta-pack.zip")]
pub struct MaterializeArgs {
    /// Local zip archives to unpack, in order
    #[arg(required = true, num_args = 1..)]
    pub archives: Vec<PathBuf>,

    #[command(flatten)]
    pub location: LocationArgs,
}

/// Arguments for completions command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  Generate bash completions:\n    osgi-target completions --shell bash > ~/.bash_completion.d/osgi-target\n\n\
                  Generate zsh completions:\n    osgi-target completions --shell zsh > ~/.zfunc/_osgi-target")]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(long, value_enum)]
    pub shell: clap_complete::Shell,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parsing_gather_defaults() {
        let cli = Cli::try_parse_from(["osgi-target", "gather"]).unwrap();
        match cli.command {
            Commands::Gather(args) => {
                assert_eq!(args.manifest, None);
                assert_eq!(args.location.target_platform, None);
                assert!(args.with.is_empty());
                assert_eq!(args.format, OutputFormat::Text);
                assert!(!args.strict);
            }
            _ => panic!("Expected Gather command"),
        }
    }

    #[test]
    fn test_cli_parsing_gather_with_options() {
        let cli = Cli::try_parse_from([
            "osgi-target",
            "gather",
            "-m",
            "bundle/META-INF/MANIFEST.MF",
            "-t",
            "/opt/tp",
            "--os",
            "linux",
            "--with",
            "a.jar",
            "b.jar",
            "--format",
            "json",
            "--strict",
        ])
        .unwrap();
        match cli.command {
            Commands::Gather(args) => {
                assert_eq!(
                    args.manifest,
                    Some(PathBuf::from("bundle/META-INF/MANIFEST.MF"))
                );
                assert_eq!(args.location.target_platform, Some(PathBuf::from("/opt/tp")));
                assert_eq!(args.platform.os.as_deref(), Some("linux"));
                assert_eq!(args.platform.ws, None);
                assert_eq!(args.with, vec![PathBuf::from("a.jar"), PathBuf::from("b.jar")]);
                assert_eq!(args.format, OutputFormat::Json);
                assert!(args.strict);
            }
            _ => panic!("Expected Gather command"),
        }
    }

    #[test]
    fn test_cli_parsing_format_classpath() {
        let cli =
            Cli::try_parse_from(["osgi-target", "gather", "--format", "classpath"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::Gather(GatherArgs {
                format: OutputFormat::Classpath,
                ..
            })
        ));
    }

    #[test]
    fn test_cli_parsing_install() {
        let cli = Cli::try_parse_from(["osgi-target", "install", "target/a.jar"]).unwrap();
        match cli.command {
            Commands::Install(args) => assert_eq!(args.jar, PathBuf::from("target/a.jar")),
            _ => panic!("Expected Install command"),
        }
    }

    #[test]
    fn test_cli_parsing_materialize_requires_archive() {
        assert!(Cli::try_parse_from(["osgi-target", "materialize"]).is_err());
        let cli = Cli::try_parse_from(["osgi-target", "materialize", "a.zip", "b.zip"]).unwrap();
        match cli.command {
            Commands::Materialize(args) => assert_eq!(args.archives.len(), 2),
            _ => panic!("Expected Materialize command"),
        }
    }

    #[test]
    fn test_cli_parsing_global_options() {
        let cli = Cli::try_parse_from([
            "osgi-target",
            "clean",
            "--config",
            "ci.yaml",
            "-v",
        ])
        .unwrap();
        assert!(cli.verbose);
        assert_eq!(cli.config, Some(PathBuf::from("ci.yaml")));
        assert!(matches!(cli.command, Commands::Clean(_)));
    }

    #[test]
    fn test_platform_overrides() {
        let args = PlatformArgs {
            ws: Some("gtk".to_string()),
            ..PlatformArgs::default()
        };
        let overrides = args.overrides();
        assert_eq!(overrides.ws.as_deref(), Some("gtk"));
        assert_eq!(overrides.os, None);
    }

    #[test]
    fn test_cli_parsing_version() {
        let cli = Cli::try_parse_from(["osgi-target", "version"]).unwrap();
        assert!(matches!(cli.command, Commands::Version));
    }

    #[test]
    fn test_cli_parsing_completions_shell() {
        let cli = Cli::try_parse_from(["osgi-target", "completions", "--shell", "zsh"]).unwrap();
        match cli.command {
            Commands::Completions(args) => assert_eq!(args.shell, clap_complete::Shell::Zsh),
            _ => panic!("Expected Completions command"),
        }
        assert!(Cli::try_parse_from(["osgi-target", "completions", "--shell", "tcsh"]).is_err());
    }
}
