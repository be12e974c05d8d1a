//! CLI definitions using clap.

use std::path::PathBuf;

use clap::{Args, Parser, ValueEnum};

use jcompile::core::Platform;
use jcompile::util::shell::ColorChoice;

/// Generate a Maven POM wired for GraalVM native-image builds
#[derive(Parser)]
#[command(name = "jcompile-dispatch")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(flatten)]
    pub generate: GenerateArgs,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Print only errors
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Coloring: auto, always, never
    #[arg(long, value_name = "WHEN", default_value = "auto")]
    pub color: ColorChoice,

    /// Output format for messages
    #[arg(long, value_enum, value_name = "FMT", default_value_t = MessageFormat::Human)]
    pub message_format: MessageFormat,

    /// Print shell completions and exit
    #[arg(long, value_name = "SHELL")]
    pub completions: Option<clap_complete::Shell>,
}

#[derive(Args)]
pub struct GenerateArgs {
    /// Existing pom.xml to merge with
    #[arg(long, value_name = "PATH")]
    pub existing: Option<PathBuf>,

    /// Where to write the generated POM [default: pom.xml]
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Platform to generate for (defaults to the host)
    #[arg(long, env = "JCOMPILE_PLATFORM", value_name = "PLATFORM")]
    pub platform: Option<Platform>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum MessageFormat {
    /// Human-readable status lines on stderr
    Human,
    /// One JSON object per event on stdout
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_cli_defaults() {
        let cli = Cli::parse_from(["jcompile-dispatch"]);
        assert!(!cli.verbose);
        assert!(!cli.quiet);
        assert_eq!(cli.color, ColorChoice::Auto);
        assert_eq!(cli.message_format, MessageFormat::Human);
        assert!(cli.completions.is_none());
    }

    #[test]
    fn test_cli_global_flags() {
        let cli = Cli::parse_from([
            "jcompile-dispatch",
            "-v",
            "--color",
            "never",
            "--message-format",
            "json",
        ]);
        assert!(cli.verbose);
        assert_eq!(cli.color, ColorChoice::Never);
        assert_eq!(cli.message_format, MessageFormat::Json);
    }

    #[test]
    fn test_cli_quiet_conflicts_with_verbose() {
        assert!(Cli::try_parse_from(["jcompile-dispatch", "-q", "-v"]).is_err());
    }

    #[test]
    fn test_cli_rejects_unknown_color() {
        assert!(Cli::try_parse_from(["jcompile-dispatch", "--color", "sometimes"]).is_err());
    }

    #[test]
    fn test_cli_completions() {
        let cli = Cli::parse_from(["jcompile-dispatch", "--completions", "bash"]);
        assert_eq!(cli.completions, Some(clap_complete::Shell::Bash));
    }
}
