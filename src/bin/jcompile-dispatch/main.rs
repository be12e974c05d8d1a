//! jcompile-dispatch CLI - Maven POM generation for GraalVM native images

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod commands;

use cli::{Cli, MessageFormat};
use jcompile::util::{Diagnostic, GlobalContext, Shell};

/// Options shared by every command.
pub struct GlobalOptions {
    pub shell: Shell,
    pub ctx: GlobalContext,
}

fn main() {
    if let Err(e) = run() {
        eprint!("{}", Diagnostic::error(format!("{:#}", e)));
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    // Parse CLI
    let cli = Cli::parse();

    if let Some(shell) = cli.completions {
        return commands::completions::execute(shell);
    }

    // Set up logging; RUST_LOG wins when set
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if cli.verbose {
            EnvFilter::new("jcompile=debug")
        } else {
            EnvFilter::new("jcompile=info")
        }
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();

    let shell = Shell::from_flags(
        cli.quiet,
        cli.verbose,
        cli.color,
        cli.message_format == MessageFormat::Json,
    );
    let ctx = GlobalContext::new()?;

    let global_opts = GlobalOptions { shell, ctx };

    commands::generate::execute(cli.generate, &global_opts)
}
