//! tspaths CLI
//!
//! Shows the `baseUrl` and `paths` a TypeScript project resolves to, and the
//! absolute mapping entries built from them.

mod output;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use colored::Colorize;
use output::OutputFormatter;
use std::path::PathBuf;
use tracing::debug;
use tspaths_core::{
    BASE_URL_ENV, ConfigLoaderResult, PROJECT_ENV, TsConfigLoader, config_loader, init_tracing,
    path,
};

#[derive(Parser)]
#[command(name = "tspaths")]
#[command(about = "Resolve tsconfig baseUrl and paths through extends chains")]
#[command(version = tspaths_core::VERSION)]
#[command(
    long_about = "tspaths finds the tsconfig.json (or jsconfig.json) for a directory, follows its\n\
extends chain and prints the effective baseUrl, paths and absolute mapping entries.\n\
\n\
Examples:\n  \
tspaths                              # Resolve the current directory\n  \
tspaths --cwd packages/app           # Resolve another directory\n  \
tspaths --project tsconfig.build.json\n  \
tspaths --format json                # Machine-readable output"
)]
struct Cli {
    /// Directory to resolve from
    #[arg(long, help = "Working directory (default: current directory)")]
    cwd: Option<PathBuf>,

    /// Project file or directory, relative to the working directory
    #[arg(short, long, env = PROJECT_ENV)]
    project: Option<String>,

    /// Replaces the baseUrl from the config chain
    #[arg(long, env = BASE_URL_ENV)]
    base_url: Option<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "human")]
    format: OutputFormat,

    /// Verbose output (can be used multiple times for increased verbosity)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Disable colored output
    #[arg(long)]
    no_color: bool,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
pub(crate) enum OutputFormat {
    /// Human-readable output with colors
    Human,
    /// JSON format for programmatic consumption
    Json,
}

fn main() {
    let cli = Cli::parse();

    if cli.no_color || std::env::var_os("NO_COLOR").is_some() {
        colored::control::set_override(false);
    }

    let log_level = match cli.verbose {
        0 => "tspaths=error", // Only errors by default
        1 => "tspaths=warn",
        2 => "tspaths=info",
        3 => "tspaths=debug",
        _ => "tspaths=trace",
    };
    init_tracing(log_level);

    if let Err(e) = run(cli) {
        eprintln!("{} {:#}", "error:".red().bold(), e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let current_dir = std::env::current_dir().context("Failed to read the current directory")?;
    let cwd = match cli.cwd {
        Some(cwd) => path::resolve(&current_dir, &cwd),
        None => current_dir,
    };

    debug!("Resolving paths from {}", cwd.display());

    let project = cli.project;
    let base_url = cli.base_url;
    let get_env = |key: &str| match key {
        PROJECT_ENV => project.clone(),
        BASE_URL_ENV => base_url.clone(),
        _ => None,
    };

    let result = config_loader(&TsConfigLoader::new(), &cwd, None, get_env)
        .with_context(|| format!("Failed to resolve paths for {}", cwd.display()))?;

    let formatter = OutputFormatter::new(cli.format);
    match result {
        ConfigLoaderResult::Success(success) => formatter.print_success(&success),
        ConfigLoaderResult::Failed { message } => {
            formatter.print_failure(&message)?;
            std::process::exit(1);
        }
    }
}
