//! Arbor CLI - build static sites from declared node trees.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, EnvFilter};

mod commands;

#[derive(Parser)]
#[command(name = "arbor")]
#[command(about = "Build static sites from declared node trees")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to the site manifest (.toml or .json)
    #[arg(short, long, default_value = "site.toml", global = true)]
    site: PathBuf,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Scaffold a starter site in the current directory
    Init {
        /// Overwrite existing files
        #[arg(short, long)]
        yes: bool,
    },

    /// Build the site
    Build {
        /// Output directory (defaults to the manifest's build.output)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Write HTML without pretty-printing
        #[arg(long)]
        no_format: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    fmt().with_env_filter(filter).with_target(false).init();

    match cli.command {
        Commands::Init { yes } => {
            commands::init::run(&cli.site, yes)?;
        }
        Commands::Build { output, no_format } => {
            let format = if no_format { Some(false) } else { None };
            commands::build::run(&cli.site, output, format)?;
        }
    }

    Ok(())
}
