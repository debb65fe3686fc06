//! Vitrine CLI - builds a gallery of documentation-site themes.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, EnvFilter};

mod commands;
mod config;

#[derive(Parser)]
#[command(name = "vitrine")]
#[command(about = "Build a gallery showcasing documentation-site themes")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to gallery.toml config file
    #[arg(short, long, default_value = "gallery.toml")]
    config: PathBuf,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize a gallery project in the current directory
    Init {
        /// Overwrite existing files
        #[arg(short, long)]
        yes: bool,
    },

    /// Fetch the catalog and print the resolved theme list
    Themes,

    /// Build the full gallery: prepare, install, build, screenshot, compose
    Build {
        /// Don't install theme dependencies
        #[arg(short = 'D', long)]
        no_deps: bool,

        /// Don't rebuild each theme site
        #[arg(short = 'T', long)]
        no_themes: bool,

        /// Don't take screenshots of each theme
        #[arg(short = 'S', long)]
        no_shots: bool,

        /// Worker pool size (defaults to available cores)
        #[arg(short, long)]
        jobs: Option<usize>,

        /// Read the catalog from a local file instead of fetching it
        #[arg(long)]
        catalog_file: Option<PathBuf>,
    },

    /// Preview the built gallery
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value = "8000")]
        port: u16,

        /// Directory to serve
        #[arg(short, long, default_value = "site")]
        dir: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    fmt().with_env_filter(filter).with_target(false).init();

    // Execute command
    match cli.command {
        Commands::Init { yes } => {
            commands::init::run(yes).await?;
        }
        Commands::Themes => {
            commands::themes::run(&cli.config).await?;
        }
        Commands::Build {
            no_deps,
            no_themes,
            no_shots,
            jobs,
            catalog_file,
        } => {
            let opts = commands::build::BuildOpts {
                no_deps,
                no_themes,
                no_shots,
                jobs,
                catalog_file,
            };
            commands::build::run(&cli.config, opts).await?;
        }
        Commands::Serve { port, dir } => {
            commands::serve::run(port, dir).await?;
        }
    }

    Ok(())
}
