//! Folio CLI
//!
//! Preview page animations headlessly and manage site configuration.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use folio_app::SiteConfig;

mod preview;

use preview::PreviewOptions;

#[derive(Parser)]
#[command(name = "folio")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Folio page animation tooling", long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Simulate a page load and a scripted scroll, printing animation events
    Preview {
        /// Site configuration file (TOML)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// File to persist the theme preference in
        #[arg(short, long)]
        store: Option<PathBuf>,

        /// Number of gallery categories on the demo page
        #[arg(long, default_value = "3")]
        categories: usize,

        /// Gallery items per category
        #[arg(long, default_value = "4")]
        items: usize,

        /// Engine ticks per simulated second
        #[arg(long, default_value = "60")]
        fps: u32,
    },

    /// Print the effective configuration as TOML
    Config {
        /// Site configuration file (TOML)
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// Validate a configuration file
    Check {
        /// Site configuration file (TOML)
        #[arg(short, long)]
        config: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging; RUST_LOG wins over the default level
    let default = if cli.verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    match cli.command {
        Commands::Preview {
            config,
            store,
            categories,
            items,
            fps,
        } => preview::run(PreviewOptions {
            config: load_config(config.as_deref())?,
            store,
            categories,
            items,
            fps,
        }),

        Commands::Config { config } => cmd_config(config.as_deref()),

        Commands::Check { config } => cmd_check(&config),
    }
}

fn load_config(path: Option<&Path>) -> Result<SiteConfig> {
    match path {
        Some(path) => {
            let config = SiteConfig::load(path)
                .with_context(|| format!("Failed to load configuration from {}", path.display()))?;
            info!("Loaded configuration from {}", path.display());
            Ok(config)
        }
        None => Ok(SiteConfig::default()),
    }
}

fn cmd_config(path: Option<&Path>) -> Result<()> {
    let config = load_config(path)?;
    let toml = config
        .to_toml()
        .context("Failed to serialize configuration")?;
    print!("{toml}");
    Ok(())
}

fn cmd_check(path: &Path) -> Result<()> {
    load_config(Some(path))?;
    println!("{}: configuration is valid", path.display());
    Ok(())
}
