mod cmd;
mod output;
mod root;

use clap::{Parser, Subcommand};
use cmd::{config::ConfigSubcommand, import::ImportSubcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "fleet",
    about = "Ambulance fleet readiness: workflow gate, alerts and Ampulario stock",
    version,
    propagate_version = true
)]
struct Cli {
    /// Fleet root (default: auto-detect from .fleet/)
    #[arg(long, global = true, env = "FLEET_ROOT")]
    root: Option<PathBuf>,

    /// Output as JSON
    #[arg(long, global = true, short = 'j')]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a default .fleet/config.yaml
    Init,

    /// Run the JSON API server
    Serve {
        /// Port to listen on (default: server.port from config, 0 = OS-assigned)
        #[arg(long)]
        port: Option<u16>,

        /// Start with an empty store even if demo data is enabled
        #[arg(long)]
        empty: bool,
    },

    /// Print active alerts for the demo fleet
    Alerts,

    /// Work with Ampulario CSV imports
    Import {
        #[command(subcommand)]
        subcommand: ImportSubcommand,
    },

    /// Show or validate the configuration
    Config {
        #[command(subcommand)]
        subcommand: ConfigSubcommand,
    },
}

fn main() {
    let cli = Cli::parse();

    let default_level = match &cli.command {
        Commands::Serve { .. } => tracing::Level::INFO,
        _ => tracing::Level::WARN,
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(default_level.into()),
        )
        .with_target(false)
        .init();

    let root = root::resolve_root(cli.root.as_deref());

    let result = match cli.command {
        Commands::Init => cmd::init::run(&root),
        Commands::Serve { port, empty } => cmd::serve::run(&root, port, empty),
        Commands::Alerts => cmd::alerts::run(&root, cli.json),
        Commands::Import { subcommand } => cmd::import::run(&root, subcommand, cli.json),
        Commands::Config { subcommand } => cmd::config::run(&root, subcommand, cli.json),
    };

    if let Err(e) = result {
        // Print the full error chain (anyhow's alternate Display)
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}
