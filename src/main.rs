use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use nextplus::project::OpenPreference;
use nextplus::settings::SettingsStore;
use nextplus::ui::{ConsoleNotifier, Notifier};

mod cmd;

/// Environment variable holding a `tracing` filter directive.
const LOG_ENV: &str = "NEXTPLUS_LOG";

#[derive(Parser)]
#[command(name = "nextplus")]
#[command(version, about = "Create Next.js projects with a UI library ready to go")]
pub struct Cli {
    /// Show debug logs on stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to settings.toml (defaults to $NEXTPLUS_CONFIG, then the user config dir)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create a new Next.js project
    New {
        /// Project name (prompted for when omitted)
        name: Option<String>,

        /// What to do with the project once it is created
        #[arg(long, value_enum)]
        open: Option<OpenPreference>,
    },
    /// Show, set or clear the default project location
    Location {
        #[command(subcommand)]
        command: Option<LocationCommands>,
    },
    /// View or validate settings
    Config {
        #[command(subcommand)]
        command: Option<ConfigCommands>,
    },
}

#[derive(Subcommand, Clone)]
pub enum LocationCommands {
    /// Print the current default location
    Show,
    /// Use an existing folder as the default location
    Set { path: PathBuf },
    /// Always ask where to create projects
    Clear,
}

#[derive(Subcommand, Clone)]
pub enum ConfigCommands {
    /// Show current settings
    Show {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
    /// Validate settings and show any warnings
    Validate,
    /// Write a default settings.toml
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
    /// Print the settings file path
    Path,
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .with(filter)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let store = SettingsStore::locate(cli.config.as_deref())?;
    tracing::debug!(path = %store.path().display(), "settings location");

    match &cli.command {
        Commands::New { name, open } => {
            if let Err(e) = cmd::cmd_new(&store, name.clone(), *open).await {
                ConsoleNotifier.error(&format!("Failed to create project: {:#}", e));
                std::process::exit(1);
            }
        }
        Commands::Location { command } => cmd::cmd_location(&store, command.clone())?,
        Commands::Config { command } => cmd::cmd_config(&store, command.clone())?,
    }

    Ok(())
}
