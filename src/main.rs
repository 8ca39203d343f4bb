use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use pocket_plant::config::{default_config_path, AppConfig};
use pocket_plant::{session, PlantStore};

#[derive(Parser)]
#[command(name = "pocket-plant")]
#[command(about = "Track your plants and their watering schedules")]
struct Cli {
    /// Path to the configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start an interactive plant session (default)
    Session,
    /// Write the current configuration (defaults if none exists)
    InitConfig {
        /// Overwrite an existing file
        #[arg(short, long)]
        force: bool,
    },
}

/// Initialize tracing with output to stderr so the session owns stdout
fn init_tracing(default_filter: &str) {
    let filter = tracing_subscriber::EnvFilter::new(
        std::env::var("RUST_LOG").unwrap_or_else(|_| default_filter.to_string()),
    );

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config_path = match cli.config {
        Some(path) => path,
        None => default_config_path()?,
    };
    let (config, load_error) = AppConfig::load_or_default(&config_path);
    init_tracing(&config.log_filter);
    if let Some(e) = load_error {
        tracing::warn!(
            "Failed to load config from {}, using defaults: {:#}",
            config_path.display(),
            e
        );
    }

    match cli.command.unwrap_or(Commands::Session) {
        Commands::Session => {
            let store = PlantStore::with_catalog(config.catalog());
            session::run_stdio(store).await?;
        }
        Commands::InitConfig { force } => {
            if config_path.exists() && !force {
                anyhow::bail!(
                    "{} already exists (use --force to overwrite)",
                    config_path.display()
                );
            }
            config.save(&config_path)?;
            tracing::info!("Wrote configuration to {}", config_path.display());
        }
    }

    Ok(())
}
