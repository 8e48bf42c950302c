use clap::Parser;
use momentum_tracker::cli::{self, Cli, Commands};
use momentum_tracker::config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let config = Config::load(&cli.config).unwrap_or_else(|e| {
        eprintln!("Warning: Could not load config from {}: {}", cli.config, e);
        eprintln!("Using default configuration");
        toml::from_str(include_str!("../config.toml.example")).unwrap_or_default()
    });

    // Initialize telemetry
    momentum_tracker::telemetry::init_telemetry(&config.telemetry)?;

    match cli.command {
        Commands::Scan(args) => {
            tracing::info!("Running single scan");
            args.execute(&config).await?;
        }
        Commands::Replay(args) => {
            tracing::info!("Starting capture replay");
            args.execute(&config).await?;
        }
        Commands::Watch(args) => {
            tracing::info!("Starting continuous monitoring");
            args.execute(&config).await?;
        }
        Commands::Config => cli::show_config(&config)?,
    }

    Ok(())
}
