use std::process;

use anyhow::Context;
use clap::{Arg, Command};
use common::config::{DEFAULT_CONFIG_PATH, Settings};

#[tokio::main]
async fn main() {
    let matches = Command::new("Cancellation Predictor")
        .version("1.0")
        .about("Serves the hotel reservation cancellation predictor")
        .subcommand(
            Command::new("serve")
                .about("Load the classifier artifact and serve the reservation form")
                .arg(
                    Arg::new("config")
                        .short('c')
                        .long("config")
                        .value_name("FILE")
                        .help("Sets a custom config file"),
                ),
        )
        .get_matches();

    match matches.subcommand() {
        Some(("serve", serve_matches)) => {
            let config_path = serve_matches
                .get_one::<String>("config")
                .map(|s| s.as_str())
                .unwrap_or(DEFAULT_CONFIG_PATH);

            if let Err(e) = serve(config_path).await {
                eprintln!("Predictor error: {:#}", e);
                process::exit(1);
            }
        }
        _ => {
            println!("No subcommand specified. Use --help for usage information.");
            process::exit(1);
        }
    }
}

async fn serve(config_path: &str) -> anyhow::Result<()> {
    let settings = Settings::new(config_path)
        .with_context(|| format!("failed to load configuration from {}", config_path))?;

    predictor::telemetry::init_tracing(&settings.logging)
        .map_err(|e| anyhow::anyhow!(e))
        .context("failed to initialise logging")?;

    tracing::info!(config = config_path, "Starting cancellation predictor");
    predictor::run_predictor_server(settings).await?;

    Ok(())
}
