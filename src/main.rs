//! tenki CLI

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tenki::api::AppState;
use tenki::config::LoggingConfig;
use tenki::{RandomSelector, TemplateSelector, TenkiConfig, WeatherApiClient, search, web};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// tenki CLI
#[derive(Parser)]
#[command(name = "tenki")]
#[command(author, version, about = "City weather lookup with a shareable impression summary", long_about = None)]
struct Cli {
    /// Path to a TOML config file
    #[arg(short, long, global = true, env = "TENKI_CONFIG")]
    config: Option<PathBuf>,

    /// Log at debug level
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Look up current weather for a city
    Weather {
        /// City name
        #[arg(short, long)]
        location: String,

        /// Print the card as JSON
        #[arg(long, conflicts_with = "impression_only")]
        json: bool,

        /// Print only the impression sentence
        #[arg(long)]
        impression_only: bool,

        /// Seed for template selection
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Serve the browser widget and JSON API
    Serve {
        /// Port to listen on (overrides config)
        #[arg(short, long)]
        port: Option<u16>,
    },
}

fn init_tracing(logging: &LoggingConfig, verbose: bool) {
    let level = if verbose { "debug" } else { logging.level.as_str() };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("tenki={level},warn")));

    let registry = tracing_subscriber::registry().with(filter);
    if logging.format == "json" {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = TenkiConfig::load_from_path(cli.config.clone())
        .context("Failed to load configuration")?;
    init_tracing(&config.logging, cli.verbose);

    match cli.command {
        Commands::Weather {
            location,
            json,
            impression_only,
            seed,
        } => {
            let client = WeatherApiClient::new(config.weather.clone())?;
            let outcome = match search(&client, &client, &location).await {
                Ok(outcome) => outcome,
                Err(e) => {
                    tracing::debug!("Search failed: {:?}", e);
                    anyhow::bail!("{}", e.user_message());
                }
            };

            let mut selector: Box<dyn TemplateSelector> = match seed {
                Some(seed) => Box::new(RandomSelector::seeded(seed)),
                None => Box::new(RandomSelector::new()),
            };
            let card = outcome.render(selector.as_mut());

            if json {
                println!("{}", serde_json::to_string_pretty(&card)?);
            } else if impression_only {
                println!("{}", card.impression);
            } else {
                println!("{}", card.to_text());
            }
        }
        Commands::Serve { port } => {
            let mut server = config.server.clone();
            if let Some(port) = port {
                server.port = port;
            }
            let client = WeatherApiClient::new(config.weather.clone())?;
            web::run(&server, AppState::from_client(client)).await?;
        }
    }

    Ok(())
}
