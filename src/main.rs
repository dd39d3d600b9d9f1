use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use ranked_ladder::api::state::AppState;
use ranked_ladder::config::AppConfig;
use ranked_ladder::fetch::{RiotApi, RiotClient};
use ranked_ladder::roster::{refresh_leaderboard, register_player, RegisterRequest};
use ranked_ladder::storage::RosterStore;

#[derive(Parser)]
#[command(name = "ranked-ladder")]
#[command(about = "Ranked solo-queue leaderboard for a roster of tracked players")]
#[command(version)]
struct Cli {
    /// Path to configuration file
    #[arg(long, default_value = "./config.toml")]
    config: PathBuf,

    /// Roster file path (overrides config)
    #[arg(long)]
    data_file: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,

    /// Output logs as JSON
    #[arg(long)]
    json_logs: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the API server
    Serve {
        /// Bind address
        #[arg(long)]
        host: Option<String>,

        /// Port number
        #[arg(long)]
        port: Option<u16>,
    },

    /// Refresh the leaderboard once and print it
    Refresh,

    /// Start tracking a player by Riot ID
    AddPlayer {
        /// Riot ID game name
        #[arg(long)]
        summoner: String,

        /// Riot ID tag line (without '#')
        #[arg(long)]
        tag_line: String,

        /// Platform region, e.g. euw1
        #[arg(long)]
        region: String,
    },
}

fn init_tracing(level: &str, json: bool) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    let registry = tracing_subscriber::registry().with(filter);
    if json {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}

fn build_client(config: &AppConfig) -> Result<Arc<dyn RiotApi>> {
    let api_key = config.riot.api_key().unwrap_or_else(|| {
        tracing::warn!(
            "{} is not set; Riot API requests will be rejected",
            config.riot.api_key_env
        );
        String::new()
    });
    let client = RiotClient::new(config.riot.fetcher_config(api_key))
        .context("Failed to build Riot API client")?;
    Ok(Arc::new(client))
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = AppConfig::load_or_default(&cli.config)
        .with_context(|| format!("Failed to load config from {:?}", cli.config))?;
    if let Some(data_file) = cli.data_file {
        config.data_file = data_file;
    }
    if let Some(level) = cli.log_level {
        config.log_level = level;
    }

    init_tracing(&config.log_level, cli.json_logs);
    tracing::info!("Starting ranked-ladder v{}", env!("CARGO_PKG_VERSION"));

    let store = Arc::new(RosterStore::new(config.data_file.clone()));
    let riot = build_client(&config)?;

    match cli.command {
        Commands::Serve { host, port } => {
            if let Some(host) = host {
                config.server.host = host;
            }
            if let Some(port) = port {
                config.server.port = port;
            }
            config.validate()?;

            let state = AppState { store, riot };
            let app = ranked_ladder::api::router_with_cors(state, &config.server.cors_origin);
            let addr = config.server.bind_addr();
            let listener = tokio::net::TcpListener::bind(&addr)
                .await
                .with_context(|| format!("Failed to bind {}", addr))?;
            tracing::info!("Listening on http://{}", addr);
            axum::serve(listener, app).await?;
        }
        Commands::Refresh => {
            let report = refresh_leaderboard(&store, riot.as_ref()).await?;
            println!("{}", serde_json::to_string_pretty(&report.players)?);
        }
        Commands::AddPlayer {
            summoner,
            tag_line,
            region,
        } => {
            let request = RegisterRequest::new(summoner, tag_line, region);
            let player = register_player(&store, riot.as_ref(), &request).await?;
            println!("Added {} ({}) on {}", player.riot_id(), player.puuid, player.region);
        }
    }

    Ok(())
}
