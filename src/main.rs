use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use axum::http::HeaderValue;
use clap::{Parser, Subcommand};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tokio::sync::Mutex;
use tower_http::cors::CorsLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use trainer_registry::api::build_router;
use trainer_registry::api::state::AppState;
use trainer_registry::catalog::{CatalogClient, PokeApiClient};
use trainer_registry::config::AppConfig;
use trainer_registry::storage::{JsonlStore, StorageConfig};

#[derive(Parser)]
#[command(name = "trainer-registry")]
#[command(about = "Trainers, their pokemon and items, with stat battles")]
#[command(version)]
struct Cli {
    /// Path to configuration file
    #[arg(long, default_value = "./config.toml")]
    config: PathBuf,

    /// Data directory path (overrides the config file)
    #[arg(long)]
    data_dir: Option<PathBuf>,

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

        /// Seed the random team picker (for reproducible runs)
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Look up a pokemon in the remote catalog
    Lookup {
        /// Catalog id (e.g. 25 for pikachu)
        api_id: u32,
    },
}

/// Load the config file if present, otherwise fall back to defaults.
fn load_config(cli: &Cli) -> Result<AppConfig> {
    let mut config = if cli.config.exists() {
        AppConfig::from_file(&cli.config)
            .with_context(|| format!("Failed to load {}", cli.config.display()))?
    } else {
        AppConfig::default()
    };

    if let Some(ref data_dir) = cli.data_dir {
        config.data_dir = data_dir.clone();
    }
    if let Some(ref log_level) = cli.log_level {
        config.log_level = log_level.clone();
    }

    Ok(config)
}

fn init_tracing(log_level: &str, json_logs: bool) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level));

    let registry = tracing_subscriber::registry().with(filter);
    if json_logs {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}

fn cors_layer(origin: &str) -> Result<CorsLayer> {
    if origin == "*" {
        return Ok(CorsLayer::permissive());
    }
    let origin: HeaderValue = origin
        .parse()
        .with_context(|| format!("Invalid CORS origin: {}", origin))?;
    Ok(CorsLayer::permissive().allow_origin(origin))
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = load_config(&cli)?;

    init_tracing(&config.log_level, cli.json_logs);
    tracing::info!("Starting trainer-registry v{}", env!("CARGO_PKG_VERSION"));

    let catalog = PokeApiClient::new(
        &config.catalog.base_url,
        Duration::from_secs(config.catalog.timeout_seconds),
    )?;

    match cli.command {
        Commands::Serve { host, port, seed } => {
            let host = host.unwrap_or(config.server.host.clone());
            let port = port.unwrap_or(config.server.port);

            let storage = StorageConfig::new(config.data_dir.clone());
            tracing::info!("Using data directory {:?}", storage.data_dir);

            let rng = match seed {
                Some(seed) => StdRng::seed_from_u64(seed),
                None => StdRng::from_os_rng(),
            };

            let state = AppState {
                store: Arc::new(JsonlStore::new(&storage)),
                catalog: Arc::new(catalog),
                rng: Arc::new(Mutex::new(rng)),
                sample_size: config.sampling.count,
            };

            let app = build_router(state).layer(cors_layer(&config.server.cors_origin)?);
            let addr = format!("{}:{}", host, port);
            let listener = tokio::net::TcpListener::bind(&addr).await?;
            tracing::info!("Listening on http://{}", addr);
            axum::serve(listener, app)
                .with_graceful_shutdown(async {
                    let _ = tokio::signal::ctrl_c().await;
                    tracing::info!("Shutting down");
                })
                .await?;
        }
        Commands::Lookup { api_id } => {
            let record = catalog.fetch_record(api_id).await?;
            println!("\n=== #{} {} ===", api_id, record.name);
            for stat in record.stat_list() {
                println!("{:<18} {:>4}", stat.name, stat.value);
            }
        }
    }

    Ok(())
}
