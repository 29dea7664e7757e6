use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tokio::net::TcpListener;
use tracing::{info, warn};

use wenyantrans::config::{ApiKey, Config};
use wenyantrans::consts::{
    API_KEY_ENV, DEFAULT_CONFIG_PATH, DEFAULT_HOST, DEFAULT_PORT, DEFAULT_STATIC_DIR,
};
use wenyantrans::gateway::{self, AppState};
use wenyantrans::logging;
use wenyantrans::upstream::openrouter::OpenRouterClient;

#[derive(Parser)]
#[command(
    name = "wenyantrans",
    version,
    about = "Classical Chinese analysis, relayed to an LLM."
)]
struct Cli {
    /// JSON config file overlaid on the built-in defaults
    #[arg(short, long, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    /// Address to bind
    #[arg(long, default_value = DEFAULT_HOST)]
    host: String,

    /// Port to listen on
    #[arg(short, long, default_value_t = DEFAULT_PORT)]
    port: u16,

    /// Directory holding index.html and its assets
    #[arg(short, long, default_value = DEFAULT_STATIC_DIR)]
    static_dir: PathBuf,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    logging::init();
    let cli = Cli::parse();

    let config = Arc::new(Config::load(&cli.config)?);

    let api_key = ApiKey::from_env(API_KEY_ENV);
    if api_key.is_some() {
        info!("API key loaded from environment variable");
    } else {
        warn!(
            "Environment variable {} is not set or empty. Requests will fail until it is set and the server restarted.",
            API_KEY_ENV
        );
    }

    let upstream = Arc::new(OpenRouterClient::new(config.clone(), api_key));
    let state = AppState {
        config: config.clone(),
        upstream,
    };
    let app = gateway::build_router(state, &cli.static_dir);

    let addr = format!("{}:{}", cli.host, cli.port);
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;

    info!("Model: {}", config.model_name);
    info!("Endpoint: {}", config.api_endpoint);
    info!("Listening at: http://{}", listener.local_addr()?);

    gateway::serve(listener, app).await
}
