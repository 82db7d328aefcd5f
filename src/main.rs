use clap::Parser;
use std::path::Path;

use trivia_api::config::AppConfig;
use trivia_api::{logging, startup};

const DEFAULT_CONFIG_PATH: &str = "config.yaml";

#[derive(Parser, Debug)]
#[command(name = "trivia-api")]
#[command(about = "A REST API for a trivia question bank")]
struct Args {
    /// Configuration file path (default: config.yaml)
    #[arg(short, long, default_value = DEFAULT_CONFIG_PATH)]
    config: String,

    /// Port to listen on (overrides config file)
    #[arg(short, long)]
    port: Option<u16>,

    /// Host to bind to (overrides config file)
    #[arg(long)]
    host: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    logging::init_tracing();

    // Zero-config mode when the default file is absent
    let mut app_config =
        if args.config == DEFAULT_CONFIG_PATH && !Path::new(DEFAULT_CONFIG_PATH).exists() {
            tracing::warn!("No config.yaml found, using in-memory SQLite defaults");
            AppConfig::default_config()
        } else {
            AppConfig::load_from_file(&args.config)
                .map_err(|e| format!("Failed to load configuration: {}", e))?
        };

    if let Some(port) = args.port {
        app_config.server.port = port;
    }
    if let Some(host) = args.host {
        app_config.server.host = host;
    }

    if let Some(database) = &app_config.backend.database {
        tracing::info!(
            server = %format!("{}:{}", app_config.server.host, app_config.server.port),
            database = %database.db_type,
            questions_per_page = app_config.pagination.questions_per_page,
            "Configuration loaded"
        );
    }

    startup::run(app_config).await?;

    Ok(())
}
