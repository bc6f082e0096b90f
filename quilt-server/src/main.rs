use quilt_server::{QuiltConfig, QuiltServer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn print_help() {
    eprintln!(
        r#"Quilt Server - realtime collaborative quilt board

USAGE:
    quilt-server [OPTIONS]

OPTIONS:
    --config <PATH>     Load configuration from JSON file
    --help              Print this help message

ENVIRONMENT VARIABLES:
    HOST                Server host (default: 0.0.0.0)
    PORT                Server port (default: 5000)
    DATABASE_PATH       SQLite database file (default: patches.db)
    COHERE_API_KEY      Reflection provider key (optional)
    COHERE_MODEL        Reflection provider model
    RUST_LOG            Log level filter

EXAMPLES:
    # Run with defaults
    quilt-server

    # Run with config file
    quilt-server --config quilt.json

    # Run with custom port
    PORT=9000 quilt-server
"#
    );
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "quilt_server=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Parse command line arguments
    let args: Vec<String> = std::env::args().collect();
    let mut config_path: Option<String> = None;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--help" | "-h" => {
                print_help();
                return Ok(());
            }
            "--config" | "-c" => {
                i += 1;
                if i >= args.len() {
                    eprintln!("Error: --config requires a path argument");
                    std::process::exit(1);
                }
                config_path = Some(args[i].clone());
            }
            arg => {
                eprintln!("Unknown argument: {}", arg);
                print_help();
                std::process::exit(1);
            }
        }
        i += 1;
    }

    let mut config = if let Some(path) = config_path {
        tracing::info!("Loading configuration from: {}", path);
        QuiltConfig::from_file(&path)?
    } else {
        tracing::info!("Using default configuration");
        QuiltConfig::default()
    };
    config.apply_env()?;

    let server = QuiltServer::from_config(config)?;

    tracing::info!("Starting Quilt Server");
    tracing::info!(
        "WebSocket: ws://{}:{}/ws",
        server.config.server.host,
        server.config.server.port
    );
    tracing::info!("Available endpoints:");
    tracing::info!("  GET  /patches");
    tracing::info!("  POST /reflection");
    tracing::info!("  GET  /health");

    server.run().await?;
    Ok(())
}
