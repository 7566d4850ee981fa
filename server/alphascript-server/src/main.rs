use clap::Parser;
use colored::*;
use tracing::{info, warn};

use alphascript_server::{create_app, AlphaScriptServer};
use config_engine::ConfigEngine;
use error_common::{log_error, AppError, Result};
use logger_redacted::{init_tracing, LogFormat};

/// AlphaScript Engine HTTP Server
#[derive(Parser, Debug)]
#[command(name = "alphascript-server")]
#[command(about = "Clinical report generation HTTP API server")]
struct Args {
    /// Server bind address (overrides the configuration file)
    #[arg(long, env = "ALPHASCRIPT_HOST")]
    host: Option<String>,

    /// Server port (overrides the configuration file)
    #[arg(short, long, env = "ALPHASCRIPT_PORT")]
    port: Option<u16>,

    /// Configuration file path (YAML, TOML or JSON)
    #[arg(short, long)]
    config: Option<String>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let mut config = ConfigEngine::load(args.config.as_deref())
        .map_err(|e| AppError::ConfigError(e.to_string()))?;
    if let Some(host) = args.host {
        config.server.host = host;
    }
    if let Some(port) = args.port {
        config.server.port = port;
    }
    if args.verbose {
        config.logging = config.logging.verbose();
    }

    init_tracing(&config.logging).map_err(|e| AppError::LoggingError(e.to_string()))?;

    let bind_address = config.server.bind_address();
    if config.logging.format == LogFormat::Pretty {
        info!("🩺 {}", "Starting AlphaScript Engine HTTP Server".bright_cyan());
        info!("📋 Version: {}", env!("CARGO_PKG_VERSION").bright_white());
        info!("🌐 Bind address: {}", bind_address.bright_yellow());
    } else {
        info!(version = env!("CARGO_PKG_VERSION"), %bind_address, "Starting AlphaScript Engine HTTP Server");
    }

    if config.auth.tokens.is_empty() {
        warn!("No auth.tokens configured; every /api/v1 request will be rejected");
    }

    let server = AlphaScriptServer::new(config)
        .map_err(|e| AppError::InternalError(format!("Server init failed: {}", e)))?;
    let app = create_app(server);

    let listener = tokio::net::TcpListener::bind(&bind_address)
        .await
        .map_err(|e| AppError::NetworkError(format!("Failed to bind to {}: {}", bind_address, e)))?;

    info!("🚀 {}", format!("AlphaScript server running on http://{}", bind_address).bright_green());
    info!("📋 {}", format!("Health check available at: http://{}/health", bind_address).bright_blue());
    info!("📋 {}", format!("API v1 available at: http://{}/api/v1", bind_address).bright_blue());

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| {
            let err = AppError::ServerError(format!("HTTP server error: {}", e));
            log_error("serve", &err);
            err
        })?;

    info!("AlphaScript server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
