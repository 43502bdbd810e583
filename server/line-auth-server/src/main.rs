use anyhow::Context;
use clap::Parser;
use colored::*;
use tracing::{info, warn};

use error_common::{log_error, ServiceError};
use line_auth_server::{create_app, AppConfig, AppState, Args};
use logger_redacted::{init_tracing, LoggerConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // A missing .env is fine; the variables may come from the environment
    let _ = dotenvy::dotenv();

    let args = Args::parse();

    init_tracing(&LoggerConfig::for_environment(&args.app_env, args.verbose))?;

    info!("🔐 {}", "Starting LINE auth server".bright_cyan());
    info!("📋 Version: {}", env!("CARGO_PKG_VERSION").bright_white());

    let config = AppConfig::from_args(args).context("Invalid configuration")?;
    let bind_address = config.bind_address();

    info!(
        environment = %config.environment,
        account_store = %config.supabase_url,
        email_domain = %config.account_email_domain,
        timeout_secs = config.upstream_timeout.as_secs(),
        "Configuration loaded"
    );
    if config.cors_allowed_origins.is_empty() {
        warn!("CORS_ALLOWED_ORIGINS is empty, accepting requests from any origin");
    }

    let state = AppState::new(config).context("Failed to initialise upstream clients")?;

    if let Err(e) = serve(state, &bind_address).await {
        log_error("http server", &e);
        return Err(e.into());
    }

    info!("👋 {}", "Server stopped".bright_yellow());
    Ok(())
}

async fn serve(state: AppState, bind_address: &str) -> error_common::Result<()> {
    let app = create_app(state);

    let listener = tokio::net::TcpListener::bind(bind_address)
        .await
        .map_err(|e| ServiceError::NetworkError(format!("Failed to bind to {}: {}", bind_address, e)))?;

    info!("🚀 {}", format!("LINE auth server running on http://{}", bind_address).bright_green());
    info!("📋 {}", format!("Health check available at: http://{}/health", bind_address).bright_blue());
    info!(
        "🔐 {}",
        format!("Login endpoint: http://{}/api/v1/auth/line/callback", bind_address).bright_blue()
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| ServiceError::ServerError(format!("HTTP server error: {}", e)))
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!("Failed to listen for Ctrl-C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                warn!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received, draining connections");
}
