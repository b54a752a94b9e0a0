//! sentiscope-web - CSV sentiment annotation service
//!
//! Serves an upload form, annotates uploaded CSV files with a sentiment label
//! and score per row, and renders the results.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tokio::signal;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use sentiscope_common::config::{ConfigOverrides, ServiceConfig};
use sentiscope_web::classifier::{InferenceClient, SentimentClassifier};
use sentiscope_web::{build_router, AppState};

/// Command-line arguments for sentiscope-web
#[derive(Parser, Debug)]
#[command(name = "sentiscope-web")]
#[command(about = "CSV sentiment annotation web service")]
#[command(version)]
struct Args {
    /// Path to the TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Folder for uploads and result files
    #[arg(short, long)]
    upload_folder: Option<PathBuf>,

    /// Address to bind to
    #[arg(long)]
    host: Option<String>,

    /// Port to listen on
    #[arg(short, long)]
    port: Option<u16>,

    /// Bearer token for the inference endpoint
    #[arg(long)]
    api_token: Option<String>,

    /// Development mode: debug-level logging
    #[arg(long)]
    debug: bool,
}

impl From<Args> for ConfigOverrides {
    fn from(args: Args) -> Self {
        Self {
            config_path: args.config,
            upload_folder: args.upload_folder,
            host: args.host,
            port: args.port,
            api_token: args.api_token,
            debug: args.debug,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let debug = args.debug;

    // Resolved before tracing init so the configured log level applies
    let config = ServiceConfig::load(args.into()).context("Failed to load configuration")?;

    let default_filter = if debug {
        "sentiscope_web=debug,sentiscope_common=debug,tower_http=debug".to_string()
    } else {
        format!(
            "sentiscope_web={level},sentiscope_common={level},tower_http=info",
            level = config.log_level
        )
    };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!(
        "Starting sentiscope-web v{} [{}] built {} ({})",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH"),
        env!("BUILD_TIMESTAMP"),
        env!("BUILD_PROFILE")
    );

    let state = {
        let classifier: Arc<dyn SentimentClassifier> = Arc::new(
            InferenceClient::new(&config.classifier)
                .context("Failed to build inference client")?,
        );
        info!("Sentiment model: {}", classifier.model_name());
        info!("Inference endpoint: {}", config.classifier.model_url());
        if config.classifier.api_token.is_none() {
            info!("No inference API token configured (anonymous requests)");
        }
        AppState::from_config(&config, classifier)
    };

    state
        .store
        .ensure_root()
        .await
        .with_context(|| format!("Failed to create upload folder {}", config.upload_folder.display()))?;
    info!("Upload folder: {}", config.upload_folder.display());

    let app = build_router(state);

    let addr = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;
    info!("sentiscope-web listening on http://{}", addr);
    info!("Health check: http://{}/health", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server shutdown complete");
    Ok(())
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, shutting down");
        },
        _ = terminate => {
            info!("Received terminate signal, shutting down");
        },
    }
}
