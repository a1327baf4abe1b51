//! Multi-Domain Platform UI (mdp-ui) - Main entry point
//!
//! HTTP front door for the platform: login/register, the record
//! repositories for all three domains, CSV staging, and the AI-assistant
//! proxy. Opens (and if necessary creates) the shared SQLite store at
//! startup and brings its schema up to date before serving.

use std::net::SocketAddr;

use anyhow::{Context, Result};
use clap::Parser;
use tokio::signal;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use mdp_ui::{api, assistant};

use mdp_common::auth::AuthService;
use mdp_common::config::{database_path, resolve_data_folder};
use mdp_common::db::init_database;

/// Command-line arguments for mdp-ui
#[derive(Parser, Debug)]
#[command(name = "mdp-ui")]
#[command(about = "HTTP front door for the Multi-Domain Platform")]
#[command(version)]
struct Args {
    /// Port to listen on
    #[arg(short, long, default_value = "5730", env = "MDP_UI_PORT")]
    port: u16,

    /// Folder holding the platform database
    #[arg(short, long, env = "MDP_DATA_FOLDER")]
    data_folder: Option<String>,

    /// Base URL of the AI-assistant backend (assistant endpoint answers 503 when unset)
    #[arg(long, env = "MDP_ASSISTANT_URL")]
    assistant_url: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "mdp_ui=debug,mdp_common=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();

    info!("Starting Multi-Domain Platform UI on port {}", args.port);

    let data_folder = resolve_data_folder(args.data_folder.as_deref(), "MDP_DATA_FOLDER")
        .context("Failed to resolve data folder")?;
    let db_path = database_path(&data_folder);
    info!("Database: {}", db_path.display());

    let db = init_database(&db_path)
        .await
        .context("Failed to initialize database")?;

    let assistant = args
        .assistant_url
        .map(assistant::AssistantClient::new)
        .transpose()
        .context("Failed to build assistant client")?;
    if assistant.is_none() {
        info!("No assistant backend configured; /api/v1/assistant will answer 503");
    }

    let app_state = api::AppState {
        auth: AuthService::new(db.clone()),
        db,
        assistant,
        port: args.port,
    };

    let app = api::create_router(app_state);

    let addr = SocketAddr::from(([0, 0, 0, 0], args.port));
    info!("Starting HTTP server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .context("Failed to bind to address")?;

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
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
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
