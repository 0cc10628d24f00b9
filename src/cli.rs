use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};

use crate::app::{router, AppState};
use crate::config::AppConfig;
use crate::database::{connect_pool, PgStore};

#[derive(Parser)]
#[command(name = "nitelife-api")]
#[command(about = "Nitelife API - accounts, events and tickets")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Run the HTTP server (default)")]
    Serve {
        #[arg(long, help = "Listen port, overriding NITELIFE_API_PORT")]
        port: Option<u16>,
    },

    #[command(about = "Apply the database schema and exit")]
    InitDb,
}

pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let mut config = AppConfig::from_env().context("invalid configuration")?;
    tracing::info!("Starting Nitelife API in {:?} mode", config.environment);

    let pool = connect_pool(&config).await.context("failed to connect to database")?;
    let store = PgStore::new(pool);
    store.init().await.context("failed to apply database schema")?;

    match cli.command.unwrap_or(Commands::Serve { port: None }) {
        Commands::InitDb => Ok(()),
        Commands::Serve { port } => {
            if let Some(port) = port {
                config.api.port = port;
            }
            serve(config, store).await
        }
    }
}

async fn serve(config: AppConfig, store: PgStore) -> anyhow::Result<()> {
    let bind_addr = format!("0.0.0.0:{}", config.api.port);
    let state = AppState::new(config, Arc::new(store)).context("token signing is not available")?;

    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;

    tracing::info!("Nitelife API listening on http://{}", bind_addr);
    axum::serve(listener, router(state)).await.context("server error")?;
    Ok(())
}
