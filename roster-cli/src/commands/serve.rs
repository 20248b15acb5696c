//! HTTP server command
//!
//! Opens the database, makes sure the schema exists, and serves every
//! roster route until Ctrl+C or SIGTERM.

use anyhow::{Context, Result};
use clap::Parser;
use std::net::SocketAddr;

use roster_server::db::{create_pool, migrations};
use roster_server::http::{run_server, ServerConfig};

use crate::config::RosterConfig;

/// Arguments for the serve command
#[derive(Parser, Debug)]
pub struct ServeArgs {
    /// Address to bind to (default: 127.0.0.1:3030)
    #[arg(long, short = 'b', env = "ROSTER_BIND")]
    pub bind: Option<SocketAddr>,

    /// Allow permissive CORS (all origins) - use with caution
    #[arg(long)]
    pub cors_permissive: bool,

    /// Database URL (overrides config file; default: sqlite://roster.db)
    #[arg(long, env = "ROSTER_DATABASE_URL")]
    pub database_url: Option<String>,
}

/// Run the HTTP server
pub async fn run_serve(args: ServeArgs, file_config: &RosterConfig) -> Result<()> {
    let database_url = file_config.database_url(args.database_url);
    let config = ServerConfig {
        bind_addr: file_config.bind_addr(args.bind),
        cors_permissive: args.cors_permissive || file_config.cors_permissive.unwrap_or(false),
    };

    tracing::info!(%database_url, "Starting roster server on {}", config.bind_addr);

    let pool = create_pool(&database_url)
        .await
        .with_context(|| format!("Failed to open database {database_url}"))?;

    migrations::run(&pool)
        .await
        .context("Failed to create schema")?;

    // Blocks until shutdown
    run_server(pool, config).await.context("Server error")?;

    Ok(())
}
