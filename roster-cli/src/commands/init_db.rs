//! Database initialization command
//!
//! Drops every roster table, recreates the schema, and optionally loads
//! the sample records.

use anyhow::{Context, Result};
use clap::Parser;

use roster_server::db::{create_pool, migrations, seed};

use crate::config::RosterConfig;

/// Arguments for the init-db command
#[derive(Parser, Debug)]
pub struct InitDbArgs {
    /// Database URL (overrides config file; default: sqlite://roster.db)
    #[arg(long, env = "ROSTER_DATABASE_URL")]
    pub database_url: Option<String>,

    /// Load the sample students, instructors, courses and grades
    #[arg(long)]
    pub seed: bool,
}

/// Reinitialize the database. Existing records are discarded.
pub async fn run_init_db(args: InitDbArgs, file_config: &RosterConfig) -> Result<()> {
    let database_url = file_config.database_url(args.database_url);

    let pool = create_pool(&database_url)
        .await
        .with_context(|| format!("Failed to open database {database_url}"))?;

    migrations::reset(&pool)
        .await
        .context("Failed to recreate schema")?;
    println!("Initialized schema at {database_url}");

    if args.seed {
        let summary = seed::seed(&pool)
            .await
            .context("Failed to load sample data")?;
        println!(
            "Seeded {} students, {} instructors, {} courses, {} enrollments",
            summary.students, summary.instructors, summary.courses, summary.enrollments
        );
    }

    pool.close().await;
    Ok(())
}
