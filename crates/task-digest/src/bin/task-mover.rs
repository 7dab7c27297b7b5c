//! task-mover - move Notion tasks left untouched for too long.
//!
//! Meant to be run on a schedule (cron, CI). It exits non-zero on any error,
//! including a single failed page update.
//!
//! # Environment Variables
//!
//! - `NOTION_TOKEN` - Notion integration token (required)
//! - `NOTION_DATABASE_ID` - database to query (required)
//! - `TASK_MOVER_SETTINGS` - path of the move rule (default `setting.yml`)
//! - `NOTION_API_URL` - Notion API base URL (optional)
//! - `RUST_LOG` - log filter (default `info`)

use anyhow::{Context, Result};
use task_digest::config::env_lookup;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let moved = task_digest::mover::run_from_lookup(env_lookup)
        .await
        .context("Task mover failed")?;

    info!(moved, "Task mover finished");
    Ok(())
}
