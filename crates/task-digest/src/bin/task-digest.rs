//! task-digest - post tasks completed in the last 30 days to Slack.
//!
//! Meant to be run on a schedule (cron, CI). It exits non-zero on any error.
//!
//! # Environment Variables
//!
//! - `NOTION_TOKEN` - Notion integration token (required)
//! - `NOTION_DATABASE_ID` - database to query (required)
//! - `SLACK_WEBHOOK_URL` - Slack incoming webhook (required)
//! - `NOTION_API_URL` - Notion API base URL (optional)
//! - `RUST_LOG` - log filter (default `info`)

use anyhow::{Context, Result};
use task_digest::config::env_lookup;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let count = task_digest::run_from_lookup(env_lookup)
        .await
        .context("Task digest failed")?;

    info!(task_count = count, "Task digest delivered");
    Ok(())
}
