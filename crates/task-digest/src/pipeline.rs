//! The digest pipeline.

use notify::Notifier;
use notion::{NotionClient, TaskSource};
use tracing::info;

use crate::config::Config;
use crate::error::DigestError;

/// Load configuration through `lookup`, then [`run`].
///
/// Nothing is sent to Notion or Slack unless configuration is complete.
///
/// # Errors
/// Returns [`DigestError::MissingConfiguration`] or the first error of the
/// run.
pub async fn run_from_lookup<F>(lookup: F) -> Result<usize, DigestError>
where
    F: Fn(&str) -> Option<String>,
{
    let config = Config::from_lookup(lookup)?;
    run(&config).await
}

/// Run one digest against the configured Notion database and Slack webhook.
///
/// Returns the number of tasks delivered.
///
/// # Errors
/// Returns the first [`DigestError`] of the run.
pub async fn run(config: &Config) -> Result<usize, DigestError> {
    info!(
        database_id = %config.notion.database_id,
        api_url = %config.notion.api_url,
        "Starting task digest"
    );

    let source = NotionClient::new(config.notion.clone());
    let notifier = Notifier::slack(config.slack_webhook_url.clone());

    run_with(&source, &notifier).await
}

/// Fetch tasks from `source` and hand them to `notifier` unchanged.
///
/// # Errors
/// Returns [`DigestError::SourceQuery`] or
/// [`DigestError::UnexpectedRecordShape`] before anything is sent, or
/// [`DigestError::Delivery`] if either message fails.
pub async fn run_with(source: &dyn TaskSource, notifier: &Notifier) -> Result<usize, DigestError> {
    let tasks = source.fetch_tasks().await?;
    notifier.notify(&tasks).await?;
    Ok(tasks.len())
}
