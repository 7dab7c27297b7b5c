//! Moves stale tasks from one select option to another.
//!
//! The rule lives in a YAML settings file:
//!
//! ```yaml
//! action:
//!   move:
//!     property:
//!       name: Status
//!       from: In review
//!       to: Archived
//!       expires_in_days: 14
//! ```
//!
//! Every page whose `name` select equals `from` and that has not been edited
//! for more than `expires_in_days` days is set to `to`.

use std::path::Path;

use chrono::{DateTime, Duration, Utc};
use notify::join::TaskGroup;
use notion::query::DatabaseQuery;
use notion::update::PageUpdate;
use notion::{NotionClient, NotionError};
use serde::Deserialize;
use tracing::{debug, info};

use crate::config::MoverConfig;
use crate::error::DigestError;

/// Top level of the settings file.
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub action: Action,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Action {
    #[serde(rename = "move")]
    pub move_action: MoveAction,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MoveAction {
    pub property: MoveRule,
}

/// Which select property to rewrite, and when.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct MoveRule {
    /// Select property name
    pub name: String,
    /// Option a page must currently hold
    pub from: String,
    /// Option a stale page is moved to
    pub to: String,
    /// Days without an edit after which a page is stale
    pub expires_in_days: u32,
}

impl Settings {
    /// Read and parse a settings file.
    ///
    /// # Errors
    /// Returns [`DigestError::SettingsRead`] if the file cannot be read, or
    /// [`DigestError::SettingsFormat`] if it is not a valid move rule.
    pub async fn load(path: &Path) -> Result<Self, DigestError> {
        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|source| DigestError::SettingsRead {
                path: path.to_path_buf(),
                source,
            })?;

        serde_yaml::from_str(&content).map_err(|source| DigestError::SettingsFormat {
            path: path.to_path_buf(),
            source,
        })
    }

    #[must_use]
    pub fn rule(&self) -> &MoveRule {
        &self.action.move_action.property
    }
}

impl MoveRule {
    /// Whether a page last edited at `last_edited_time` is stale at `now`.
    #[must_use]
    pub fn is_expired(&self, last_edited_time: DateTime<Utc>, now: DateTime<Utc>) -> bool {
        now > last_edited_time + Duration::days(i64::from(self.expires_in_days))
    }
}

/// Load configuration through `lookup`, then [`run`].
///
/// # Errors
/// Returns [`DigestError::MissingConfiguration`] or the first error of the
/// run.
pub async fn run_from_lookup<F>(lookup: F) -> Result<usize, DigestError>
where
    F: Fn(&str) -> Option<String>,
{
    let config = MoverConfig::from_lookup(lookup)?;
    run(&config).await
}

/// Run the mover once against the configured database.
///
/// Returns the number of pages moved.
///
/// # Errors
/// Returns a settings error before any request is made, or the first
/// [`DigestError`] of the run.
pub async fn run(config: &MoverConfig) -> Result<usize, DigestError> {
    let settings = Settings::load(&config.settings_path).await?;
    let rule = settings.rule();

    info!(
        database_id = %config.notion.database_id,
        property = %rule.name,
        from = %rule.from,
        to = %rule.to,
        expires_in_days = rule.expires_in_days,
        "Starting task mover"
    );

    let client = NotionClient::new(config.notion.clone());
    move_stale_at(&client, rule, Utc::now()).await
}

/// Move every page matching `rule` that is stale at `now`.
///
/// All updates run concurrently and are waited for even after one fails.
///
/// # Errors
/// Returns [`DigestError::SourceQuery`] or
/// [`DigestError::UnexpectedRecordShape`] before any update is sent, or
/// [`DigestError::PageUpdate`] with the first failed update.
pub async fn move_stale_at(
    client: &NotionClient,
    rule: &MoveRule,
    now: DateTime<Utc>,
) -> Result<usize, DigestError> {
    let pages = client
        .query_pages(&DatabaseQuery::select_equals(&rule.name, &rule.from))
        .await?;
    let matched = pages.len();

    let stale: Vec<_> = pages
        .into_iter()
        .filter(|page| rule.is_expired(page.last_edited_time, now))
        .collect();

    info!(matched, stale = stale.len(), "Queried candidate tasks");

    let update = PageUpdate::select(&rule.name, &rule.to);
    let mut updates: TaskGroup<'_, NotionError> = TaskGroup::new();
    for page in &stale {
        debug!(page_id = %page.id, "Moving task");
        updates.push(page.id.as_str(), client.update_page(&page.id, &update));
    }
    updates.join().await.map_err(DigestError::PageUpdate)?;

    info!(moved = stale.len(), to = %rule.to, "Stale tasks moved");
    Ok(stale.len())
}
