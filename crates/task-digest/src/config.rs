//! Run configuration.
//!
//! The environment is read once, at startup, into a [`Config`] or a
//! [`MoverConfig`]. Nothing else in the workspace reads environment
//! variables.

use std::fmt;
use std::path::PathBuf;

use notion::NotionConfig;

use crate::error::DigestError;

/// Notion integration token.
pub const ENV_NOTION_TOKEN: &str = "NOTION_TOKEN";

/// Database to query.
pub const ENV_NOTION_DATABASE_ID: &str = "NOTION_DATABASE_ID";

/// Slack incoming webhook URL.
pub const ENV_SLACK_WEBHOOK_URL: &str = "SLACK_WEBHOOK_URL";

/// Optional override of the Notion API base URL.
pub const ENV_NOTION_API_URL: &str = "NOTION_API_URL";

/// Optional path of the mover settings file.
pub const ENV_MOVER_SETTINGS: &str = "TASK_MOVER_SETTINGS";

/// Settings file used when [`ENV_MOVER_SETTINGS`] is unset.
pub const DEFAULT_MOVER_SETTINGS: &str = "setting.yml";

/// Keys the digest requires, in the order they are checked.
pub const REQUIRED_KEYS: [&str; 3] = [
    ENV_NOTION_TOKEN,
    ENV_NOTION_DATABASE_ID,
    ENV_SLACK_WEBHOOK_URL,
];

/// Keys the mover requires, in the order they are checked.
pub const MOVER_REQUIRED_KEYS: [&str; 2] = [ENV_NOTION_TOKEN, ENV_NOTION_DATABASE_ID];

/// Check that every digest key is present and non-empty.
///
/// # Errors
/// Returns [`DigestError::MissingConfiguration`] naming the first missing
/// key in [`REQUIRED_KEYS`] order.
pub fn validate<F>(lookup: F) -> Result<(), DigestError>
where
    F: Fn(&str) -> Option<String>,
{
    validate_keys(&lookup, &REQUIRED_KEYS)
}

fn validate_keys<F>(lookup: &F, keys: &[&'static str]) -> Result<(), DigestError>
where
    F: Fn(&str) -> Option<String>,
{
    for &key in keys {
        if non_empty(lookup, key).is_none() {
            return Err(DigestError::MissingConfiguration(key));
        }
    }
    Ok(())
}

fn notion_config<F>(lookup: &F) -> Result<NotionConfig, DigestError>
where
    F: Fn(&str) -> Option<String>,
{
    let required = |key: &'static str| {
        non_empty(lookup, key).ok_or(DigestError::MissingConfiguration(key))
    };

    let mut notion = NotionConfig::new(
        required(ENV_NOTION_TOKEN)?,
        required(ENV_NOTION_DATABASE_ID)?,
    );
    if let Some(api_url) = non_empty(lookup, ENV_NOTION_API_URL) {
        notion = notion.with_api_url(api_url);
    }
    Ok(notion)
}

/// Key lookup backed by the process environment.
#[must_use]
pub fn env_lookup(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

fn non_empty<F>(lookup: &F, key: &str) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key).filter(|value| !value.is_empty())
}

/// Validated configuration for one run.
#[derive(Clone)]
pub struct Config {
    /// Notion credentials and database
    pub notion: NotionConfig,
    /// Where digest messages are posted
    pub slack_webhook_url: String,
}

impl Config {
    /// Load configuration from an arbitrary key lookup.
    ///
    /// # Errors
    /// Returns [`DigestError::MissingConfiguration`] if a required key is
    /// missing or empty.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, DigestError>
    where
        F: Fn(&str) -> Option<String>,
    {
        validate(&lookup)?;

        Ok(Self {
            notion: notion_config(&lookup)?,
            slack_webhook_url: non_empty(&lookup, ENV_SLACK_WEBHOOK_URL)
                .ok_or(DigestError::MissingConfiguration(ENV_SLACK_WEBHOOK_URL))?,
        })
    }
}

/// Validated configuration for one mover run.
#[derive(Debug, Clone)]
pub struct MoverConfig {
    /// Notion credentials and database
    pub notion: NotionConfig,
    /// YAML file holding the move rule
    pub settings_path: PathBuf,
}

impl MoverConfig {
    /// Load mover configuration from an arbitrary key lookup.
    ///
    /// # Errors
    /// Returns [`DigestError::MissingConfiguration`] if a key in
    /// [`MOVER_REQUIRED_KEYS`] is missing or empty.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, DigestError>
    where
        F: Fn(&str) -> Option<String>,
    {
        validate_keys(&lookup, &MOVER_REQUIRED_KEYS)?;

        let settings_path = non_empty(&lookup, ENV_MOVER_SETTINGS)
            .unwrap_or_else(|| DEFAULT_MOVER_SETTINGS.to_string());

        Ok(Self {
            notion: notion_config(&lookup)?,
            settings_path: PathBuf::from(settings_path),
        })
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("notion", &self.notion)
            .field("slack_webhook_url", &"<redacted>")
            .finish()
    }
}
