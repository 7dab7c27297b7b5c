//! The task entity handed to notifiers.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize, Serializer};

use crate::models::Page;

/// Property holding the task name.
pub const TITLE_PROPERTY: &str = "Name";

/// A completed task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// Task name, empty when the page has no usable title
    pub title: String,
    /// Canonical page URL
    pub url: String,
    /// When the page was last edited, written the way Notion sends it
    #[serde(serialize_with = "serialize_millis")]
    pub last_edited_time: DateTime<Utc>,
}

impl From<Page> for Task {
    fn from(page: Page) -> Self {
        Self {
            title: page.title(TITLE_PROPERTY),
            url: page.url,
            last_edited_time: page.last_edited_time,
        }
    }
}

fn serialize_millis<S>(time: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&time.to_rfc3339_opts(SecondsFormat::Millis, true))
}
