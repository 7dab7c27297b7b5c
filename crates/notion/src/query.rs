//! Database query request body.
//!
//! API Documentation: <https://developers.notion.com/reference/post-database-query>

use chrono::{DateTime, Duration, SecondsFormat, Utc};
use serde::Serialize;

/// Property holding the task status.
pub const STATUS_PROPERTY: &str = "Status";

/// Status value that marks a task complete.
pub const DONE_STATUS: &str = "Done";

/// Property holding the last edit timestamp.
pub const LAST_EDITED_PROPERTY: &str = "Last edited time";

/// Size of the trailing window, in whole 24h days.
pub const LOOKBACK_DAYS: i64 = 30;

/// Body of `POST /databases/{id}/query`.
#[derive(Debug, Clone, Serialize)]
pub struct DatabaseQuery {
    pub filter: Filter,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub sorts: Vec<Sort>,
}

impl DatabaseQuery {
    /// Tasks marked done and edited after `now - 30 days`, newest first.
    #[must_use]
    pub fn completed_since(now: DateTime<Utc>) -> Self {
        let cutoff = now - Duration::days(LOOKBACK_DAYS);

        Self {
            filter: Filter::And {
                and: vec![
                    Filter::select(STATUS_PROPERTY, DONE_STATUS),
                    Filter::Property {
                        property: LAST_EDITED_PROPERTY.to_string(),
                        condition: Condition::Date(DateCondition {
                            after: cutoff.to_rfc3339_opts(SecondsFormat::Millis, true),
                        }),
                    },
                ],
            },
            sorts: vec![Sort {
                property: LAST_EDITED_PROPERTY.to_string(),
                direction: SortDirection::Descending,
            }],
        }
    }

    /// Pages whose select `property` is currently `value`, in API order.
    #[must_use]
    pub fn select_equals(property: &str, value: &str) -> Self {
        Self {
            filter: Filter::select(property, value),
            sorts: Vec::new(),
        }
    }
}

/// Compound or single-property filter.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum Filter {
    And {
        and: Vec<Filter>,
    },
    Property {
        property: String,
        #[serde(flatten)]
        condition: Condition,
    },
}

impl Filter {
    fn select(property: &str, value: &str) -> Self {
        Self::Property {
            property: property.to_string(),
            condition: Condition::Select(SelectCondition {
                equals: value.to_string(),
            }),
        }
    }
}

/// Condition applied to a single property, keyed by property type.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Condition {
    Select(SelectCondition),
    Date(DateCondition),
}

#[derive(Debug, Clone, Serialize)]
pub struct SelectCondition {
    pub equals: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct DateCondition {
    pub after: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct Sort {
    pub property: String,
    pub direction: SortDirection,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Descending,
}
