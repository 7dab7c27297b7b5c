//! Notion API client implementation.
//!
//! API Documentation: <https://developers.notion.com/reference/intro>

use std::fmt;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::de::{DeserializeOwned, IgnoredAny};
use tracing::{debug, info, warn};

use crate::error::NotionError;
use crate::models::{ErrorBody, Page, QueryResponse, Record};
use crate::query::DatabaseQuery;
use crate::task::Task;
use crate::update::PageUpdate;

/// Base URL for the Notion API.
pub const DEFAULT_API_URL: &str = "https://api.notion.com/v1";

/// API version sent in the `Notion-Version` header.
pub const NOTION_VERSION: &str = "2022-06-28";

/// Source of completed tasks.
#[async_trait]
pub trait TaskSource: Send + Sync {
    /// Fetch tasks completed within the trailing window, newest first.
    async fn fetch_tasks(&self) -> Result<Vec<Task>, NotionError>;
}

/// Credentials and target database for the client.
#[derive(Clone)]
pub struct NotionConfig {
    pub token: String,
    pub database_id: String,
    pub api_url: String,
}

impl NotionConfig {
    /// Create a config against the public Notion API.
    #[must_use]
    pub fn new(token: impl Into<String>, database_id: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            database_id: database_id.into(),
            api_url: DEFAULT_API_URL.to_string(),
        }
    }

    /// Point the client at a different API base URL.
    #[must_use]
    pub fn with_api_url(mut self, api_url: impl Into<String>) -> Self {
        self.api_url = api_url.into();
        self
    }
}

impl fmt::Debug for NotionConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NotionConfig")
            .field("token", &"<redacted>")
            .field("database_id", &self.database_id)
            .field("api_url", &self.api_url)
            .finish()
    }
}

/// Notion database client.
#[derive(Debug, Clone)]
pub struct NotionClient {
    /// HTTP client.
    client: Client,
    config: NotionConfig,
}

impl NotionClient {
    /// Create a new client.
    #[must_use]
    pub fn new(config: NotionConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    /// Fetch completed tasks relative to an explicit `now`.
    ///
    /// Only the first page of results is read. The first partial record
    /// aborts the whole fetch.
    ///
    /// # Errors
    /// Returns any error from [`Self::query_pages`].
    pub async fn fetch_tasks_at(&self, now: DateTime<Utc>) -> Result<Vec<Task>, NotionError> {
        let tasks: Vec<Task> = self
            .query_pages(&DatabaseQuery::completed_since(now))
            .await?
            .into_iter()
            .map(Task::from)
            .collect();

        info!(count = tasks.len(), "Fetched completed tasks");
        Ok(tasks)
    }

    /// Run a query and return the full pages of its first result page.
    ///
    /// # Errors
    /// Returns [`NotionError::UnexpectedRecordShape`] for the first partial
    /// record, or any error from [`Self::query_database`].
    pub async fn query_pages(&self, query: &DatabaseQuery) -> Result<Vec<Page>, NotionError> {
        let response = self.query_database(query).await?;

        if response.has_more {
            warn!(
                next_cursor = ?response.next_cursor,
                "Query has more results than one page, only the first page is used"
            );
        }

        response
            .results
            .into_iter()
            .map(Record::into_page)
            .collect()
    }

    /// Run a database query and return the first page of results.
    ///
    /// # Errors
    /// Returns [`NotionError::Http`] on transport failure,
    /// [`NotionError::Api`] on a non-success status and
    /// [`NotionError::Serialization`] when the body cannot be decoded.
    pub async fn query_database(
        &self,
        query: &DatabaseQuery,
    ) -> Result<QueryResponse, NotionError> {
        let url = format!(
            "{}/databases/{}/query",
            self.base_url(),
            self.config.database_id
        );
        debug!(url = %url, "POST request");

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.config.token)
            .header("Notion-Version", NOTION_VERSION)
            .json(query)
            .send()
            .await?;

        Self::handle_response(response).await
    }

    /// Update properties of a single page.
    ///
    /// # Errors
    /// Returns [`NotionError::Http`] on transport failure or
    /// [`NotionError::Api`] on a non-success status.
    pub async fn update_page(&self, page_id: &str, update: &PageUpdate) -> Result<(), NotionError> {
        let url = format!("{}/pages/{page_id}", self.base_url());
        debug!(url = %url, "PATCH request");

        let response = self
            .client
            .patch(&url)
            .bearer_auth(&self.config.token)
            .header("Notion-Version", NOTION_VERSION)
            .json(update)
            .send()
            .await?;

        Self::handle_response::<IgnoredAny>(response).await?;
        Ok(())
    }

    fn base_url(&self) -> &str {
        self.config.api_url.trim_end_matches('/')
    }

    /// Handle API response, parsing JSON or error.
    async fn handle_response<T: DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, NotionError> {
        let status = response.status();
        let text = response.text().await?;

        if status.is_success() {
            serde_json::from_str(&text).map_err(|e| {
                warn!(error = %e, "Failed to parse response");
                NotionError::Serialization(e)
            })
        } else {
            let body: ErrorBody = serde_json::from_str(&text).unwrap_or(ErrorBody {
                code: String::new(),
                message: text,
            });

            warn!(
                status = %status,
                code = %body.code,
                "Notion request failed"
            );

            Err(NotionError::Api {
                status: status.as_u16(),
                code: body.code,
                message: body.message,
            })
        }
    }
}

#[async_trait]
impl TaskSource for NotionClient {
    async fn fetch_tasks(&self) -> Result<Vec<Task>, NotionError> {
        self.fetch_tasks_at(Utc::now()).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_redacts_token() {
        let config = NotionConfig::new("secret_abc", "db-1");
        let rendered = format!("{config:?}");

        assert!(!rendered.contains("secret_abc"));
        assert!(rendered.contains("db-1"));
        assert!(rendered.contains(DEFAULT_API_URL));
    }

    #[test]
    fn test_with_api_url_overrides_base() {
        let config = NotionConfig::new("t", "db").with_api_url("http://127.0.0.1:9999");
        assert_eq!(config.api_url, "http://127.0.0.1:9999");
    }
}
