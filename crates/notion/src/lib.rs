//! Notion database client for the completed-task digest.
//!
//! This crate wraps the two Notion endpoints the workspace needs: the
//! database query and the page update. It builds the "done in the last 30
//! days" filter, executes the query and decodes each result into a [`Task`].
//!
//! # Usage
//!
//! ```no_run
//! use notion::{NotionClient, NotionConfig, TaskSource};
//!
//! # async fn run() -> Result<(), notion::NotionError> {
//! let client = NotionClient::new(NotionConfig::new("secret_token", "database-id"));
//! let tasks = client.fetch_tasks().await?;
//! for task in &tasks {
//!     println!("{} {}", task.title, task.url);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Architecture
//!
//! - [`query`] builds the filter/sort request body
//! - [`models`] decodes raw results into [`models::Record::Full`] or
//!   [`models::Record::Partial`]
//! - [`NotionClient`] executes the query and maps full pages into [`Task`]s
//! - [`update`] builds page property updates for [`NotionClient::update_page`]
//! - [`TaskSource`] is the seam the pipeline depends on

#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod client;
pub mod error;
pub mod models;
pub mod query;
pub mod task;
pub mod update;

pub use client::{NotionClient, NotionConfig, TaskSource};
pub use error::NotionError;
pub use task::Task;
