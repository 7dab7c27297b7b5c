//! Posts a digest of recently completed Notion tasks to Slack, and moves
//! stale tasks to another status.
//!
//! A digest run is a straight line:
//!
//! 1. [`Config::from_lookup`] validates and loads configuration
//! 2. the Notion database is queried for tasks marked `Done` and edited in
//!    the last 30 days
//! 3. [`notify::Notifier`] posts a JSON dump of the tasks and a list of their
//!    URLs to the Slack webhook, concurrently
//!
//! A mover run ([`mover`]) reads a move rule from a YAML settings file,
//! queries the pages whose select property holds the rule's `from` option,
//! and sets every page not edited within `expires_in_days` to `to`. The
//! updates run concurrently.
//!
//! Every error aborts the run. See [`DigestError`].

#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod error;
pub mod mover;
pub mod pipeline;

pub use config::{Config, MoverConfig};
pub use error::DigestError;
pub use pipeline::{run, run_from_lookup, run_with};
