//! Slack delivery of completed-task digests.
//!
//! # Usage
//!
//! ```no_run
//! use notify::Notifier;
//!
//! # async fn run(tasks: Vec<notion::Task>) -> Result<(), notify::NotifyError> {
//! let notifier = Notifier::slack("https://hooks.slack.com/services/T000/B000/XXXX");
//! notifier.notify(&tasks).await?;
//! # Ok(())
//! # }
//! ```
//!
//! # Architecture
//!
//! - [`NotifyChannel`] trait defines the interface for notification channels
//! - [`SlackChannel`] implements Slack incoming webhook delivery
//! - [`messages`] renders the two digest messages from a task list
//! - [`join::TaskGroup`] runs the deliveries concurrently and joins them
//! - [`Notifier`] ties these together

#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod channels;
pub mod error;
pub mod join;
pub mod messages;

pub use channels::slack::SlackChannel;
pub use channels::NotifyChannel;
pub use error::{ChannelError, NotifyError};
pub use messages::Message;

use std::sync::Arc;

use notion::Task;
use tracing::info;

use crate::join::TaskGroup;

/// Digest dispatcher.
///
/// Every call to [`Notifier::notify`] sends two messages to the channel:
/// a pretty-printed dump of the task list and the list of task URLs.
pub struct Notifier {
    channel: Arc<dyn NotifyChannel>,
}

impl Notifier {
    /// Create a notifier delivering to a Slack incoming webhook.
    #[must_use]
    pub fn slack(webhook_url: impl Into<String>) -> Self {
        Self::with_channel(Arc::new(SlackChannel::new(webhook_url)))
    }

    /// Create a notifier with a specific channel.
    #[must_use]
    pub fn with_channel(channel: Arc<dyn NotifyChannel>) -> Self {
        Self { channel }
    }

    /// Send both digest messages and wait for both deliveries.
    ///
    /// An empty task list is still delivered.
    ///
    /// # Errors
    /// Returns [`NotifyError::Format`] if the dump cannot be rendered, or
    /// [`NotifyError::Delivery`] with the first failed delivery once both
    /// have settled.
    pub async fn notify(&self, tasks: &[Task]) -> Result<(), NotifyError> {
        let dump = Message::new(messages::task_dump(tasks)?);
        let urls = Message::new(messages::url_list(tasks));

        info!(
            channel = self.channel.name(),
            task_count = tasks.len(),
            "Sending task digest"
        );

        let mut deliveries = TaskGroup::new();
        deliveries.push("task-dump", self.channel.send(&dump));
        deliveries.push("url-list", self.channel.send(&urls));
        deliveries.join().await?;

        info!(channel = self.channel.name(), "Task digest delivered");
        Ok(())
    }
}
