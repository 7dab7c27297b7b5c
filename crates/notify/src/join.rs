//! Fixed fan-out of independent fallible tasks.
//!
//! A [`TaskGroup`] holds a set of labelled futures and drives them
//! concurrently on the current task. [`TaskGroup::join`] waits until every
//! member has settled, even after a failure, then reports the first failure
//! in insertion order. No member is cancelled or retried.

use std::future::Future;

use futures::future::{join_all, BoxFuture, FutureExt};
use thiserror::Error;
use tracing::{debug, error};

/// First failure of a joined group.
#[derive(Debug, Error)]
#[error("{label} failed ({failures} of {total} tasks failed)")]
pub struct GroupFailure<E: std::error::Error + 'static> {
    /// Label of the first failed member
    pub label: String,
    /// Error of the first failed member
    #[source]
    pub error: E,
    /// Number of members that failed
    pub failures: usize,
    /// Number of members in the group
    pub total: usize,
}

/// A set of labelled futures joined as one unit.
pub struct TaskGroup<'a, E> {
    tasks: Vec<(String, BoxFuture<'a, Result<(), E>>)>,
}

impl<'a, E> TaskGroup<'a, E>
where
    E: std::error::Error + 'static,
{
    #[must_use]
    pub fn new() -> Self {
        Self { tasks: Vec::new() }
    }

    /// Add a member. It does not start running until [`Self::join`].
    pub fn push<F>(&mut self, label: impl Into<String>, task: F)
    where
        F: Future<Output = Result<(), E>> + Send + 'a,
    {
        self.tasks.push((label.into(), task.boxed()));
    }

    /// Run every member to completion.
    ///
    /// # Errors
    /// Returns the first failure in insertion order once all members have
    /// settled.
    pub async fn join(self) -> Result<(), GroupFailure<E>> {
        let total = self.tasks.len();
        let (labels, tasks): (Vec<_>, Vec<_>) = self.tasks.into_iter().unzip();
        let results = join_all(tasks).await;

        let mut first = None;
        let mut failures = 0;

        for (label, result) in labels.into_iter().zip(results) {
            match result {
                Ok(()) => debug!(task = %label, "Task completed"),
                Err(e) => {
                    error!(task = %label, error = %e, "Task failed");
                    failures += 1;
                    if first.is_none() {
                        first = Some((label, e));
                    }
                }
            }
        }

        match first {
            None => Ok(()),
            Some((label, error)) => Err(GroupFailure {
                label,
                error,
                failures,
                total,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
    use std::sync::Arc;
    use std::time::Duration;

    #[derive(Debug, Error)]
    #[error("boom: {0}")]
    struct Boom(&'static str);

    #[tokio::test]
    async fn test_empty_group_succeeds() {
        let group: TaskGroup<'_, Boom> = TaskGroup::new();
        assert!(group.join().await.is_ok());
    }

    #[tokio::test]
    async fn test_all_members_run() {
        let counter = Arc::new(AtomicUsize::new(0));
        let mut group: TaskGroup<'_, Boom> = TaskGroup::new();

        for label in ["a", "b", "c"] {
            let counter = Arc::clone(&counter);
            group.push(label, async move {
                counter.fetch_add(1, Ordering::SeqCst);
                Ok(())
            });
        }

        group.join().await.unwrap();
        assert_eq!(counter.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_waits_for_slow_member_after_fast_failure() {
        let finished = Arc::new(AtomicBool::new(false));
        let mut group = TaskGroup::new();

        group.push("fast", async { Err(Boom("fast")) });
        let slow_finished = Arc::clone(&finished);
        group.push("slow", async move {
            tokio::time::sleep(Duration::from_millis(50)).await;
            slow_finished.store(true, Ordering::SeqCst);
            Ok(())
        });

        let failure = group.join().await.unwrap_err();
        assert!(finished.load(Ordering::SeqCst));
        assert_eq!(failure.label, "fast");
        assert_eq!(failure.failures, 1);
        assert_eq!(failure.total, 2);
    }

    #[tokio::test]
    async fn test_first_failure_is_by_insertion_order() {
        let mut group = TaskGroup::new();

        group.push("first", async {
            tokio::time::sleep(Duration::from_millis(30)).await;
            Err(Boom("first"))
        });
        group.push("second", async { Err(Boom("second")) });

        let failure = group.join().await.unwrap_err();
        assert_eq!(failure.label, "first");
        assert_eq!(failure.error.0, "first");
        assert_eq!(failure.failures, 2);
    }

    #[tokio::test]
    async fn test_owned_labels() {
        let mut group = TaskGroup::new();
        for id in ["page-1", "page-2"] {
            group.push(format!("update {id}"), async move {
                if id == "page-2" {
                    Err(Boom("page-2"))
                } else {
                    Ok(())
                }
            });
        }

        let failure = group.join().await.unwrap_err();
        assert_eq!(failure.label, "update page-2");
        assert_eq!(failure.total, 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_members_run_concurrently() {
        let mut group: TaskGroup<'_, Boom> = TaskGroup::new();
        for label in ["a", "b"] {
            group.push(label, async {
                tokio::time::sleep(Duration::from_millis(100)).await;
                Ok(())
            });
        }

        let started = tokio::time::Instant::now();
        group.join().await.unwrap();
        assert!(started.elapsed() < Duration::from_millis(200));
    }
}
