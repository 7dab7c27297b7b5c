//! Message bodies built from a task list.

use notion::Task;
use serde::Serialize;

/// A plain text webhook message, sent as `{"text": ...}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Message {
    pub text: String,
}

impl Message {
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

/// Pretty-printed JSON array of every task field.
///
/// # Errors
/// Returns an error if a task cannot be serialized.
pub fn task_dump(tasks: &[Task]) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(tasks)
}

/// Task URLs, one per line, in input order.
#[must_use]
pub fn url_list(tasks: &[Task]) -> String {
    tasks
        .iter()
        .map(|task| task.url.as_str())
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use serde_json::Value;

    fn tasks() -> Vec<Task> {
        vec![
            Task {
                title: "Ship feature".to_string(),
                url: "https://x/1".to_string(),
                last_edited_time: Utc.with_ymd_and_hms(2024, 3, 30, 9, 0, 0).unwrap(),
            },
            Task {
                title: "Fix bug".to_string(),
                url: "https://x/2".to_string(),
                last_edited_time: Utc.with_ymd_and_hms(2024, 3, 12, 17, 30, 0).unwrap(),
            },
        ]
    }

    #[test]
    fn test_url_list_one_line_per_task() {
        let text = url_list(&tasks());
        assert_eq!(text, "https://x/1\nhttps://x/2");
        assert_eq!(text.lines().count(), 2);
    }

    #[test]
    fn test_url_list_empty() {
        assert_eq!(url_list(&[]), "");
    }

    #[test]
    fn test_task_dump_parses_back() {
        let tasks = tasks();
        let dump = task_dump(&tasks).unwrap();
        assert!(dump.contains("\n  {"));

        let parsed: Vec<Task> = serde_json::from_str(&dump).unwrap();
        assert_eq!(parsed, tasks);
    }

    #[test]
    fn test_task_dump_empty() {
        let dump = task_dump(&[]).unwrap();
        assert_eq!(dump, "[]");
        assert_eq!(serde_json::from_str::<Value>(&dump).unwrap(), Value::Array(vec![]));
    }

    #[test]
    fn test_message_serializes_as_text_payload() {
        let value = serde_json::to_value(Message::new("hello")).unwrap();
        assert_eq!(value, serde_json::json!({ "text": "hello" }));
    }
}
