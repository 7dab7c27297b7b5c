//! Notion API response types.
//!
//! Query results are decoded at the boundary into [`Record::Full`] or
//! [`Record::Partial`]. Only full pages carry the fields a [`crate::Task`]
//! needs; partial objects are references with little more than an id.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::error::NotionError;

/// Body of a successful database query.
#[derive(Debug, Deserialize)]
pub struct QueryResponse {
    pub results: Vec<Record>,
    #[serde(default)]
    pub has_more: bool,
    #[serde(default)]
    pub next_cursor: Option<String>,
}

/// One entry of `results`.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum Record {
    Full(Page),
    Partial(PartialRecord),
}

/// Marker for `"object": "page"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PageObject {
    Page,
}

/// A fully populated page.
#[derive(Debug, Deserialize)]
pub struct Page {
    pub object: PageObject,
    pub id: String,
    pub url: String,
    pub last_edited_time: DateTime<Utc>,
    pub properties: HashMap<String, PropertyValue>,
}

/// Anything in `results` that is not a full page.
#[derive(Debug, Deserialize)]
pub struct PartialRecord {
    #[serde(default)]
    pub object: String,
    #[serde(default)]
    pub id: String,
}

/// Page property value, keyed by its declared `type`.
#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PropertyValue {
    Title {
        #[serde(default)]
        title: Vec<RichText>,
    },
    #[serde(other)]
    Other,
}

/// A rich text segment.
#[derive(Debug, Clone, Deserialize)]
pub struct RichText {
    #[serde(default)]
    pub plain_text: String,
}

/// Error body returned with non-2xx statuses.
#[derive(Debug, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub code: String,
    #[serde(default)]
    pub message: String,
}

impl Record {
    /// Accept a full page, reject anything else.
    ///
    /// # Errors
    /// Returns [`NotionError::UnexpectedRecordShape`] for a partial record.
    pub fn into_page(self) -> Result<Page, NotionError> {
        match self {
            Self::Full(page) => Ok(page),
            Self::Partial(partial) => Err(NotionError::UnexpectedRecordShape {
                object: partial.object,
                id: partial.id,
            }),
        }
    }
}

impl Page {
    /// Plain text of the first segment of a title property, or `""`.
    #[must_use]
    pub fn title(&self, property: &str) -> String {
        match self.properties.get(property) {
            Some(PropertyValue::Title { title }) => title
                .first()
                .map(|segment| segment.plain_text.clone())
                .unwrap_or_default(),
            _ => String::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn page_json(name: serde_json::Value) -> serde_json::Value {
        json!({
            "object": "page",
            "id": "59833787-2cf9-4fdf-8782-e53db20768a5",
            "url": "https://www.notion.so/Ship-feature-598337872cf94fdf8782e53db20768a5",
            "created_time": "2024-03-01T10:00:00.000Z",
            "last_edited_time": "2024-03-20T08:15:00.000Z",
            "archived": false,
            "properties": {
                "Name": name,
                "Status": {
                    "id": "Z%3ClH",
                    "type": "select",
                    "select": { "id": "1", "name": "Done", "color": "green" }
                }
            }
        })
    }

    #[test]
    fn test_full_page_decodes() {
        let record: Record = serde_json::from_value(page_json(json!({
            "id": "title",
            "type": "title",
            "title": [{ "type": "text", "plain_text": "Ship feature" }]
        })))
        .unwrap();

        let Record::Full(page) = record else {
            panic!("expected full page");
        };
        assert_eq!(page.title("Name"), "Ship feature");
        assert_eq!(
            page.last_edited_time.to_rfc3339(),
            "2024-03-20T08:15:00+00:00"
        );
    }

    #[test]
    fn test_title_uses_first_segment() {
        let record: Record = serde_json::from_value(page_json(json!({
            "type": "title",
            "title": [{ "plain_text": "Foo" }, { "plain_text": "Bar" }]
        })))
        .unwrap();

        let Record::Full(page) = record else {
            panic!("expected full page");
        };
        assert_eq!(page.title("Name"), "Foo");
    }

    #[test]
    fn test_title_empty_for_other_property_type() {
        let record: Record = serde_json::from_value(page_json(json!({
            "type": "rich_text",
            "rich_text": [{ "plain_text": "Foo" }]
        })))
        .unwrap();

        let Record::Full(page) = record else {
            panic!("expected full page");
        };
        assert_eq!(page.title("Name"), "");
    }

    #[test]
    fn test_title_empty_without_segments_or_property() {
        let record: Record =
            serde_json::from_value(page_json(json!({ "type": "title", "title": [] }))).unwrap();

        let Record::Full(page) = record else {
            panic!("expected full page");
        };
        assert_eq!(page.title("Name"), "");
        assert_eq!(page.title("Missing"), "");
    }

    #[test]
    fn test_reference_stub_decodes_as_partial() {
        let record: Record = serde_json::from_value(json!({
            "object": "page",
            "id": "be633bf1-dfa0-436d-b259-571129a590e5"
        }))
        .unwrap();

        let err = record.into_page().unwrap_err();
        assert!(matches!(
            err,
            NotionError::UnexpectedRecordShape { ref object, ref id }
                if object == "page" && id == "be633bf1-dfa0-436d-b259-571129a590e5"
        ));
    }

    #[test]
    fn test_non_page_object_decodes_as_partial() {
        let record: Record = serde_json::from_value(json!({
            "object": "database",
            "id": "d9824bdc-8445-4327-be8b-5b47500af6ce",
            "url": "https://www.notion.so/d9824bdc84454327be8b5b47500af6ce",
            "last_edited_time": "2024-03-20T08:15:00.000Z",
            "properties": {}
        }))
        .unwrap();

        assert!(matches!(record, Record::Partial(_)));
    }
}
