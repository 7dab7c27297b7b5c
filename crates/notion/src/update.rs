//! Page update request body.
//!
//! API Documentation: <https://developers.notion.com/reference/patch-page>

use std::collections::HashMap;

use serde::Serialize;

/// Body of `PATCH /pages/{id}`.
#[derive(Debug, Clone, Serialize)]
pub struct PageUpdate {
    pub properties: HashMap<String, PropertyUpdate>,
}

impl PageUpdate {
    /// Set the select `property` to the option named `option`.
    #[must_use]
    pub fn select(property: &str, option: &str) -> Self {
        Self {
            properties: HashMap::from([(
                property.to_string(),
                PropertyUpdate::Select(SelectOption {
                    name: option.to_string(),
                }),
            )]),
        }
    }
}

/// New value of a single property, keyed by property type.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PropertyUpdate {
    Select(SelectOption),
}

#[derive(Debug, Clone, Serialize)]
pub struct SelectOption {
    pub name: String,
}
