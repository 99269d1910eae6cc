//! Label model and its wire representation.

use serde::{Deserialize, Serialize};

/// A label as the views see it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Label {
    /// Server-assigned; `None` only before creation
    pub id: Option<i64>,
    pub text: String,
    pub prefix_key: Option<String>,
    pub suffix_key: Option<String>,
    pub background_color: Option<String>,
    pub text_color: Option<String>,
}

impl Label {
    /// A label that has not been created on the server yet.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            id: None,
            text: text.into(),
            prefix_key: None,
            suffix_key: None,
            background_color: Some("#209cee".to_string()),
            text_color: Some("#ffffff".to_string()),
        }
    }
}

/// Label body exchanged with the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelPayload {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub text: String,
    #[serde(default)]
    pub prefix_key: Option<String>,
    #[serde(default)]
    pub suffix_key: Option<String>,
    /// Absent and `null` are both left out when written back
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_color: Option<String>,
}

impl From<LabelPayload> for Label {
    fn from(item: LabelPayload) -> Self {
        Self {
            id: item.id,
            text: item.text,
            prefix_key: item.prefix_key,
            suffix_key: item.suffix_key,
            background_color: item.background_color,
            text_color: item.text_color,
        }
    }
}

impl From<&Label> for LabelPayload {
    fn from(item: &Label) -> Self {
        Self {
            id: item.id,
            text: item.text.clone(),
            prefix_key: item.prefix_key.clone(),
            suffix_key: item.suffix_key.clone(),
            background_color: item.background_color.clone(),
            text_color: item.text_color.clone(),
        }
    }
}
