use serde::{Serialize, Deserialize};
use time::OffsetDateTime;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Entry {
    pub name: String,
    pub choices: Vec<String>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "time::serde::rfc3339::option"
    )]
    pub timestamp: Option<OffsetDateTime>,
}

/// Body of `POST /api/submit`.
///
/// Both fields are optional at the wire level so that a missing name or
/// missing choices reaches validation instead of failing deserialization.
/// Unknown fields such as the client-side `id` are dropped.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SubmitRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub choices: Option<Vec<String>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SubmitResponse {
    pub success: bool,
    pub users: Vec<Entry>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ResetResponse {
    pub success: bool,
}

impl Entry {
    pub fn new(name: impl Into<String>, choices: Vec<String>) -> Self {
        Self {
            name: name.into(),
            choices,
            timestamp: None,
        }
    }

    pub fn stamped(mut self, at: OffsetDateTime) -> Self {
        self.timestamp = Some(at);
        self
    }
}

impl SubmitResponse {
    pub fn ok(users: Vec<Entry>) -> Self {
        Self { success: true, users }
    }
}

impl ResetResponse {
    pub fn ok() -> Self {
        Self { success: true }
    }
}
