use serde::{Deserialize, Serialize};

/// Optional human-readable payload attached to most service responses.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ServiceMessage {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub msg: Option<String>,
}

impl ServiceMessage {
    pub fn new(msg: impl Into<String>) -> Self {
        Self {
            msg: Some(msg.into()),
        }
    }

    /// Parses an error body, tolerating non-JSON or shapeless payloads.
    pub fn from_body(body: &str) -> Self {
        serde_json::from_str::<Self>(body).unwrap_or_default()
    }

    pub fn message(&self) -> Option<&str> {
        self.msg.as_deref().filter(|msg| !msg.is_empty())
    }
}
