use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::AnimeId;

/// Raw create/update body, before the validation gate.
///
/// Fields the gate inspects stay as loose JSON so that a wrong type turns
/// into a validation message instead of a deserialization failure.
#[derive(Debug, Default, Deserialize)]
pub struct AnimePayload {
    pub title: Option<Value>,
    pub image_url: Option<String>,
    pub total_episodes: Option<Value>,
    pub episodes_watched: Option<Value>,
    pub status: Option<Value>,
    pub genres: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct CreatedResponse {
    pub id: AnimeId,
    pub message: &'static str,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub message: &'static str,
}

/// Error body shared by every failure response.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stack: Option<String>,
}

impl ErrorBody {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            message: None,
            details: None,
            stack: None,
        }
    }

    #[must_use]
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    #[must_use]
    pub fn with_details(mut self, details: Vec<String>) -> Self {
        self.details = Some(details);
        self
    }

    #[must_use]
    pub fn with_stack(mut self, stack: impl Into<String>) -> Self {
        self.stack = Some(stack.into());
        self
    }
}
