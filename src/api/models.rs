//! API request models.
//!
//! Only the inbound chat request is typed. Provider responses are relayed as
//! opaque JSON, so they have no model here.

use serde::{Deserialize, Serialize};

/// Chat request sent by the client application.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChatRequest {
    /// The user's message. Missing is sent upstream as empty content.
    #[serde(default)]
    pub message: Option<String>,

    /// Requested provider name ("anthropic" or "openai")
    #[serde(default)]
    pub provider: Option<String>,

    /// Prior conversation turns, forwarded in place of `message`
    #[serde(default)]
    pub history: Option<Vec<ChatMessage>>,

    /// Optional temporal and location context
    #[serde(default)]
    pub context: Option<RequestContext>,
}

/// A single conversation turn.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Role: "user" or "assistant"
    pub role: String,

    /// Message content
    pub content: String,
}

impl ChatMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }

    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system".to_string(),
            content: content.into(),
        }
    }
}

/// Client-side date, time and location.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RequestContext {
    #[serde(default)]
    pub date: String,

    #[serde(default)]
    pub time: String,

    #[serde(default)]
    pub timezone: String,

    #[serde(default)]
    pub location: Option<Location>,
}

/// Geographic coordinates in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub latitude: f64,
    pub longitude: f64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_minimal_request() {
        let req: ChatRequest = serde_json::from_value(json!({ "message": "lunch?" })).unwrap();
        assert_eq!(req.message.as_deref(), Some("lunch?"));
        assert!(req.provider.is_none());
        assert!(req.history.is_none());
        assert!(req.context.is_none());
    }

    #[test]
    fn test_empty_object_is_valid() {
        let req: ChatRequest = serde_json::from_value(json!({})).unwrap();
        assert!(req.message.is_none());
    }

    #[test]
    fn test_null_fields_are_absent() {
        let req: ChatRequest = serde_json::from_value(json!({
            "message": "hi",
            "provider": null,
            "history": null,
            "context": null
        }))
        .unwrap();
        assert!(req.provider.is_none());
        assert!(req.history.is_none());
        assert!(req.context.is_none());
    }

    #[test]
    fn test_full_request() {
        let req: ChatRequest = serde_json::from_value(json!({
            "message": "what now",
            "provider": "openai",
            "history": [
                {"role": "user", "content": "hi"},
                {"role": "assistant", "content": "Go for a walk."}
            ],
            "context": {
                "date": "2024-01-01",
                "time": "10:00",
                "timezone": "UTC",
                "location": {"latitude": 37.7749, "longitude": -122.4194}
            }
        }))
        .unwrap();

        assert_eq!(req.provider.as_deref(), Some("openai"));
        let history = req.history.unwrap();
        assert_eq!(history.len(), 2);
        assert_eq!(history[1].role, "assistant");
        let context = req.context.unwrap();
        assert_eq!(context.timezone, "UTC");
        assert_eq!(
            context.location,
            Some(Location {
                latitude: 37.7749,
                longitude: -122.4194
            })
        );
    }

    #[test]
    fn test_history_message_requires_fields() {
        let result: Result<ChatRequest, _> = serde_json::from_value(json!({
            "history": [{"role": "user"}]
        }));
        assert!(result.is_err());
    }
}
