//! Chat message envelope types.
//!
//! The inbound content shape varies by client: a list of typed content
//! items (each possibly exposing `text`), a direct text object, or a bare
//! string. Extraction is defensive; an unusable envelope degrades to a
//! placeholder, never an error.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

/// Placeholder for a content list with no items.
pub const EMPTY_MESSAGE: &str = "[Empty message]";

/// Placeholder for content that exposes no usable text.
pub const UNPARSEABLE_MESSAGE: &str = "[Could not parse message]";

/// One chat message on the wire, inbound or outbound.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub msg_id: Uuid,
    pub timestamp: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,
    /// Raw content; shape varies by sender. See [`ChatMessage::extract_text`].
    pub content: Value,
}

impl ChatMessage {
    /// Build a reply envelope: fresh id, UTC timestamp, and the text wrapped
    /// as a single typed content item.
    pub fn reply(text: impl Into<String>, session_id: Option<String>) -> Self {
        Self {
            msg_id: Uuid::new_v4(),
            timestamp: Utc::now(),
            session_id,
            content: serde_json::json!([{"type": "text", "text": text.into()}]),
        }
    }

    /// Pull display text out of the content, whatever its shape.
    ///
    /// List content uses the first item's `text` field, falling back to the
    /// item's string coercion. Object content uses its `text` field. A bare
    /// string is taken as-is. Anything else coerces or degrades to a
    /// placeholder.
    pub fn extract_text(&self) -> String {
        match &self.content {
            Value::String(s) => s.clone(),
            Value::Array(items) => match items.first() {
                None => EMPTY_MESSAGE.to_string(),
                Some(item) => match item.get("text").and_then(Value::as_str) {
                    Some(text) => text.to_string(),
                    None => coerce(item),
                },
            },
            Value::Object(map) => match map.get("text").and_then(Value::as_str) {
                Some(text) => text.to_string(),
                None => coerce(&self.content),
            },
            Value::Null => UNPARSEABLE_MESSAGE.to_string(),
            other => coerce(other),
        }
    }
}

/// String coercion for content without a text field.
fn coerce(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => UNPARSEABLE_MESSAGE.to_string(),
        other => other.to_string(),
    }
}

/// Transport-level receipt for a previously sent message. Logged only.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatAcknowledgement {
    pub acknowledged_msg_id: Uuid,
    pub timestamp: DateTime<Utc>,
}
