use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const SERVER_READY: &str = "server ready";
pub const REMOTE_STATE: &str = "remoteState";

/// Any inbound text frame. The session mixes status notices, typed
/// responses and per-frame markers, so every field is optional.
#[derive(Serialize, Deserialize, Debug, Default)]
pub struct SessionMessage {
    pub status: Option<Value>,
    #[serde(rename = "type")]
    pub message_type: Option<Value>,
    #[serde(rename = "MA")]
    pub marker: Option<Value>,
}

impl SessionMessage {
    pub fn is_server_ready(&self) -> bool {
        self.status.as_ref().and_then(Value::as_str) == Some(SERVER_READY)
    }

    pub fn is_remote_state(&self) -> bool {
        self.message_type.as_ref().and_then(Value::as_str) == Some(REMOTE_STATE)
    }

    /// The marker arrives either as the string "00" or as a bare zero.
    pub fn is_frame_marker(&self) -> bool {
        match &self.marker {
            Some(Value::String(s)) => s == "00",
            Some(Value::Number(n)) => n.as_f64() == Some(0.0),
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_marker_forms() {
        let string_marker: SessionMessage = serde_json::from_str(r#"{"MA":"00"}"#).unwrap();
        let number_marker: SessionMessage = serde_json::from_str(r#"{"MA":0}"#).unwrap();
        let other_marker: SessionMessage = serde_json::from_str(r#"{"MA":"01"}"#).unwrap();
        assert!(string_marker.is_frame_marker());
        assert!(number_marker.is_frame_marker());
        assert!(!other_marker.is_frame_marker());
    }

    #[test]
    fn test_non_string_status_does_not_hide_marker() {
        let message: SessionMessage = serde_json::from_str(r#"{"status":1,"type":null,"MA":"00"}"#).unwrap();
        assert!(!message.is_server_ready());
        assert!(!message.is_remote_state());
        assert!(message.is_frame_marker());
    }

    #[test]
    fn test_unknown_fields_are_ignored() {
        let message: SessionMessage =
            serde_json::from_str(r#"{"type":"remoteState","width":1920,"pages":[1,2]}"#).unwrap();
        assert!(message.is_remote_state());
        assert!(!message.is_server_ready());
    }
}
