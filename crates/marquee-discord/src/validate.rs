// SPDX-FileCopyrightText: 2026 Marquee Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Structural checks on outgoing webhook payloads.

use marquee_core::MarqueeError;
use serde_json::Value;

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// The payload must be an object whose `embeds` is an array of objects.
pub fn validate_payload(payload: &Value) -> Result<(), MarqueeError> {
    let Value::Object(map) = payload else {
        return Err(MarqueeError::Payload(format!(
            "invalid payload structure: {}",
            kind(payload)
        )));
    };

    let embeds = match map.get("embeds") {
        Some(Value::Array(embeds)) => embeds,
        Some(other) => {
            return Err(MarqueeError::Payload(format!(
                "invalid embeds structure: {}",
                kind(other)
            )));
        }
        None => {
            return Err(MarqueeError::Payload(
                "invalid embeds structure: missing".to_string(),
            ));
        }
    };

    if let Some((i, embed)) = embeds.iter().enumerate().find(|(_, e)| !e.is_object()) {
        return Err(MarqueeError::Payload(format!(
            "invalid embed {i} structure: {}",
            kind(embed)
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn accepts_embed_objects() {
        assert!(validate_payload(&json!({"embeds": [{"title": "x"}]})).is_ok());
        assert!(validate_payload(&json!({"embeds": []})).is_ok());
    }

    #[test]
    fn rejects_non_objects() {
        let err = validate_payload(&json!([1, 2])).unwrap_err();
        assert_eq!(err.to_string(), "payload error: invalid payload structure: array");
    }

    #[test]
    fn rejects_missing_or_wrong_embeds() {
        let err = validate_payload(&json!({"content": "hi"})).unwrap_err();
        assert!(err.to_string().contains("missing"));

        let err = validate_payload(&json!({"embeds": {"title": "x"}})).unwrap_err();
        assert!(err.to_string().contains("embeds structure: object"));
    }

    #[test]
    fn rejects_non_object_embed() {
        let err = validate_payload(&json!({"embeds": [{"title": "ok"}, "oops"]})).unwrap_err();
        assert_eq!(err.to_string(), "payload error: invalid embed 1 structure: string");
    }
}
