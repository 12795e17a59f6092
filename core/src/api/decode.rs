//! Response decoding at the HTTP boundary
//!
//! Kept free of any transport so it can be exercised without a server.

use habitquest_types::Validate;
use serde::de::DeserializeOwned;

use super::ApiError;

/// Turn a status code and raw body into a typed, validated value.
pub fn decode_response<T>(endpoint: &str, status: u16, body: &[u8]) -> Result<T, ApiError>
where
    T: DeserializeOwned + Validate,
{
    if !(200..300).contains(&status) {
        return Err(ApiError::Status {
            endpoint: endpoint.to_string(),
            status,
            message: error_message(body),
        });
    }

    // 204 / empty bodies decode as JSON null (unit or None)
    let body: &[u8] = if status == 204 || body.iter().all(u8::is_ascii_whitespace) {
        b"null"
    } else {
        body
    };

    let value: T = serde_json::from_slice(body).map_err(|source| ApiError::Decode {
        endpoint: endpoint.to_string(),
        source,
    })?;

    value.validate().map_err(|violation| {
        tracing::warn!(endpoint, %violation, "Rejected response");
        ApiError::Schema {
            endpoint: endpoint.to_string(),
            violation,
        }
    })?;

    Ok(value)
}

/// Pull a human-readable message out of an error body.
///
/// Understands `{"detail": "..."}`, `{"detail": [{"msg": "..."}]}`,
/// `{"error": "..."}` and `{"message": "..."}`.
fn error_message(body: &[u8]) -> Option<String> {
    let value: serde_json::Value = serde_json::from_slice(body).ok()?;
    let object = value.as_object()?;

    if let Some(detail) = object.get("detail") {
        if let Some(text) = detail.as_str() {
            return Some(text.to_string());
        }
        if let Some(first) = detail.as_array().and_then(|items| items.first())
            && let Some(msg) = first.get("msg").and_then(|m| m.as_str())
        {
            return Some(msg.to_string());
        }
    }

    ["error", "message"]
        .iter()
        .find_map(|key| object.get(*key).and_then(|v| v.as_str()))
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use habitquest_types::{Adventure, AdventureStatus, Task};

    #[test]
    fn decodes_valid_adventure() {
        let body = br#"{"id": 5, "status": "abandoned", "monster_current_hp": 10, "monster_max_hp": 50}"#;
        let adventure: Adventure = decode_response("/adventures/5", 200, body).unwrap();
        assert_eq!(adventure.status, AdventureStatus::Abandoned);
    }

    #[test]
    fn not_found_becomes_status_error() {
        let body = br#"{"detail": "Adventure not found"}"#;
        let err = decode_response::<Adventure>("/adventures/9", 404, body).unwrap_err();
        assert!(err.is_not_found());
        match err {
            ApiError::Status { message, .. } => {
                assert_eq!(message.as_deref(), Some("Adventure not found"))
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn validation_detail_list_message() {
        let body = br#"{"detail": [{"loc": ["body", "title"], "msg": "field required"}]}"#;
        assert_eq!(error_message(body).as_deref(), Some("field required"));
    }

    #[test]
    fn error_key_message() {
        assert_eq!(
            error_message(br#"{"error": "Already friends"}"#).as_deref(),
            Some("Already friends")
        );
        assert_eq!(error_message(b"<html>Bad Gateway</html>"), None);
    }

    #[test]
    fn wrong_shape_is_decode_error() {
        let body = br#"{"id": "not-a-number", "title": "x"}"#;
        let err = decode_response::<Task>("/tasks/1", 200, body).unwrap_err();
        assert!(matches!(err, ApiError::Decode { .. }));
    }

    #[test]
    fn invariant_breach_is_schema_error() {
        let body = br#"{"id": 5, "status": "active", "monster_current_hp": 90, "monster_max_hp": 50}"#;
        let err = decode_response::<Adventure>("/adventures/5", 200, body).unwrap_err();
        assert!(matches!(err, ApiError::Schema { .. }));
    }

    #[test]
    fn nameless_monster_still_decodes() {
        let body = br#"{"id": 1, "status": "escaped", "monster_current_hp": 30,
            "monster_max_hp": 100, "monster": {"name": "", "emoji": null}}"#;
        let adventure: Adventure = decode_response("/adventures/1", 200, body).unwrap();
        let monster = crate::adventure::MonsterView::from_descriptor(adventure.monster.as_ref());
        assert_eq!(monster.name, crate::adventure::FALLBACK_MONSTER_NAME);
    }

    #[test]
    fn empty_body_decodes_unit_and_none() {
        decode_response::<()>("/tasks/3", 204, b"").unwrap();
        let current: Option<Adventure> =
            decode_response("/adventures/current", 200, b"null").unwrap();
        assert!(current.is_none());
    }
}
