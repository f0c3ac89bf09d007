use crate::xml;
use crate::{LastFmError, Result};
use serde_json::Value;

/// Key of the response envelope after flattening.
pub const ENVELOPE_KEY: &str = "Lfm";

/// Turn a raw response body into the structured payload.
///
/// An empty body yields `Ok(None)`. A root element with `status="failed"` yields
/// [`LastFmError::Api`] carrying the embedded code and message. Anything else
/// is returned with the `Lfm` wrapper removed; the envelope's own attributes
/// (such as `status`) stay in the payload.
pub fn handle(raw_body: &str, rest_method: &str) -> Result<Option<Value>> {
    if raw_body.trim().is_empty() {
        log::debug!("Empty response body for {rest_method}");
        return Ok(None);
    }

    let parsed = xml::parse(raw_body)?;
    let failed = xml::root_attributes(raw_body)?
        .iter()
        .any(|(key, value)| key == "status" && value == "failed");
    let payload = match parsed {
        Value::Object(mut document) => match document.remove(ENVELOPE_KEY) {
            Some(envelope) => envelope,
            None => Value::Object(document),
        },
        other => other,
    };

    if failed {
        return Err(api_error(&payload, rest_method));
    }

    Ok(Some(payload))
}

fn api_error(envelope: &Value, rest_method: &str) -> LastFmError {
    let error = envelope.get("error");
    let code = error
        .and_then(|e| e.get("code"))
        .and_then(Value::as_str)
        .and_then(|code| code.trim().parse::<u32>().ok())
        .unwrap_or(0);
    let message = match error {
        Some(Value::String(text)) => text.clone(),
        Some(e) => e
            .get("value")
            .and_then(Value::as_str)
            .unwrap_or("Unknown error")
            .to_string(),
        None => "Unknown error".to_string(),
    };

    LastFmError::Api {
        rest_method: rest_method.to_string(),
        code,
        message: message.trim().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_body_is_not_an_error() {
        assert!(handle("", "album.search").unwrap().is_none());
        assert!(handle("\n  ", "album.search").unwrap().is_none());
    }

    #[test]
    fn test_failed_status_is_api_error() {
        let body = r#"<?xml version="1.0" encoding="utf-8"?>
<lfm status="failed">
    <error code="6">Album not found</error>
</lfm>"#;
        match handle(body, "album.getInfo") {
            Err(LastFmError::Api {
                rest_method,
                code,
                message,
            }) => {
                assert_eq!(rest_method, "album.getInfo");
                assert_eq!(code, 6);
                assert_eq!(message, "Album not found");
            }
            other => panic!("Expected API error, got: {other:?}"),
        }
    }

    #[test]
    fn test_failed_status_without_code() {
        let body = r#"<lfm status="failed"><error>Something broke</error></lfm>"#;
        match handle(body, "user.getInfo").unwrap_err() {
            LastFmError::Api { code, message, .. } => {
                assert_eq!(code, 0);
                assert_eq!(message, "Something broke");
            }
            other => panic!("Expected API error, got: {other:?}"),
        }
    }

    #[test]
    fn test_failed_status_survives_colliding_child() {
        let body = r#"<lfm status="failed">
    <status>x</status>
    <error code="11">Service Offline</error>
</lfm>"#;
        match handle(body, "user.getInfo").unwrap_err() {
            LastFmError::Api { code, message, .. } => {
                assert_eq!(code, 11);
                assert_eq!(message, "Service Offline");
            }
            other => panic!("Expected API error, got: {other:?}"),
        }
    }

    #[test]
    fn test_envelope_is_removed() {
        let body = r#"<lfm status="ok">
  <session>
    <name>MyLastFMUsername</name>
    <key>d580d57f32848f5dcf574d1ce18d78b2</key>
    <subscriber>0</subscriber>
  </session>
</lfm>"#;
        let payload = handle(body, "auth.getSession").unwrap().unwrap();
        assert_eq!(payload["status"], "ok");
        assert_eq!(payload["Session"]["key"], "d580d57f32848f5dcf574d1ce18d78b2");
        assert!(payload.get(ENVELOPE_KEY).is_none());
    }

    #[test]
    fn test_malformed_body_is_parse_error() {
        assert!(matches!(
            handle("<lfm status=\"ok\"><broken></lfm>", "tag.search"),
            Err(LastFmError::Parse(_))
        ));
    }
}
