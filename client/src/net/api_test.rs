use super::*;
use serde_json::json;

#[test]
fn error_message_prefers_message_then_error() {
    let body = json!({"message": "Invalid input", "error": "ignored"});
    assert_eq!(error_message(Some(&body), "fallback"), "Invalid input");

    let body = json!({"message": "  ", "error": "Cannot Merge"});
    assert_eq!(error_message(Some(&body), "fallback"), "Cannot Merge");
}

#[test]
fn error_message_falls_back_for_missing_or_non_text_fields() {
    assert_eq!(error_message(None, "Failed to fetch models"), "Failed to fetch models");
    let body = json!({"message": 42});
    assert_eq!(error_message(Some(&body), "Failed"), "Failed");
}

#[test]
fn bearer_formats_authorization_value() {
    assert_eq!(bearer("abc"), "Bearer abc");
}

#[test]
fn is_success_covers_2xx_only() {
    assert!(is_success(200));
    assert!(is_success(202));
    assert!(!is_success(304));
    assert!(!is_success(401));
}

#[test]
fn requires_login_only_for_401() {
    assert!(ApiError::new(401, "expired").requires_login());
    assert!(!ApiError::new(403, "forbidden").requires_login());
    assert!(!ApiError::network().requires_login());
}

#[test]
fn api_error_displays_message() {
    assert_eq!(ApiError::network().to_string(), NETWORK_ERROR);
}

#[test]
fn records_errors_convert_to_status_zero() {
    let err: ApiError = records::RecordsError::MissingChunk.into();
    assert_eq!(err, ApiError::new(0, "insufficient information"));
}

#[test]
fn empty_success_body_decodes_as_message_reply() {
    let reply: MessageReply = serde_json::from_value(success_body(None)).expect("empty body");
    assert_eq!(reply, MessageReply::default());

    let reply: MessageReply = serde_json::from_value(success_body(Some(json!({"message": "Regression Started"}))))
        .expect("message body");
    assert_eq!(reply.message.as_deref(), Some("Regression Started"));
}
