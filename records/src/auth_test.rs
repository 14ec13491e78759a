use super::*;
use serde_json::json;

#[test]
fn login_requires_both_fields() {
    assert!(validate_login("", "secret").is_err());
    assert!(validate_login("E100", "").is_err());
    let request = validate_login(" E100 ", "secret").expect("login");
    assert_eq!(request.emp_id, "E100");
}

#[test]
fn login_reply_token_is_optional() {
    let reply: LoginReply = serde_json::from_value(json!({"token": "abc"})).expect("reply");
    assert_eq!(reply.token.as_deref(), Some("abc"));
    let empty: LoginReply = serde_json::from_value(json!({"message": "bad"})).expect("reply");
    assert_eq!(empty.token, None);
}

#[test]
fn signup_reports_missing_fields_before_mismatch() {
    let err = validate_signup("E1", "", "a", "b", Privilege::User).expect_err("missing");
    assert_eq!(err.to_string(), "All fields are required.");
}

#[test]
fn signup_rejects_mismatched_passwords() {
    let err = validate_signup("E1", "Ada", "a", "b", Privilege::User).expect_err("mismatch");
    assert_eq!(err.to_string(), "Passwords do not match.");
}

#[test]
fn signup_serializes_lowercase_privilege() {
    let request = validate_signup("E1", "Ada L", "pw", "pw", Privilege::Admin).expect("request");
    assert_eq!(
        serde_json::to_value(&request).expect("json"),
        json!({"emp_id": "E1", "full_name": "Ada L", "password": "pw", "privilege": "admin"})
    );
}

#[test]
fn privilege_parse_round_trips_labels() {
    assert_eq!(Privilege::parse("Admin"), Some(Privilege::Admin));
    assert_eq!(Privilege::parse(Privilege::User.as_str()), Some(Privilege::User));
    assert_eq!(Privilege::parse("root"), None);
}

#[test]
fn register_outcome_maps_statuses() {
    assert_eq!(RegisterOutcome::from_status(201), RegisterOutcome::Registered);
    assert_eq!(RegisterOutcome::from_status(409), RegisterOutcome::Failed("User Already Exists"));
    assert_eq!(RegisterOutcome::from_status(403), RegisterOutcome::Failed("Admin Privilege Required"));
    assert_eq!(RegisterOutcome::from_status(500), RegisterOutcome::Failed("Cannot Register"));
}
