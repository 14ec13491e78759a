use super::*;
use serde_json::json;

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| (*s).to_owned()).collect()
}

// =============================================================================
// Model catalog
// =============================================================================

#[test]
fn catalog_accepts_name_list() {
    let catalog: ModelCatalog = serde_json::from_value(json!(["nsfw", "faces"])).expect("catalog");
    assert_eq!(catalog.names(), strings(&["nsfw", "faces"]));
    assert_eq!(catalog.embedded_versions("nsfw"), None);
}

#[test]
fn catalog_accepts_version_map_in_backend_order() {
    let catalog: ModelCatalog =
        serde_json::from_value(json!({"zeta": ["v2"], "alpha": ["v1", "v1.1"]})).expect("catalog");
    assert_eq!(catalog.names(), strings(&["zeta", "alpha"]));
    assert_eq!(catalog.embedded_versions("alpha"), Some(strings(&["v1", "v1.1"])));
}

// =============================================================================
// Expected score
// =============================================================================

#[test]
fn expected_score_reply_defaults_when_missing() {
    let reply: ExpectedScore = serde_json::from_value(json!({})).expect("reply");
    assert_eq!(reply.or_default(), "0.5");

    let numeric: ExpectedScore = serde_json::from_value(json!({"expected-score": 0.8})).expect("reply");
    assert_eq!(numeric.or_default(), "0.8");
}

#[test]
fn parse_expected_score_enforces_half_open_unit_range() {
    assert!(parse_expected_score("1").is_ok());
    assert!(parse_expected_score(" 0.25 ").is_ok());
    assert!(matches!(parse_expected_score("0"), Err(RecordsError::ScoreOutOfRange(_))));
    assert!(matches!(parse_expected_score("1.01"), Err(RecordsError::ScoreOutOfRange(_))));
    assert!(matches!(parse_expected_score("high"), Err(RecordsError::InvalidScore(_))));
    assert!(matches!(parse_expected_score("NaN"), Err(RecordsError::ScoreOutOfRange(_))));
}

// =============================================================================
// Start process
// =============================================================================

#[test]
fn start_request_normalizes_recipients() {
    let request = StartProcessRequest::build(
        Some("nsfw"),
        Some("v3"),
        &strings(&[" a@example.com", "", "b@example.com", "a@example.com"]),
        "0.7",
    )
    .expect("request");
    assert_eq!(request.recipients, strings(&["a@example.com", "b@example.com"]));
    assert_eq!(
        serde_json::to_value(&request).expect("json"),
        json!({
            "version": "v3",
            "model": "nsfw",
            "recipients": ["a@example.com", "b@example.com"],
            "expectedScore": "0.7"
        })
    );
}

#[test]
fn start_request_requires_model_and_version() {
    let err = StartProcessRequest::build(Some("nsfw"), None, &[], "0.5").expect_err("missing version");
    assert_eq!(err.to_string(), "Please select a model and version.");
}

#[test]
fn start_outcome_maps_statuses() {
    let reply = StartProcessReply { message: Some("queued".to_owned()), errors: Vec::new() };
    assert_eq!(StartOutcome::from_status(202, &reply), StartOutcome::Started("queued".to_owned()));
    assert_eq!(
        StartOutcome::from_status(200, &StartProcessReply::default()),
        StartOutcome::Started("Process Started".to_owned())
    );
    assert_eq!(StartOutcome::from_status(409, &reply), StartOutcome::LoginRequired);
    assert_eq!(
        StartOutcome::from_status(500, &reply),
        StartOutcome::Failed("Cannot Start Process".to_owned())
    );
}

#[test]
fn start_outcome_rejection_lists_message_then_errors() {
    let reply = StartProcessReply {
        message: Some("Invalid input".to_owned()),
        errors: strings(&["version missing", "score too low"]),
    };
    assert_eq!(
        StartOutcome::from_status(400, &reply),
        StartOutcome::Rejected(strings(&["Invalid input", "version missing", "score too low"]))
    );
}

// =============================================================================
// Regression
// =============================================================================

#[test]
fn regression_versions_dedupes_and_excludes_selected() {
    let all = strings(&["v1", "v2", "v1", "v3", "v2"]);
    assert_eq!(regression_versions(&all, Some("v2")), strings(&["v1", "v3"]));
    assert_eq!(regression_versions(&all, None), strings(&["v1", "v2", "v3"]));
}

#[test]
fn regression_flags_parse() {
    let ready: RegressionReady = serde_json::from_value(json!({"regression-ready": true})).expect("ready");
    assert!(ready.ready);
    let model: RegressionModel = serde_json::from_value(json!({"model": "nsfw"})).expect("model");
    assert_eq!(model.model.as_deref(), Some("nsfw"));
}

#[test]
fn regression_run_requires_both_fields() {
    assert!(RegressionRunRequest::build(Some("nsfw"), Some("v1")).is_ok());
    assert!(RegressionRunRequest::build(Some(" "), Some("v1")).is_err());
}
