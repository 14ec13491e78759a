use super::*;
use serde_json::json;

fn bug_record() -> AnalysisRecord {
    AnalysisRecord {
        input_media_url: "https://cdn.example.com/1.jpg".to_owned(),
        analysis: Some(Verdict::Bug),
        expected_classes: vec!["cat".to_owned()],
        reproduced_urls: vec![" https://cdn.example.com/r1.jpg ".to_owned(), "  ".to_owned()],
        analysed_by: "Analyst 1".to_owned(),
        ..AnalysisRecord::default()
    }
}

// =============================================================================
// Verdict
// =============================================================================

#[test]
fn toggle_selects_new_verdict() {
    assert_eq!(Verdict::toggle(None, Verdict::Bug), Some(Verdict::Bug));
    assert_eq!(Verdict::toggle(Some(Verdict::Bug), Verdict::Outlier), Some(Verdict::Outlier));
}

#[test]
fn toggle_same_verdict_clears_it() {
    assert_eq!(Verdict::toggle(Some(Verdict::NotBug), Verdict::NotBug), None);
}

#[test]
fn labels_round_trip_through_from_label() {
    for verdict in Verdict::ALL {
        assert_eq!(Verdict::from_label(verdict.label()), Some(verdict));
    }
    assert_eq!(Verdict::from_label(""), None);
    assert_eq!(Verdict::from_label("Maybe"), None);
}

#[test]
fn verdict_endpoint_maps_transitions() {
    assert_eq!(verdict_endpoint(None), endpoints::UNSET_ANALYSIS);
    assert_eq!(verdict_endpoint(Some(Verdict::Bug)), endpoints::UNSET_ANALYSIS);
    assert_eq!(verdict_endpoint(Some(Verdict::NotBug)), endpoints::SET_NOT_BUG);
    assert_eq!(verdict_endpoint(Some(Verdict::Outlier)), endpoints::SET_OUTLIER);
}

// =============================================================================
// AnalysisRecord serde
// =============================================================================

#[test]
fn record_deserializes_backend_row_with_mixed_types() {
    let record: AnalysisRecord = serde_json::from_value(json!({
        "inputMediaUrl": "https://cdn.example.com/1.jpg",
        "Result": 1,
        "Projection Layer": 0.42,
        "Detection Layer": null,
        "Predicted Classes": "{'cat': 0.9}",
        "Analysis": "Not Bug",
        "ExpectedClasses": "cat, dog",
        "ReproducedUrls": ["https://a", ""],
        "AnalysedBy": "Analyst 2",
        "row_id": 17
    }))
    .expect("record");

    assert_eq!(record.result, "1");
    assert_eq!(record.projection_layer, "0.42");
    assert_eq!(record.detection_layer, "");
    assert_eq!(record.analysis, Some(Verdict::NotBug));
    assert_eq!(record.expected_classes, vec!["cat", "dog"]);
    assert_eq!(record.reproduced_urls, vec!["https://a"]);
    assert_eq!(record.extra.get("row_id"), Some(&json!(17)));
}

#[test]
fn record_serializes_unset_verdict_as_empty_string() {
    let record = AnalysisRecord { input_media_url: "u".to_owned(), ..AnalysisRecord::default() };
    let value = serde_json::to_value(&record).expect("json");
    assert_eq!(value["Analysis"], json!(""));
    assert_eq!(value["ExpectedClasses"], json!([]));
}

#[test]
fn set_column_routes_known_and_extra_columns() {
    let mut record = AnalysisRecord::default();
    record.set_column("Result", "positive".to_owned());
    record.set_column("Analysis", "Bug".to_owned());
    record.set_column("batch", "b7".to_owned());

    assert_eq!(record.result, "positive");
    assert_eq!(record.analysis, None);
    assert_eq!(record.column("batch"), "b7");
    assert_eq!(record.column("missing"), "");
}

#[test]
fn leaving_bug_clears_bug_only_fields() {
    let mut record = bug_record();
    record.set_verdict(Some(Verdict::Outlier));
    assert!(record.expected_classes.is_empty());
    assert!(record.reproduced_urls.is_empty());
    assert_eq!(record.analysed_by, "Analyst 1");
}

#[test]
fn reset_review_keeps_prediction_columns() {
    let mut record = bug_record();
    record.predicted_classes = "{'cat': 0.9}".to_owned();
    record.reset_review();
    assert_eq!(record.analysis, None);
    assert!(record.analysed_by.is_empty());
    assert_eq!(record.predicted_classes, "{'cat': 0.9}");
}

// =============================================================================
// Predicted classes
// =============================================================================

#[test]
fn predicted_classes_parse_python_dict_and_sort_descending() {
    let scores = parse_predicted_classes("{'na/selfie': 0.12, 'yes/blur': 0.93, 'x': '0.5'}");
    let labels: Vec<&str> = scores.iter().map(|s| s.label.as_str()).collect();
    assert_eq!(labels, vec!["yes/blur", "x", "na/selfie"]);
    assert!(scores[1].exceeds(0.5));
    assert!(!scores[2].exceeds(0.5));
}

#[test]
fn predicted_classes_unparsable_text_is_empty() {
    assert!(parse_predicted_classes("").is_empty());
    assert!(parse_predicted_classes("not a dict").is_empty());
    assert!(parse_predicted_classes("['a', 'b']").is_empty());
}

// =============================================================================
// Chunk payloads
// =============================================================================

#[test]
fn chunk_detail_defaults_missing_fields() {
    let detail: ChunkDetail = serde_json::from_value(json!({})).expect("detail");
    assert!(detail.data.is_empty());
    assert_eq!(detail.model, None);
}

#[test]
fn chunk_summary_tolerates_missing_analyst() {
    let summary: ChunkSummary =
        serde_json::from_value(json!({"file": "chunk_1.csv", "status": "pending"})).expect("summary");
    assert_eq!(summary.analyst, "");
    assert_eq!(summary.status, "pending");
}

#[test]
fn verdict_change_uses_camel_case_media_key() {
    let body = VerdictChange { chunk: "c1".to_owned(), input_media_url: "u".to_owned() };
    assert_eq!(serde_json::to_value(body).expect("json"), json!({"chunk": "c1", "inputMediaUrl": "u"}));
}

// =============================================================================
// Proof validation
// =============================================================================

#[test]
fn proof_validation_carries_selected_classes_and_urls() {
    let request = ProofValidationRequest::from_record(Some("c1"), &bug_record()).expect("request");
    assert_eq!(request.expected_classes, vec!["cat"]);
    assert_eq!(request.reproduced_urls, vec!["https://cdn.example.com/r1.jpg"]);

    let value = serde_json::to_value(&request).expect("json");
    assert_eq!(value["imageURL"], json!("https://cdn.example.com/1.jpg"));
    assert_eq!(value["chunk"], json!("c1"));
    assert_eq!(value["analysedBy"], json!("Analyst 1"));
}

#[test]
fn proof_validation_omits_chunk_for_local_review() {
    let request = ProofValidationRequest::from_record(None, &bug_record()).expect("request");
    let value = serde_json::to_value(&request).expect("json");
    assert!(value.get("chunk").is_none());
}

#[test]
fn proof_validation_requires_bug_verdict() {
    let mut record = bug_record();
    record.analysis = Some(Verdict::Outlier);
    let err = ProofValidationRequest::from_record(None, &record).expect_err("not a bug");
    assert_eq!(err.to_string(), "Only records tagged Bug can be validated.");
}

#[test]
fn proof_validation_requires_expected_classes() {
    let mut record = bug_record();
    record.expected_classes.clear();
    let err = ProofValidationRequest::from_record(None, &record).expect_err("no classes");
    assert_eq!(err.to_string(), "Select at least one expected class.");
}

// =============================================================================
// Merge / threshold / flags
// =============================================================================

#[test]
fn merge_success_requires_exact_message() {
    let ok: MergeResponse = serde_json::from_value(json!({"message": "merge successful"})).expect("merge");
    assert!(ok.is_success());

    let other: MergeResponse = serde_json::from_value(json!({"message": "queued"})).expect("merge");
    assert!(!other.is_success());
    assert_eq!(other.failure_message(), "Cannot Merge");

    let failed: MergeResponse =
        serde_json::from_value(json!({"error": "chunks still pending"})).expect("merge");
    assert_eq!(failed.failure_message(), "chunks still pending");
}

#[test]
fn can_merge_accepts_bool_or_string() {
    let a: CanMerge = serde_json::from_value(json!({"can-merge": true})).expect("flag");
    let b: CanMerge = serde_json::from_value(json!({"can-merge": "false"})).expect("flag");
    let c: CanMerge = serde_json::from_value(json!({})).expect("flag");
    assert!(a.can_merge);
    assert!(!b.can_merge);
    assert!(!c.can_merge);
}

#[test]
fn threshold_falls_back_to_default() {
    let quoted: Threshold = serde_json::from_value(json!({"threshold": "0.7"})).expect("threshold");
    let zero: Threshold = serde_json::from_value(json!({"threshold": 0})).expect("threshold");
    let missing: Threshold = serde_json::from_value(json!({})).expect("threshold");
    assert!((quoted.value() - 0.7).abs() < f64::EPSILON);
    assert!((zero.value() - DEFAULT_THRESHOLD).abs() < f64::EPSILON);
    assert!((missing.value() - DEFAULT_THRESHOLD).abs() < f64::EPSILON);
}

#[test]
fn selected_model_blank_is_none() {
    let model: SelectedModel = serde_json::from_value(json!({"model": ""})).expect("model");
    assert_eq!(model.model, None);
}
