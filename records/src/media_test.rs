use super::*;
use serde_json::json;

#[test]
fn validate_image_accepts_allowed_extensions_case_insensitively() {
    assert!(validate_image("cat.JPG", 1024).is_ok());
    assert!(validate_image("scan.final.webp", MAX_IMAGE_BYTES).is_ok());
}

#[test]
fn validate_image_rejects_other_extensions() {
    let err = validate_image("notes.pdf", 10).expect_err("pdf");
    assert_eq!(err.to_string(), "Only jpg, jpeg, png, webp, gif files are allowed!");
    assert!(validate_image("png", 10).is_err());
}

#[test]
fn validate_image_reads_extension_after_last_dot() {
    assert!(validate_image(".png", 10).is_ok());
    assert!(validate_image("photo.png.exe", 10).is_err());
    assert!(validate_image("photo.", 10).is_err());
}

#[test]
fn validate_image_rejects_oversized_files() {
    let err = validate_image("big.png", MAX_IMAGE_BYTES + 1).expect_err("too big");
    assert_eq!(err.to_string(), "File size must be less than 5MB");
}

#[test]
fn validate_csv_name_checks_extension() {
    assert!(validate_csv_name("results.CSV").is_ok());
    let err = validate_csv_name("results.xlsx").expect_err("xlsx");
    assert_eq!(err.to_string(), "Only CSV files are allowed!");
}

#[test]
fn url_prediction_request_serializes_camel_case_url() {
    let request = UrlPredictionRequest::build(Some("nsfw"), Some("v1"), " https://x/1.png ").expect("request");
    assert_eq!(
        serde_json::to_value(&request).expect("json"),
        json!({"model": "nsfw", "version": "v1", "inputMediaUrl": "https://x/1.png"})
    );
    assert!(UrlPredictionRequest::build(Some("nsfw"), Some("v1"), "  ").is_err());
    assert!(UrlPredictionRequest::build(None, Some("v1"), "https://x").is_err());
}

#[test]
fn ranked_predictions_sorts_descending_and_skips_non_numeric() {
    let ranked = ranked_predictions(&json!({"dog": 0.2, "cat": "0.7", "meta": {"a": 1}, "bird": 0.5}));
    assert_eq!(
        ranked,
        vec![("cat".to_owned(), 0.7), ("bird".to_owned(), 0.5), ("dog".to_owned(), 0.2)]
    );
    assert!(ranked_predictions(&json!([1, 2])).is_empty());
}

#[test]
fn generated_image_url_tolerates_missing_url() {
    let reply: GeneratedImageUrl = serde_json::from_value(json!({})).expect("reply");
    assert_eq!(reply.url, None);
}
