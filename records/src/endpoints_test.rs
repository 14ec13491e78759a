use super::*;

#[test]
fn all_versions_appends_model_segment() {
    assert_eq!(all_versions("nsfw"), "/utilities/dynamic-test/all-versions/nsfw");
}

#[test]
fn model_classes_lowercases_model_name() {
    assert_eq!(model_classes("NSFW"), "/utilities/analysis/get-model-classes/nsfw");
}

#[test]
fn path_segments_are_percent_encoded() {
    assert_eq!(
        all_versions("face blur/v2"),
        "/utilities/dynamic-test/all-versions/face%20blur%2Fv2"
    );
}

#[test]
fn chunk_without_media_url_has_no_query() {
    assert_eq!(
        chunk("chunk_3.csv", None).expect("path"),
        "/utilities/analysis/get-chunk/chunk_3.csv"
    );
}

#[test]
fn chunk_with_media_url_encodes_query_value() {
    let path = chunk("chunk_3.csv", Some("https://cdn.example.com/a b.jpg?x=1")).expect("path");
    assert_eq!(
        path,
        "/utilities/analysis/get-chunk/chunk_3.csv?inputMediaUrl=https%3A%2F%2Fcdn.example.com%2Fa+b.jpg%3Fx%3D1"
    );
}

#[test]
fn chunk_ignores_blank_media_url() {
    assert_eq!(
        chunk("c1", Some("   ")).expect("path"),
        "/utilities/analysis/get-chunk/c1"
    );
}

#[test]
fn chunk_rejects_blank_name() {
    let err = chunk("  ", None).expect_err("blank chunk");
    assert!(matches!(err, RecordsError::MissingChunk));
    assert_eq!(err.to_string(), "insufficient information");
}

#[test]
fn every_fixed_path_lives_under_utilities_prefix() {
    for path in [
        LOGIN,
        REGISTER,
        ALL_MODELS,
        START_PROCESS,
        GET_EXPECTED_SCORE,
        GET_SELECTED_VERSION,
        REGRESSION_READY,
        REGRESSION_MODEL,
        REGRESSION_RUN,
        PREDICT_URL,
        PREDICT_FILE,
        GENERATE_IMAGE_URL,
        GET_CHUNKS,
        UNSET_ANALYSIS,
        SET_NOT_BUG,
        SET_OUTLIER,
        PROOF_VALIDATION,
        GET_THRESHOLD,
        GET_ANALYSTS,
        SET_ANALYST,
        CAN_MERGE,
        MERGE,
        GET_SELECTED_MODEL,
        START_TASK,
    ] {
        assert!(path.starts_with("/utilities/"), "{path}");
    }
}
