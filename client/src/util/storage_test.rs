use super::*;

#[test]
fn normalize_token_trims_and_rejects_placeholders() {
    assert_eq!(normalize_token("  abc  "), Some("abc".to_owned()));
    assert_eq!(normalize_token(""), None);
    assert_eq!(normalize_token("undefined"), None);
    assert_eq!(normalize_token("null"), None);
}

#[test]
fn ssr_storage_is_empty() {
    assert_eq!(load_token(), None);
    assert_eq!(load_json::<Vec<String>>("drafts"), None);
}
