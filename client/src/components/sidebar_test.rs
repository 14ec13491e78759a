use super::*;

#[test]
fn active_nav_matches_exact_paths() {
    assert_eq!(active_nav("/fresh-load"), Some("/fresh-load"));
    assert_eq!(active_nav("/task/"), Some("/task"));
}

#[test]
fn chunk_review_highlights_validation_entry() {
    assert_eq!(active_nav("/analysis/chunk_3.csv"), Some("/analysis-verification"));
    assert_eq!(active_nav("/analysis"), Some("/analysis"));
}

#[test]
fn home_and_unknown_paths_have_no_active_entry() {
    assert_eq!(active_nav("/"), None);
    assert_eq!(active_nav("/nope"), None);
}
