use super::*;

#[test]
fn page_title_uses_nav_labels() {
    assert_eq!(page_title("/fresh-load"), "Fresh Load Test");
    assert_eq!(page_title("/generate-image/"), "Generate Image Url");
}

#[test]
fn page_title_covers_non_nav_routes() {
    assert_eq!(page_title("/"), "Dashboard");
    assert_eq!(page_title("/signup"), "Sign Up");
    assert_eq!(page_title("/analysis/c1"), "Chunk Analysis");
    assert_eq!(page_title("/missing"), "Testbench");
}
