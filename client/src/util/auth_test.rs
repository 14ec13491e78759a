use super::*;

#[test]
fn redirects_only_on_unauthorized() {
    assert!(should_redirect_login(&ApiError::new(401, "Unauthorized")));
    assert!(!should_redirect_login(&ApiError::new(500, "boom")));
    assert!(!should_redirect_login(&ApiError::network()));
}

#[test]
fn login_and_signup_are_public() {
    assert!(is_public_path("/login"));
    assert!(is_public_path("/signup/"));
    assert!(!is_public_path("/analysis"));
    assert!(!is_public_path("/"));
}
