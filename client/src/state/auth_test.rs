use super::*;

#[test]
fn sign_in_then_out_toggles_authentication() {
    let mut auth = AuthState::default();
    assert!(!auth.is_authenticated());
    auth.sign_in("tok".to_owned());
    assert!(auth.is_authenticated());
    assert_eq!(auth.token.as_deref(), Some("tok"));
    auth.sign_out();
    assert!(!auth.is_authenticated());
}

#[test]
fn from_storage_is_signed_out_off_browser() {
    assert_eq!(AuthState::from_storage(), AuthState::default());
}
