//! Shared auth UI helpers.
//!
//! SYSTEM CONTEXT
//! ==============
//! Any page can hit an expired session. They all end it the same way:
//! clear the token and go to `/login`.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use crate::net::api::ApiError;

pub const LOGIN_PATH: &str = "/login";

/// Whether a failed call should end the session.
pub fn should_redirect_login(err: &ApiError) -> bool {
    err.requires_login()
}

/// Routes reachable without a session.
pub fn is_public_path(path: &str) -> bool {
    matches!(path.trim_end_matches('/'), "/login" | "/signup")
}

/// Hard navigation to the login page. Used from spawned tasks, which have
/// no router context.
pub fn redirect_to_login() {
    #[cfg(feature = "hydrate")]
    {
        if let Some(window) = web_sys::window() {
            let _ = window.location().set_href(LOGIN_PATH);
        }
    }
}
