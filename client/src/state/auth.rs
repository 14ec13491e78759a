//! Auth-session state for the current browser tab.
//!
//! SYSTEM CONTEXT
//! ==============
//! The token is the only session fact the UI tracks. It is mirrored from
//! `sessionStorage` on startup and cleared on logout or a 401.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AuthState {
    pub token: Option<String>,
}

impl AuthState {
    /// Current session from storage.
    pub fn from_storage() -> Self {
        Self { token: crate::util::storage::load_token() }
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    /// Record a fresh token and persist it for the tab session.
    pub fn sign_in(&mut self, token: String) {
        crate::util::storage::save_token(&token);
        self.token = Some(token);
    }

    pub fn sign_out(&mut self) {
        crate::util::storage::clear_token();
        self.token = None;
    }
}
