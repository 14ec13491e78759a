//! Toast dispatch shared by pages and components.
//!
//! SYSTEM CONTEXT
//! ==============
//! `Notifier` is provided as context by `App`. It is `Copy`, so spawned
//! tasks capture it directly instead of looking up context after an await.

use std::time::Duration;

use leptos::prelude::*;

use crate::net::api::ApiError;
use crate::state::auth::AuthState;
use crate::state::toast::{ToastKind, ToastState};
use crate::util::auth::{redirect_to_login, should_redirect_login};

/// How long a toast stays visible.
pub const TOAST_TTL: Duration = Duration::from_secs(3);

#[derive(Clone, Copy)]
pub struct Notifier {
    pub toasts: RwSignal<ToastState>,
    pub auth: RwSignal<AuthState>,
}

impl Notifier {
    pub fn new(toasts: RwSignal<ToastState>, auth: RwSignal<AuthState>) -> Self {
        Self { toasts, auth }
    }

    pub fn push(self, kind: ToastKind, text: impl Into<String>) {
        let text = text.into();
        let mut id = 0;
        self.toasts.update(|t| id = t.push(kind, text));

        #[cfg(feature = "hydrate")]
        {
            let toasts = self.toasts;
            leptos::task::spawn_local(async move {
                gloo_timers::future::sleep(TOAST_TTL).await;
                toasts.try_update(|t| t.dismiss(id));
            });
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = id;
        }
    }

    pub fn success(self, text: impl Into<String>) {
        self.push(ToastKind::Success, text);
    }

    pub fn error(self, text: impl Into<String>) {
        self.push(ToastKind::Error, text);
    }

    pub fn warning(self, text: impl Into<String>) {
        self.push(ToastKind::Warning, text);
    }

    pub fn info(self, text: impl Into<String>) {
        self.push(ToastKind::Info, text);
    }

    /// End the session and go to `/login`.
    pub fn login_required(self) {
        self.auth.update(AuthState::sign_out);
        self.error("Please log in to continue.");
        redirect_to_login();
    }

    /// Toast an API failure; a 401 also ends the session.
    pub fn api_error(self, err: &ApiError) {
        if should_redirect_login(err) {
            self.login_required();
        } else {
            self.error(err.message.clone());
        }
    }
}

/// The app-wide notifier.
pub fn use_notifier() -> Notifier {
    expect_context::<Notifier>()
}
