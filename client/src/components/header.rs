//! Top bar with the page title and logout.

#[cfg(test)]
#[path = "header_test.rs"]
mod header_test;

use leptos::prelude::*;
use leptos_router::hooks::use_location;

use crate::components::sidebar::NAV_ITEMS;
use crate::state::auth::AuthState;
use crate::util::auth::{is_public_path, redirect_to_login};

/// Title shown for a route path.
pub fn page_title(path: &str) -> &'static str {
    let path = path.trim_end_matches('/');
    match path {
        "" => "Dashboard",
        "/login" => "Login",
        "/signup" => "Sign Up",
        p if p.starts_with("/analysis/") => "Chunk Analysis",
        p => NAV_ITEMS
            .iter()
            .find(|(item, _)| *item == p)
            .map_or("Testbench", |(_, label)| label),
    }
}

#[component]
pub fn Header() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let pathname = use_location().pathname;

    let on_logout = move |_| {
        auth.update(AuthState::sign_out);
        redirect_to_login();
    };

    view! {
        <header class="app-header">
            <h1 class="app-header__title">{move || page_title(&pathname.get())}</h1>
            <Show when=move || auth.get().is_authenticated() && !is_public_path(&pathname.get())>
                <button class="btn app-header__logout" on:click=on_logout title="Logout">
                    "Logout"
                </button>
            </Show>
        </header>
    }
}
