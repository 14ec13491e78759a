//! Left navigation rail.
//!
//! SYSTEM CONTEXT
//! ==============
//! Rendered once by `App` inside the router. Hidden on the login and signup
//! routes, which have no session to navigate with.

#[cfg(test)]
#[path = "sidebar_test.rs"]
mod sidebar_test;

use leptos::prelude::*;
use leptos_router::hooks::use_location;

use crate::util::auth::is_public_path;

/// Navigation entries as `(path, label)`.
pub const NAV_ITEMS: [(&str, &str); 8] = [
    ("/fresh-load", "Fresh Load Test"),
    ("/analysis", "Analysis"),
    ("/analysis-verification", "Analysis Validation"),
    ("/regression-load", "Regression Load Test"),
    ("/urlmodel-test", "Url Model Test"),
    ("/file-upload", "File Upload Model Test"),
    ("/generate-image", "Generate Image Url"),
    ("/task", "Task"),
];

/// Nav entry that owns `path`. Chunk review belongs to the validation list.
pub fn active_nav(path: &str) -> Option<&'static str> {
    let path = match path.trim_end_matches('/') {
        "" => "/",
        p => p,
    };
    if let Some((item, _)) = NAV_ITEMS.iter().find(|(p, _)| *p == path) {
        return Some(item);
    }
    if path.starts_with("/analysis/") {
        return Some("/analysis-verification");
    }
    None
}

#[component]
pub fn Sidebar() -> impl IntoView {
    let location = use_location();
    let pathname = location.pathname;

    view! {
        <Show when=move || !is_public_path(&pathname.get())>
            <nav class="sidebar">
                <a href="/" class="sidebar__logo">
                    "Utility Tools"
                </a>
                <ul class="sidebar__items">
                    {NAV_ITEMS
                        .iter()
                        .map(|(path, label)| {
                            let path = *path;
                            view! {
                                <li class="sidebar__item">
                                    <a
                                        href=path
                                        class="sidebar__link"
                                        class:sidebar__link--active=move || {
                                            active_nav(&pathname.get()) == Some(path)
                                        }
                                    >
                                        {*label}
                                    </a>
                                </li>
                            }
                        })
                        .collect_view()}
                </ul>
            </nav>
        </Show>
    }
}
