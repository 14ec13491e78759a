//! Regression load test against the regression model.
//!
//! SYSTEM CONTEXT
//! ==============
//! The backend reports whether a regression run may start and which model it
//! applies to. The version already under fresh-load test is not offered.

use leptos::prelude::*;
use records::runs::{RegressionRunRequest, regression_versions};

use crate::components::model_version_picker::ModelVersionPicker;
use crate::state::catalog::CatalogState;
use crate::util::notify::use_notifier;

#[component]
pub fn RegressionLoadPage() -> impl IntoView {
    let notifier = use_notifier();
    let catalog = RwSignal::new(CatalogState::default());
    // `None` while the readiness check is in flight.
    let ready = RwSignal::new(None::<bool>);
    let preferred = RwSignal::new(None::<String>);
    let excluded = RwSignal::new(None::<String>);
    let busy = RwSignal::new(false);

    #[cfg(feature = "hydrate")]
    leptos::task::spawn_local(async move {
        match crate::net::api::fetch_regression_ready().await {
            Ok(flag) => ready.set(Some(flag)),
            Err(e) => {
                ready.set(Some(false));
                notifier.api_error(&e);
                return;
            }
        }
        match crate::net::api::fetch_regression_model().await {
            Ok(reply) => preferred.set(reply.model),
            Err(e) => log::warn!("regression model unavailable: {e}"),
        }
        match crate::net::api::fetch_selected_version().await {
            Ok(reply) => excluded.set(reply.version),
            Err(e) => log::warn!("selected version unavailable: {e}"),
        }
    });

    let version_filter = Callback::new(move |all: Vec<String>| regression_versions(&all, excluded.get().as_deref()));

    let on_run = move |_| {
        if busy.get() {
            return;
        }
        let (model, version) = catalog.with(|c| (c.model.clone(), c.version.clone()));
        let request = match RegressionRunRequest::build(model.as_deref(), version.as_deref()) {
            Ok(request) => request,
            Err(e) => {
                notifier.error(e.to_string());
                return;
            }
        };
        busy.set(true);

        #[cfg(feature = "hydrate")]
        leptos::task::spawn_local(async move {
            match crate::net::api::run_regression(&request).await {
                Ok(message) => notifier.success(message),
                Err(e) => notifier.api_error(&e),
            }
            busy.set(false);
        });
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = request;
        }
    };

    view! {
        <div class="form-page">
            <div class="form-card">
                <h2 class="form-card__title">"Regression Load Test"</h2>
                <Show when=move || ready.get() == Some(false)>
                    <p class="form-card__notice">"Regression test is not ready yet."</p>
                </Show>
                <ModelVersionPicker
                    catalog=catalog
                    version_filter=version_filter
                    preferred_model=preferred
                    disabled=Signal::derive(move || ready.get() != Some(true))
                />
                <button
                    class="btn btn--primary form-card__submit"
                    disabled=move || {
                        busy.get() || ready.get() != Some(true) || catalog.with(|c| c.selection().is_none())
                    }
                    on:click=on_run
                >
                    {move || if busy.get() { "Starting..." } else { "Run Regression Test" }}
                </button>
            </div>
        </div>
    }
}
