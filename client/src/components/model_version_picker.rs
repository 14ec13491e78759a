//! Model and version selects bound to a `CatalogState` signal.
//!
//! SYSTEM CONTEXT
//! ==============
//! Used by the run, model-test, and task pages. The picker loads the model
//! list on mount; versions come from the catalog itself when the backend
//! embeds them, otherwise from `all-versions/{model}`.

use leptos::prelude::*;

use crate::state::catalog::CatalogState;
use crate::util::notify::{Notifier, use_notifier};

/// Fetch the model list into `catalog`.
pub fn load_models(catalog: RwSignal<CatalogState>, notifier: Notifier) {
    #[cfg(feature = "hydrate")]
    leptos::task::spawn_local(async move {
        match crate::net::api::fetch_models().await {
            Ok(models) => catalog.update(|c| c.set_catalog(models)),
            Err(e) => {
                log::warn!("model list failed: {e}");
                notifier.api_error(&e);
            }
        }
    });
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (catalog, notifier);
    }
}

/// Select `model` and fetch its versions when the catalog does not carry them.
pub fn choose_model(catalog: RwSignal<CatalogState>, model: Option<String>, notifier: Notifier) {
    let mut needs_fetch = false;
    catalog.update(|c| needs_fetch = c.select_model(model.clone()));
    let Some(model) = model.filter(|_| needs_fetch) else {
        return;
    };

    #[cfg(feature = "hydrate")]
    leptos::task::spawn_local(async move {
        match crate::net::api::fetch_versions(&model).await {
            Ok(versions) => catalog.update(|c| c.set_versions(&model, versions)),
            Err(e) => {
                catalog.update(|c| c.version_fetch_failed(&model));
                notifier.api_error(&e);
            }
        }
    });
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (model, notifier);
    }
}

fn non_empty(value: String) -> Option<String> {
    if value.is_empty() { None } else { Some(value) }
}

#[component]
pub fn ModelVersionPicker(
    catalog: RwSignal<CatalogState>,
    /// Narrows the version list before it is shown.
    #[prop(optional)]
    version_filter: Option<Callback<Vec<String>, Vec<String>>>,
    /// Model to select once the list arrives, if nothing is selected yet.
    #[prop(optional, into)]
    preferred_model: Option<Signal<Option<String>>>,
    /// Fired after either select changes.
    #[prop(optional)]
    on_change: Option<Callback<()>>,
    #[prop(optional, into)] disabled: Signal<bool>,
) -> impl IntoView {
    let notifier = use_notifier();
    load_models(catalog, notifier);

    Effect::new(move || {
        let Some(preferred) = preferred_model.and_then(|p| p.get()) else {
            return;
        };
        if catalog.with(|c| c.wants_preferred(&preferred)) {
            choose_model(catalog, Some(preferred), notifier);
            if let Some(cb) = on_change {
                cb.run(());
            }
        }
    });

    let versions = move || {
        let all = catalog.with(|c| c.versions.clone());
        match version_filter {
            Some(filter) => filter.run(all),
            None => all,
        }
    };

    view! {
        <div class="picker">
            <label class="picker__field">
                <span class="picker__label">"Model"</span>
                <select
                    class="picker__select"
                    disabled=move || disabled.get()
                    on:change=move |ev| {
                        choose_model(catalog, non_empty(event_target_value(&ev)), notifier);
                        if let Some(cb) = on_change {
                            cb.run(());
                        }
                    }
                >
                    <option value="" selected=move || catalog.with(|c| c.model.is_none())>
                        "Select Model"
                    </option>
                    {move || {
                        catalog
                            .get()
                            .models
                            .into_iter()
                            .map(|model| {
                                let value = model.clone();
                                let selected = move || catalog.with(|c| c.model.as_deref() == Some(value.as_str()));
                                view! {
                                    <option value=model.clone() selected=selected>
                                        {model.clone()}
                                    </option>
                                }
                            })
                            .collect_view()
                    }}
                </select>
            </label>
            <label class="picker__field">
                <span class="picker__label">"Version"</span>
                <select
                    class="picker__select"
                    disabled=move || disabled.get() || catalog.with(|c| c.model.is_none() || c.loading_versions)
                    on:change=move |ev| {
                        catalog.update(|c| c.select_version(non_empty(event_target_value(&ev))));
                        if let Some(cb) = on_change {
                            cb.run(());
                        }
                    }
                >
                    <option value="" selected=move || catalog.with(|c| c.version.is_none())>
                        {move || {
                            if catalog.with(|c| c.loading_versions) { "Loading..." } else { "Select Version" }
                        }}
                    </option>
                    {move || {
                        versions()
                            .into_iter()
                            .map(|version| {
                                let value = version.clone();
                                let selected = move || catalog.with(|c| c.version.as_deref() == Some(value.as_str()));
                                view! {
                                    <option value=version.clone() selected=selected>
                                        {version.clone()}
                                    </option>
                                }
                            })
                            .collect_view()
                    }}
                </select>
            </label>
        </div>
    }
}
