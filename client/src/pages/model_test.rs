//! Ad-hoc model prediction by image URL or uploaded file.
//!
//! SYSTEM CONTEXT
//! ==============
//! Served on both `/urlmodel-test` and `/file-upload`; the route only picks
//! the initial tab. Results show ranked labels plus the raw JSON reply.

#[cfg(test)]
#[path = "model_test_test.rs"]
mod model_test_test;

use leptos::prelude::*;
use leptos_router::hooks::use_location;
use records::media::ranked_predictions;

use crate::components::model_version_picker::ModelVersionPicker;
use crate::state::catalog::CatalogState;
use crate::util::files::{PickedFile, format_size};
use crate::util::notify::use_notifier;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputTab {
    Url,
    File,
}

impl InputTab {
    /// Tab opened by a route path.
    pub fn for_path(path: &str) -> Self {
        if path.trim_end_matches('/') == "/file-upload" { Self::File } else { Self::Url }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Url => "Image URL",
            Self::File => "Image File",
        }
    }
}

/// Pretty JSON for the raw reply panel.
pub fn pretty_json(value: &serde_json::Value) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
}

#[component]
pub fn ModelTestPage() -> impl IntoView {
    let notifier = use_notifier();
    let pathname = use_location().pathname;
    let tab = RwSignal::new(InputTab::for_path(&pathname.get_untracked()));
    let catalog = RwSignal::new(CatalogState::default());
    let image_url = RwSignal::new(String::new());
    let picked = RwSignal::new(None::<PickedFile>);
    let preview = RwSignal::new(None::<String>);
    let response = RwSignal::new(None::<serde_json::Value>);
    let busy = RwSignal::new(false);

    #[cfg(feature = "hydrate")]
    let file_slot = StoredValue::new_local(None::<web_sys::File>);

    // Sidebar links switch between the two routes without remounting.
    Effect::new(move || tab.set(InputTab::for_path(&pathname.get())));

    let on_file = move |ev: leptos::ev::Event| {
        #[cfg(feature = "hydrate")]
        {
            use crate::util::files;

            let Some(file) = files::selected_file(&ev) else {
                return;
            };
            let info = files::describe(&file);
            if let Err(e) = records::media::validate_image(&info.name, info.size) {
                files::clear_input(&ev);
                notifier.error(e.to_string());
                return;
            }
            notifier.success(format!("{} uploaded successfully", info.name));
            preview.set(files::object_url(&file));
            picked.set(Some(info));
            file_slot.set_value(Some(file));
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = ev;
        }
    };

    let on_submit = move |_| {
        if busy.get() {
            return;
        }
        let (model, version) = catalog.with(|c| (c.model.clone(), c.version.clone()));
        match tab.get() {
            InputTab::Url => {
                let request =
                    match records::media::UrlPredictionRequest::build(model.as_deref(), version.as_deref(), &image_url.get()) {
                        Ok(request) => request,
                        Err(e) => {
                            notifier.error(e.to_string());
                            return;
                        }
                    };
                busy.set(true);
                #[cfg(feature = "hydrate")]
                leptos::task::spawn_local(async move {
                    match crate::net::api::predict_url(&request).await {
                        Ok(reply) => {
                            response.set(Some(reply.predictions));
                            notifier.success("Analysis completed successfully!");
                        }
                        Err(e) => notifier.api_error(&e),
                    }
                    busy.set(false);
                });
                #[cfg(not(feature = "hydrate"))]
                {
                    let _ = request;
                }
            }
            InputTab::File => {
                let (Some(model), Some(version)) = (model, version) else {
                    notifier.error("Please select a model and version.");
                    return;
                };
                #[cfg(feature = "hydrate")]
                {
                    let Some(file) = file_slot.get_value() else {
                        notifier.error("Please upload an image file.");
                        return;
                    };
                    busy.set(true);
                    leptos::task::spawn_local(async move {
                        match crate::net::api::predict_file(&file, &model, &version).await {
                            Ok(reply) => {
                                response.set(Some(reply.predictions));
                                notifier.success("Analysis completed successfully!");
                            }
                            Err(e) => notifier.api_error(&e),
                        }
                        busy.set(false);
                    });
                }
                #[cfg(not(feature = "hydrate"))]
                {
                    let _ = (model, version);
                }
            }
        }
    };

    let on_clear = move |_| {
        catalog.update(|c| {
            c.select_model(None);
        });
        image_url.set(String::new());
        picked.set(None);
        preview.set(None);
        response.set(None);
        #[cfg(feature = "hydrate")]
        file_slot.set_value(None);
        notifier.success("Inputs cleared successfully!");
    };

    let tab_button = move |which: InputTab| {
        view! {
            <button
                class="tabs__tab"
                class:tabs__tab--active=move || tab.get() == which
                on:click=move |_| tab.set(which)
            >
                {which.label()}
            </button>
        }
    };

    view! {
        <div class="form-page">
            <div class="form-card form-card--wide">
                <h2 class="form-card__title">"Model Test"</h2>
                <div class="tabs">{tab_button(InputTab::Url)} {tab_button(InputTab::File)}</div>
                <ModelVersionPicker catalog=catalog/>

                <Show
                    when=move || tab.get() == InputTab::Url
                    fallback=move || {
                        view! {
                            <label class="form-field">
                                <span class="form-field__label">"Image File"</span>
                                <input type="file" accept="image/*" on:change=on_file/>
                                <Show when=move || picked.get().is_some()>
                                    <span class="form-field__hint">
                                        {move || {
                                            picked
                                                .get()
                                                .map(|p| format!("{} ({})", p.name, format_size(p.size)))
                                                .unwrap_or_default()
                                        }}
                                    </span>
                                </Show>
                            </label>
                        }
                    }
                >
                    <label class="form-field">
                        <span class="form-field__label">"Image URL"</span>
                        <input
                            class="form-field__input"
                            type="url"
                            placeholder="https://..."
                            prop:value=move || image_url.get()
                            on:input=move |ev| image_url.set(event_target_value(&ev))
                        />
                    </label>
                </Show>

                <Show when=move || {
                    match tab.get() {
                        InputTab::Url => !image_url.get().trim().is_empty(),
                        InputTab::File => preview.get().is_some(),
                    }
                }>
                    <img
                        class="model-test__preview"
                        alt="Input preview"
                        src=move || match tab.get() {
                            InputTab::Url => image_url.get(),
                            InputTab::File => preview.get().unwrap_or_default(),
                        }
                    />
                </Show>

                <div class="form-card__actions">
                    <button class="btn btn--primary" disabled=move || busy.get() on:click=on_submit>
                        {move || if busy.get() { "Analyzing..." } else { "Run Prediction" }}
                    </button>
                    <button class="btn" disabled=move || busy.get() on:click=on_clear>
                        "Clear"
                    </button>
                </div>

                <Show when=move || response.get().is_some()>
                    <div class="model-test__results">
                        <h3>"Predictions"</h3>
                        <ul class="model-test__ranked">
                            {move || {
                                response
                                    .get()
                                    .map(|value| ranked_predictions(&value))
                                    .unwrap_or_default()
                                    .into_iter()
                                    .map(|(label, score)| {
                                        view! {
                                            <li class="model-test__row">
                                                <span class="model-test__label">{label}</span>
                                                <span class="model-test__score">{format!("{score:.4}")}</span>
                                            </li>
                                        }
                                    })
                                    .collect_view()
                            }}
                        </ul>
                        <pre class="model-test__raw">
                            {move || response.get().map(|v| pretty_json(&v)).unwrap_or_default()}
                        </pre>
                    </div>
                </Show>
            </div>
        </div>
    }
}
