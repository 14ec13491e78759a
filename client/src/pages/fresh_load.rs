//! Fresh load test: pick a model version, recipients, and expected score.
//!
//! SYSTEM CONTEXT
//! ==============
//! The expected score starts from the backend default. Recipients persist in
//! session storage so a rerun in the same tab keeps the list.

#[cfg(test)]
#[path = "fresh_load_test.rs"]
mod fresh_load_test;

use leptos::prelude::*;
use records::runs::{DEFAULT_EXPECTED_SCORE, StartOutcome, StartProcessRequest, parse_expected_score};

use crate::components::model_version_picker::ModelVersionPicker;
use crate::components::tag_input::TagInput;
use crate::state::catalog::CatalogState;
use crate::util::notify::{Notifier, use_notifier};
use crate::util::storage;

/// Session-storage key for the recipient list.
pub const RECIPIENTS_KEY: &str = "fresh-load.recipients";

/// Inline message for the expected-score field, if invalid.
pub fn score_hint(raw: &str) -> Option<String> {
    parse_expected_score(raw).err().map(|e| e.to_string())
}

/// Toast the result of a start-process call.
pub fn report_outcome(outcome: StartOutcome, notifier: Notifier) {
    match outcome {
        StartOutcome::Started(message) => notifier.success(message),
        StartOutcome::LoginRequired => notifier.login_required(),
        StartOutcome::Rejected(messages) => {
            for message in messages {
                notifier.error(message);
            }
        }
        StartOutcome::Failed(message) => notifier.error(message),
    }
}

#[component]
pub fn FreshLoadPage() -> impl IntoView {
    let notifier = use_notifier();
    let catalog = RwSignal::new(CatalogState::default());
    let recipients = RwSignal::new(Vec::<String>::new());
    let score = RwSignal::new(DEFAULT_EXPECTED_SCORE.to_owned());
    let busy = RwSignal::new(false);

    // Storage is read after hydration so the server render stays empty.
    Effect::new(move || {
        if let Some(saved) = storage::load_json::<Vec<String>>(RECIPIENTS_KEY) {
            recipients.set(saved);
        }
    });

    #[cfg(feature = "hydrate")]
    leptos::task::spawn_local(async move {
        match crate::net::api::fetch_expected_score().await {
            Ok(reply) => score.set(reply.or_default()),
            Err(e) => log::warn!("expected score unavailable: {e}"),
        }
    });

    let on_recipients = Callback::new(move |next: Vec<String>| {
        storage::save_json(RECIPIENTS_KEY, &next);
        recipients.set(next);
    });

    let on_execute = move |_| {
        if busy.get() {
            return;
        }
        let (model, version) = catalog.with(|c| (c.model.clone(), c.version.clone()));
        let request = match StartProcessRequest::build(model.as_deref(), version.as_deref(), &recipients.get(), &score.get()) {
            Ok(request) => request,
            Err(e) => {
                notifier.error(e.to_string());
                return;
            }
        };
        busy.set(true);

        #[cfg(feature = "hydrate")]
        leptos::task::spawn_local(async move {
            match crate::net::api::start_process(&request).await {
                Ok(outcome) => report_outcome(outcome, notifier),
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
                <h2 class="form-card__title">"Fresh Load Test Configuration"</h2>
                <ModelVersionPicker catalog=catalog/>
                <div class="form-field">
                    <span class="form-field__label">"Recipients"</span>
                    <TagInput
                        values=recipients
                        on_change=on_recipients
                        placeholder="Enter email and press Enter"
                    />
                </div>
                <label class="form-field">
                    <span class="form-field__label">"Expected Score"</span>
                    <input
                        class="form-field__input"
                        type="number"
                        step="0.01"
                        min="0"
                        max="1"
                        prop:value=move || score.get()
                        on:input=move |ev| score.set(event_target_value(&ev))
                    />
                    <Show when=move || score_hint(&score.get()).is_some()>
                        <span class="form-field__error">{move || score_hint(&score.get()).unwrap_or_default()}</span>
                    </Show>
                </label>
                <button
                    class="btn btn--primary form-card__submit"
                    disabled=move || busy.get() || catalog.with(|c| c.selection().is_none())
                    on:click=on_execute
                >
                    {move || if busy.get() { "Starting..." } else { "Execute Load Test" }}
                </button>
            </div>
        </div>
    }
}
