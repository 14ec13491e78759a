//! Local CSV review: load a prediction dump, tag records, export results.
//!
//! SYSTEM CONTEXT
//! ==============
//! Nothing here is persisted server-side except proof validation. Verdicts
//! live in the page's `ReviewState` until exported.

use leptos::prelude::*;
use records::analysis::Verdict;

use crate::components::model_version_picker::load_models;
use crate::pages::review_actions::{ReviewGrid, export_review, load_model_classes, load_review_context, validate_record};
use crate::state::catalog::CatalogState;
use crate::state::review::ReviewState;
use crate::util::notify::use_notifier;

#[component]
pub fn AnalysisPage() -> impl IntoView {
    let notifier = use_notifier();
    let catalog = RwSignal::new(CatalogState::default());
    let review = RwSignal::new(ReviewState::default());
    let model_selected = move || review.with(|r| r.model.is_some());

    load_models(catalog, notifier);
    load_review_context(review, notifier);

    let on_model = move |ev: leptos::ev::Event| {
        let value = event_target_value(&ev);
        let model = if value.is_empty() { None } else { Some(value) };
        load_model_classes(review, model, notifier);
    };

    let on_upload = move |ev: leptos::ev::Event| {
        #[cfg(feature = "hydrate")]
        {
            use crate::util::files;

            let Some(file) = files::selected_file(&ev) else {
                return;
            };
            files::clear_input(&ev);
            let picked = files::describe(&file);
            if let Err(e) = records::media::validate_csv_name(&picked.name) {
                notifier.error(e.to_string());
                return;
            }
            review.update(|r| r.loading = true);
            leptos::task::spawn_local(async move {
                let parsed = files::read_text(&file)
                    .await
                    .and_then(|text| records::csv::parse_records(&text).map_err(|e| e.to_string()));
                match parsed {
                    Ok(rows) => {
                        let count = rows.len();
                        review.update(|r| r.load_records(rows));
                        notifier.success(format!("{count} records loaded"));
                    }
                    Err(message) => {
                        log::warn!("csv import failed: {message}");
                        notifier.error(message);
                    }
                }
                review.update(|r| r.loading = false);
            });
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = ev;
        }
    };

    let on_verdict = Callback::new(move |(index, verdict): (usize, Verdict)| {
        review.update(|r| {
            r.apply_verdict(index, verdict);
        });
    });
    let on_validate = Callback::new(move |index: usize| validate_record(review, index, notifier));
    let on_export = Callback::new(move |()| export_review(review, notifier));

    view! {
        <div class="review-page">
            <div class="review-page__controls">
                <select class="picker__select" on:change=on_model>
                    <option value="">"Select Model"</option>
                    {move || {
                        catalog
                            .get()
                            .models
                            .into_iter()
                            .map(|model| view! { <option value=model.clone()>{model.clone()}</option> })
                            .collect_view()
                    }}
                </select>
                <label
                    class="btn btn--primary review-page__upload"
                    class:btn--disabled=move || !model_selected()
                >
                    {move || if review.with(|r| r.loading) { "Loading..." } else { "Upload CSV" }}
                    <input
                        type="file"
                        accept=".csv"
                        hidden=true
                        disabled=move || !model_selected() || review.with(|r| r.loading)
                        on:change=on_upload
                    />
                </label>
            </div>
            <ReviewGrid review=review on_verdict=on_verdict on_validate=on_validate on_export=on_export/>
        </div>
    }
}
