//! Review plumbing shared by the local CSV and chunk review pages.
//!
//! SYSTEM CONTEXT
//! ==============
//! Both pages render the same card grid over a `ReviewState` signal. They
//! differ only in how verdicts are persisted, which each page supplies as a
//! callback.

use leptos::prelude::*;
use records::RecordsError;
use records::analysis::Verdict;
use records::csv::{EXPORT_FILE_NAME, EXPORT_MIME};

use crate::components::analysis_card::AnalysisCard;
use crate::components::image_preview::ImagePreview;
use crate::state::review::ReviewState;
use crate::util::download::download_text;
use crate::util::notify::Notifier;

/// Fetch the analyst roster and review threshold.
pub fn load_review_context(review: RwSignal<ReviewState>, notifier: Notifier) {
    #[cfg(feature = "hydrate")]
    leptos::task::spawn_local(async move {
        match crate::net::api::fetch_analysts().await {
            Ok(analysts) => review.update(|r| r.analysts = analysts),
            Err(e) => notifier.api_error(&e),
        }
        match crate::net::api::fetch_threshold().await {
            Ok(threshold) => review.update(|r| r.threshold = threshold),
            Err(e) => log::warn!("threshold unavailable, keeping default: {e}"),
        }
    });
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (review, notifier);
    }
}

/// Record `model` and fetch its expected-class options.
pub fn load_model_classes(review: RwSignal<ReviewState>, model: Option<String>, notifier: Notifier) {
    review.update(|r| {
        r.model.clone_from(&model);
        r.classes.clear();
    });
    let Some(model) = model else {
        return;
    };

    #[cfg(feature = "hydrate")]
    leptos::task::spawn_local(async move {
        match crate::net::api::fetch_model_classes(&model).await {
            Ok(classes) => review.update(|r| {
                if r.model.as_deref() == Some(model.as_str()) {
                    r.classes = classes;
                }
            }),
            Err(e) => notifier.api_error(&e),
        }
    });
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (model, notifier);
    }
}

/// Submit proof validation for one Bug-tagged record.
pub fn validate_record(review: RwSignal<ReviewState>, index: usize, notifier: Notifier) {
    if review.with(|r| r.is_pending(index)) {
        return;
    }
    let request = match review.with(|r| r.proof_request(index)) {
        Ok(request) => request,
        Err(e) => {
            notifier.warning(e.to_string());
            return;
        }
    };
    review.update(|r| {
        r.pending.insert(index);
    });

    #[cfg(feature = "hydrate")]
    leptos::task::spawn_local(async move {
        match crate::net::api::validate_proof(&request).await {
            Ok(_) => notifier.success("Validation submitted"),
            Err(e) => notifier.api_error(&e),
        }
        review.update(|r| {
            r.pending.remove(&index);
        });
    });
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = request;
    }
}

/// Download the current records as CSV.
pub fn export_review(review: RwSignal<ReviewState>, notifier: Notifier) {
    let csv = match review.with(ReviewState::export_csv) {
        Ok(csv) => csv,
        Err(RecordsError::NothingToExport) => {
            notifier.warning(RecordsError::NothingToExport.to_string());
            return;
        }
        Err(e) => {
            notifier.error(e.to_string());
            return;
        }
    };
    match download_text(EXPORT_FILE_NAME, EXPORT_MIME, &csv) {
        Ok(()) => notifier.success("CSV File Downloaded Successfully!"),
        Err(message) => notifier.error(message),
    }
}

/// Card grid, export button, and preview modal for a review signal.
#[component]
pub fn ReviewGrid(
    review: RwSignal<ReviewState>,
    on_verdict: Callback<(usize, Verdict)>,
    on_validate: Callback<usize>,
    on_export: Callback<()>,
) -> impl IntoView {
    let count = Memo::new(move |_| review.with(|r| r.records.len()));
    let preview = Signal::derive(move || review.with(|r| r.preview.clone()));
    let on_close = Callback::new(move |()| review.update(ReviewState::close_preview));

    view! {
        <Show when=move || { count.get() > 0 }>
            <div class="review-grid">
                {move || {
                    (0..count.get())
                        .map(|index| {
                            view! {
                                <AnalysisCard
                                    index=index
                                    review=review
                                    on_verdict=on_verdict
                                    on_validate=on_validate
                                />
                            }
                        })
                        .collect_view()
                }}
            </div>
            <div class="review-grid__footer">
                <button class="btn btn--primary" on:click=move |_| on_export.run(())>
                    "Export Results"
                </button>
            </div>
        </Show>
        <ImagePreview url=preview on_close=on_close/>
    }
}
