//! Server-backed review of one chunk.
//!
//! SYSTEM CONTEXT
//! ==============
//! Verdict clicks apply locally, then persist through the verdict endpoints.
//! A failed update rolls the record back; a successful one refetches that
//! record so the card shows what the backend stored. Bug is only stored by
//! proof validation, so a Bug click keeps its local state.

use leptos::prelude::*;
use leptos_router::hooks::use_params_map;
use records::analysis::Verdict;

use crate::pages::review_actions::{ReviewGrid, export_review, load_model_classes, load_review_context, validate_record};
use crate::state::review::ReviewState;
use crate::util::notify::{Notifier, use_notifier};

/// Fetch the chunk's records and model.
fn load_chunk(review: RwSignal<ReviewState>, chunk: String, notifier: Notifier) {
    review.update(|r| r.reset_for_chunk(chunk.clone()));

    #[cfg(feature = "hydrate")]
    leptos::task::spawn_local(async move {
        match crate::net::api::fetch_chunk(&chunk, None).await {
            Ok(detail) => {
                review.update(|r| {
                    r.load_records(detail.data);
                    r.loading = false;
                });
                load_model_classes(review, detail.model, notifier);
            }
            Err(e) => {
                review.update(|r| r.loading = false);
                notifier.api_error(&e);
            }
        }
    });
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (chunk, notifier);
    }
}

/// Apply a verdict click and persist it.
fn change_verdict(review: RwSignal<ReviewState>, index: usize, verdict: Verdict, notifier: Notifier) {
    if review.with(|r| r.is_pending(index)) {
        return;
    }
    let Some(change) = review.with(|r| r.verdict_change(index)) else {
        return;
    };
    let mut applied = None;
    review.update(|r| {
        applied = r.apply_verdict(index, verdict);
        if applied.is_some() {
            r.pending.insert(index);
        }
    });
    let Some(transition) = applied else {
        return;
    };

    #[cfg(feature = "hydrate")]
    leptos::task::spawn_local(async move {
        match crate::net::api::change_verdict(transition.next, &change).await {
            Ok(_) if transition.next != Some(Verdict::Bug) => {
                match crate::net::api::fetch_chunk(&change.chunk, Some(&change.input_media_url)).await {
                    Ok(detail) => {
                        if let Some(fresh) = detail.data.into_iter().find(|r| r.input_media_url == change.input_media_url) {
                            review.update(|r| {
                                r.update_record(index, |record| {
                                    if record.input_media_url == fresh.input_media_url {
                                        *record = fresh;
                                    }
                                });
                            });
                        }
                    }
                    Err(e) => log::warn!("record refresh failed: {e}"),
                }
            }
            Ok(_) => {}
            Err(e) => {
                review.update(|r| r.revert(transition));
                notifier.api_error(&e);
            }
        }
        review.update(|r| {
            r.pending.remove(&index);
        });
    });
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (change, transition, notifier);
    }
}

#[component]
pub fn ChunkAnalysisPage() -> impl IntoView {
    let notifier = use_notifier();
    let params = use_params_map();
    let chunk = Memo::new(move |_| params.with(|p| p.get("chunk").unwrap_or_default()));
    let review = RwSignal::new(ReviewState::default());

    load_review_context(review, notifier);
    Effect::new(move || {
        let name = chunk.get();
        if name.trim().is_empty() {
            notifier.error(records::RecordsError::MissingChunk.to_string());
            return;
        }
        load_chunk(review, name, notifier);
    });

    let on_verdict = Callback::new(move |(index, verdict): (usize, Verdict)| change_verdict(review, index, verdict, notifier));
    let on_validate = Callback::new(move |index: usize| validate_record(review, index, notifier));
    let on_export = Callback::new(move |()| export_review(review, notifier));

    view! {
        <div class="review-page">
            <div class="review-page__controls">
                <a class="btn" href="/analysis-verification">"Back to chunks"</a>
                <span class="review-page__chunk">{move || chunk.get()}</span>
                <span class="review-page__model">
                    {move || review.with(|r| r.model.clone().unwrap_or_default())}
                </span>
            </div>
            <Show when=move || review.with(|r| r.loading)>
                <p class="review-page__loading">"Loading chunk..."</p>
            </Show>
            <Show when=move || review.with(|r| !r.loading && r.records.is_empty())>
                <p class="review-page__empty">"No records in this chunk."</p>
            </Show>
            <ReviewGrid review=review on_verdict=on_verdict on_validate=on_validate on_export=on_export/>
        </div>
    }
}
