//! Chunk inventory: analyst assignment, merge, and links into chunk review.

#[cfg(test)]
#[path = "chunks_test.rs"]
mod chunks_test;

use leptos::prelude::*;
use records::endpoints::encode_segment;

use crate::state::chunks::ChunksState;
use crate::util::notify::{Notifier, use_notifier};

/// Client route reviewing `file`.
pub fn chunk_review_href(file: &str) -> String {
    format!("/analysis/{}", encode_segment(file))
}

/// CSS modifier for a chunk status badge.
pub fn status_class(status: &str) -> String {
    let status = status.trim().to_ascii_lowercase().replace(' ', "-");
    if status.is_empty() { "chunk-card__status".to_owned() } else { format!("chunk-card__status chunk-card__status--{status}") }
}

/// Refresh the chunk list, analyst roster, and merge readiness.
fn load_chunks(chunks: RwSignal<ChunksState>, notifier: Notifier) {
    chunks.update(|c| c.loading = true);

    #[cfg(feature = "hydrate")]
    leptos::task::spawn_local(async move {
        match crate::net::api::fetch_chunks().await {
            Ok(items) => chunks.update(|c| c.set_items(items)),
            Err(e) => {
                chunks.update(|c| c.loading = false);
                notifier.api_error(&e);
                return;
            }
        }
        match crate::net::api::fetch_analysts().await {
            Ok(analysts) => chunks.update(|c| c.analysts = analysts),
            Err(e) => log::warn!("analyst roster unavailable: {e}"),
        }
        match crate::net::api::fetch_can_merge().await {
            Ok(flag) => chunks.update(|c| c.can_merge = flag),
            Err(e) => log::warn!("merge readiness unavailable: {e}"),
        }
    });
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = notifier;
    }
}

#[component]
pub fn ChunksPage() -> impl IntoView {
    let notifier = use_notifier();
    let chunks = RwSignal::new(ChunksState::default());
    let selected_model = RwSignal::new(None::<String>);

    load_chunks(chunks, notifier);

    #[cfg(feature = "hydrate")]
    leptos::task::spawn_local(async move {
        match crate::net::api::fetch_selected_model().await {
            Ok(reply) => selected_model.set(reply.model),
            Err(e) => log::warn!("selected model unavailable: {e}"),
        }
    });

    let assign = move |file: String, analyst: String| {
        let mut request = None;
        chunks.update(|c| request = c.assign(&file, &analyst));
        let Some(request) = request else {
            return;
        };

        #[cfg(feature = "hydrate")]
        leptos::task::spawn_local(async move {
            match crate::net::api::assign_analyst(&request).await {
                Ok(_) => notifier.success(format!("{} assigned to {}", request.analyst, request.chunk)),
                Err(e) => {
                    notifier.api_error(&e);
                    load_chunks(chunks, notifier);
                }
            }
        });
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = request;
        }
    };

    let on_merge = move |_| {
        if !chunks.with(ChunksState::merge_enabled) {
            return;
        }
        chunks.update(|c| c.merging = true);

        #[cfg(feature = "hydrate")]
        leptos::task::spawn_local(async move {
            match crate::net::api::merge().await {
                Ok(message) => notifier.success(message),
                Err(e) => notifier.api_error(&e),
            }
            chunks.update(|c| c.merging = false);
            load_chunks(chunks, notifier);
        });
    };

    view! {
        <div class="chunks-page">
            <div class="chunks-page__header">
                <h2>"Chunks"</h2>
                <Show when=move || selected_model.get().is_some()>
                    <span class="chunks-page__model">
                        "Model: "
                        {move || selected_model.get().unwrap_or_default()}
                    </span>
                </Show>
            </div>
            <Show
                when=move || !chunks.with(|c| c.loading)
                fallback=move || view! { <p class="chunks-page__loading">"Loading chunks..."</p> }
            >
                <div class="chunks-page__grid">
                    {move || {
                        let state = chunks.get();
                        let analysts = state.analysts.clone();
                        state
                            .items
                            .into_iter()
                            .map(|chunk| {
                                let file = chunk.file.clone();
                                let current = chunk.analyst.clone();
                                let options = analysts
                                    .iter()
                                    .map(|analyst| {
                                        let selected = *analyst == current;
                                        view! {
                                            <option value=analyst.clone() selected=selected>
                                                {analyst.clone()}
                                            </option>
                                        }
                                    })
                                    .collect_view();
                                view! {
                                    <div class="chunk-card">
                                        <a class="chunk-card__link" href=chunk_review_href(&chunk.file)>
                                            <p><strong>"File: "</strong>{chunk.file.clone()}</p>
                                            <p><strong>"Analyst: "</strong>{chunk.analyst.clone()}</p>
                                            <p>
                                                <strong>"Status: "</strong>
                                                <span class=status_class(&chunk.status)>{chunk.status.clone()}</span>
                                            </p>
                                        </a>
                                        <label class="form-field chunk-card__assign">
                                            <span class="form-field__label">"Assign analyst"</span>
                                            <select
                                                class="form-field__select"
                                                on:change=move |ev| assign(file.clone(), event_target_value(&ev))
                                            >
                                                <option value="" selected=current.is_empty()>"Unassigned"</option>
                                                {options}
                                            </select>
                                        </label>
                                    </div>
                                }
                            })
                            .collect_view()
                    }}
                </div>
                <Show when=move || chunks.with(|c| c.items.is_empty())>
                    <p class="chunks-page__empty">"No chunks available."</p>
                </Show>
            </Show>
            <div class="chunks-page__footer">
                <button
                    class="btn btn--primary"
                    disabled=move || !chunks.with(ChunksState::merge_enabled)
                    on:click=on_merge
                >
                    {move || if chunks.with(|c| c.merging) { "Merging..." } else { "Merge Chunks" }}
                </button>
            </div>
        </div>
    }
}
