//! One record's prediction output and the analyst's verdict controls.
//!
//! SYSTEM CONTEXT
//! ==============
//! Cards are rendered by index into a shared `ReviewState`. Verdict clicks and
//! validation are reported to the owning page, which decides whether they
//! stay local (CSV review) or go to the backend (chunk review). Bug-only
//! fields edit the record in place.

#[cfg(test)]
#[path = "analysis_card_test.rs"]
mod analysis_card_test;

use leptos::prelude::*;
use records::analysis::{AnalysisRecord, ClassScore, Verdict};

use crate::components::tag_input::TagInput;
use crate::state::review::ReviewState;
use crate::util::clipboard::copy_text;
use crate::util::notify::use_notifier;

/// Shown in place of media that fails to load.
pub const IMAGE_PLACEHOLDER: &str = "data:image/svg+xml;charset=UTF-8,%3Csvg xmlns=%22http://www.w3.org/2000/svg%22 viewBox=%220 0 100 100%22%3E%3Crect width=%22100%22 height=%22100%22 fill=%22%23111%22/%3E%3Ctext x=%2250%25%22 y=%2250%25%22 font-family=%22sans-serif%22 font-size=%2212%22 fill=%22%23888%22 text-anchor=%22middle%22 dominant-baseline=%22middle%22%3EImage not available%3C/text%3E%3C/svg%3E";

/// Field text, or a dash when blank.
pub fn field_or_dash(value: &str) -> String {
    let value = value.trim();
    if value.is_empty() { "-".to_owned() } else { value.to_owned() }
}

/// Score formatted for the ranked class list.
pub fn score_label(score: &ClassScore) -> String {
    format!("{:.2}", score.score)
}

/// Whether the Bug-only fields should be shown.
pub fn shows_bug_fields(record: &AnalysisRecord) -> bool {
    record.analysis == Some(Verdict::Bug)
}

#[component]
pub fn AnalysisCard(
    index: usize,
    review: RwSignal<ReviewState>,
    on_verdict: Callback<(usize, Verdict)>,
    on_validate: Callback<usize>,
) -> impl IntoView {
    let notifier = use_notifier();
    let record = Memo::new(move |_| review.with(|r| r.record(index).cloned().unwrap_or_default()));
    let threshold = Memo::new(move |_| review.with(|r| r.threshold));
    let pending = Memo::new(move |_| review.with(|r| r.is_pending(index)));
    let broken = RwSignal::new(false);

    let media_url = move || record.with(|r| r.input_media_url.clone());
    // A new URL gets a fresh load attempt.
    Effect::new(move || {
        let _ = media_url();
        broken.set(false);
    });

    let on_preview = move |_| {
        let url = media_url();
        review.update(|r| r.open_preview(url));
    };
    let on_copy = move |_| {
        if copy_text(&media_url()) {
            notifier.info("URL copied to clipboard!");
        } else {
            notifier.error("Could not copy URL.");
        }
    };

    let reproduced = Signal::derive(move || record.with(|r| r.reproduced_urls.clone()));
    let on_reproduced = Callback::new(move |urls: Vec<String>| review.update(|r| r.set_reproduced_urls(index, urls)));

    view! {
        <div class="analysis-card">
            <div class="analysis-card__media">
                <img
                    class="analysis-card__image"
                    src=move || if broken.get() { IMAGE_PLACEHOLDER.to_owned() } else { media_url() }
                    alt="Media preview"
                    on:error=move |_| broken.set(true)
                />
                <div class="analysis-card__media-actions">
                    <button class="btn analysis-card__action" title="Preview" on:click=on_preview>
                        "⤢"
                    </button>
                    <button class="btn analysis-card__action" title="Copy URL" on:click=on_copy>
                        "🔗"
                    </button>
                </div>
            </div>

            <div class="analysis-card__data">
                <p class="analysis-card__field">
                    <span>"Result: "</span>
                    {move || record.with(|r| field_or_dash(&r.result))}
                </p>
                <p class="analysis-card__field">
                    <span>"Projection: "</span>
                    {move || record.with(|r| field_or_dash(&r.projection_layer))}
                </p>
                <p class="analysis-card__field">
                    <span>"Detection: "</span>
                    {move || record.with(|r| field_or_dash(&r.detection_layer))}
                </p>
                <p class="analysis-card__field">
                    <span>"Prediction: "</span>
                    {move || record.with(|r| field_or_dash(&r.predicted_classes))}
                </p>

                <ul class="analysis-card__classes">
                    {move || {
                        let limit = threshold.get();
                        record
                            .with(AnalysisRecord::class_scores)
                            .into_iter()
                            .map(|score| {
                                let hit = score.exceeds(limit);
                                let label = score_label(&score);
                                view! {
                                    <li class="analysis-card__class" class:analysis-card__class--hit=hit>
                                        <span class="analysis-card__class-name">{score.label}</span>
                                        <span class="analysis-card__class-score">{label}</span>
                                    </li>
                                }
                            })
                            .collect_view()
                    }}
                </ul>

                <div class="analysis-card__verdicts">
                    {Verdict::ALL
                        .into_iter()
                        .map(|verdict| {
                            view! {
                                <button
                                    class="btn analysis-card__verdict"
                                    class:analysis-card__verdict--active=move || {
                                        record.with(|r| r.analysis == Some(verdict))
                                    }
                                    disabled=move || pending.get()
                                    on:click=move |_| on_verdict.run((index, verdict))
                                >
                                    {verdict.label()}
                                </button>
                            }
                        })
                        .collect_view()}
                </div>

                <Show when=move || record.with(shows_bug_fields)>
                    <div class="analysis-card__bug-fields">
                        <div class="form-field">
                            <span class="form-field__label">"Expected Classes"</span>
                            <div class="analysis-card__expected">
                                {move || {
                                    review
                                        .with(|r| r.classes.clone())
                                        .into_iter()
                                        .map(|class| {
                                            let checked_class = class.clone();
                                            let toggled_class = class.clone();
                                            view! {
                                                <label class="analysis-card__expected-option">
                                                    <input
                                                        type="checkbox"
                                                        prop:checked=move || {
                                                            record.with(|r| r.expected_classes.contains(&checked_class))
                                                        }
                                                        on:change=move |_| {
                                                            review.update(|r| r.toggle_expected_class(index, &toggled_class));
                                                        }
                                                    />
                                                    <span>{class}</span>
                                                </label>
                                            }
                                        })
                                        .collect_view()
                                }}
                                <Show when=move || review.with(|r| r.classes.is_empty())>
                                    <span class="form-field__hint">"No classes for this model."</span>
                                </Show>
                            </div>
                        </div>

                        <div class="form-field">
                            <span class="form-field__label">"Reproduced URLs"</span>
                            <TagInput
                                values=reproduced
                                on_change=on_reproduced
                                placeholder="Enter reproduced urls..."
                            />
                        </div>

                        <label class="form-field">
                            <span class="form-field__label">"Analysed By"</span>
                            <select
                                class="form-field__select"
                                on:change=move |ev| {
                                    let analyst = event_target_value(&ev);
                                    review.update(|r| r.set_analysed_by(index, analyst));
                                }
                            >
                                <option value="" selected=move || record.with(|r| r.analysed_by.is_empty())>
                                    "Select analyst"
                                </option>
                                {move || {
                                    review
                                        .with(|r| r.analysts.clone())
                                        .into_iter()
                                        .map(|analyst| {
                                            let current = analyst.clone();
                                            view! {
                                                <option
                                                    value=analyst.clone()
                                                    selected=move || record.with(|r| r.analysed_by == current)
                                                >
                                                    {analyst.clone()}
                                                </option>
                                            }
                                        })
                                        .collect_view()
                                }}
                            </select>
                        </label>

                        <button
                            class="btn analysis-card__validate"
                            disabled=move || pending.get()
                            on:click=move |_| on_validate.run(index)
                        >
                            {move || if pending.get() { "Validating..." } else { "Validate" }}
                        </button>
                    </div>
                </Show>
            </div>
        </div>
    }
}
