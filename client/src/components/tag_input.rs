//! Enter-to-add list input used for recipients and reproduced URLs.

#[cfg(test)]
#[path = "tag_input_test.rs"]
mod tag_input_test;

use leptos::prelude::*;

/// Tags after adding `raw`, or `None` when it is blank or already present.
pub fn add_tag(tags: &[String], raw: &str) -> Option<Vec<String>> {
    let tag = raw.trim();
    if tag.is_empty() || tags.iter().any(|t| t == tag) {
        return None;
    }
    let mut next = tags.to_vec();
    next.push(tag.to_owned());
    Some(next)
}

pub fn remove_tag(tags: &[String], index: usize) -> Vec<String> {
    tags.iter()
        .enumerate()
        .filter(|(i, _)| *i != index)
        .map(|(_, t)| t.clone())
        .collect()
}

#[component]
pub fn TagInput(
    #[prop(into)] values: Signal<Vec<String>>,
    on_change: Callback<Vec<String>>,
    #[prop(optional, into)] placeholder: Option<String>,
    #[prop(optional, into)] disabled: Signal<bool>,
) -> impl IntoView {
    let draft = RwSignal::new(String::new());
    let placeholder = placeholder.unwrap_or_else(|| "Type and press Enter".to_owned());

    let commit = move || {
        if let Some(next) = values.with_untracked(|tags| add_tag(tags, &draft.get_untracked())) {
            on_change.run(next);
        }
        draft.set(String::new());
    };

    view! {
        <div class="tag-input">
            <div class="tag-input__tags">
                {move || {
                    values
                        .get()
                        .into_iter()
                        .enumerate()
                        .map(|(index, tag)| {
                            view! {
                                <span class="tag-input__tag">
                                    <span class="tag-input__text">{tag}</span>
                                    <button
                                        class="tag-input__remove"
                                        type="button"
                                        title="Remove"
                                        disabled=move || disabled.get()
                                        on:click=move |_| {
                                            let next = values.with_untracked(|tags| remove_tag(tags, index));
                                            on_change.run(next);
                                        }
                                    >
                                        "×"
                                    </button>
                                </span>
                            }
                        })
                        .collect_view()
                }}
            </div>
            <input
                class="tag-input__field"
                type="text"
                placeholder=placeholder
                disabled=move || disabled.get()
                prop:value=move || draft.get()
                on:input=move |ev| draft.set(event_target_value(&ev))
                on:keydown=move |ev: leptos::ev::KeyboardEvent| {
                    if ev.key() == "Enter" {
                        ev.prevent_default();
                        commit();
                    }
                }
            />
        </div>
    }
}
