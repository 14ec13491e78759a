//! Full-screen image preview modal.

use leptos::prelude::*;

#[component]
pub fn ImagePreview(#[prop(into)] url: Signal<Option<String>>, on_close: Callback<()>) -> impl IntoView {
    view! {
        <Show when=move || url.get().is_some()>
            <div
                class="image-preview"
                tabindex="-1"
                on:click=move |_| on_close.run(())
                on:keydown=move |ev: leptos::ev::KeyboardEvent| {
                    if ev.key() == "Escape" {
                        on_close.run(());
                    }
                }
            >
                <img
                    class="image-preview__img"
                    src=move || url.get().unwrap_or_default()
                    alt="Fullscreen preview"
                    on:click=|ev| ev.stop_propagation()
                />
                <button class="image-preview__close" title="Close" on:click=move |_| on_close.run(())>
                    "×"
                </button>
            </div>
        </Show>
    }
}
