//! Upload an image and get back a hosted URL.

use leptos::prelude::*;

use crate::util::clipboard::copy_text;
use crate::util::files::{PickedFile, format_size};
use crate::util::notify::use_notifier;

#[component]
pub fn GenerateImagePage() -> impl IntoView {
    let notifier = use_notifier();
    let picked = RwSignal::new(None::<PickedFile>);
    let image_url = RwSignal::new(None::<String>);
    let uploading = RwSignal::new(false);

    #[cfg(feature = "hydrate")]
    let file_slot = StoredValue::new_local(None::<web_sys::File>);

    let on_file = move |ev: leptos::ev::Event| {
        image_url.set(None);
        #[cfg(feature = "hydrate")]
        {
            use crate::util::files;

            let Some(file) = files::selected_file(&ev) else {
                return;
            };
            let info = files::describe(&file);
            if let Err(e) = records::media::validate_image(&info.name, info.size) {
                files::clear_input(&ev);
                picked.set(None);
                file_slot.set_value(None);
                notifier.error(e.to_string());
                return;
            }
            picked.set(Some(info));
            file_slot.set_value(Some(file));
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = ev;
        }
    };

    let on_upload = move |_| {
        if uploading.get() {
            return;
        }
        #[cfg(feature = "hydrate")]
        {
            let Some(file) = file_slot.get_value() else {
                notifier.warning("Please select an image to upload.");
                return;
            };
            uploading.set(true);
            leptos::task::spawn_local(async move {
                match crate::net::api::generate_image_url(&file).await {
                    Ok(reply) => match reply.url {
                        Some(url) => image_url.set(Some(url)),
                        None => notifier.error("Image upload failed. Please try again."),
                    },
                    Err(e) => notifier.api_error(&e),
                }
                uploading.set(false);
            });
        }
    };

    let on_copy = move |_| {
        let Some(url) = image_url.get() else {
            notifier.warning("No image URL to copy.");
            return;
        };
        if copy_text(&url) {
            notifier.info("URL copied!");
        } else {
            notifier.error("Failed to copy.");
        }
    };

    view! {
        <div class="form-page">
            <div class="form-card">
                <h2 class="form-card__title">"Generate Image URL"</h2>
                <label class="form-field">
                    <span class="form-field__label">"Image"</span>
                    <input type="file" accept="image/*" on:change=on_file/>
                    <Show when=move || picked.get().is_some()>
                        <span class="form-field__hint">
                            {move || {
                                picked.get().map(|p| format!("{} ({})", p.name, format_size(p.size))).unwrap_or_default()
                            }}
                        </span>
                    </Show>
                </label>
                <button
                    class="btn btn--primary form-card__submit"
                    disabled=move || uploading.get() || picked.get().is_none()
                    on:click=on_upload
                >
                    {move || if uploading.get() { "Uploading..." } else { "Upload Image" }}
                </button>
                <Show when=move || image_url.get().is_some()>
                    <div class="generated-url">
                        <img class="generated-url__preview" alt="Uploaded" src=move || image_url.get().unwrap_or_default()/>
                        <div class="generated-url__row">
                            <input
                                class="form-field__input"
                                type="text"
                                readonly=true
                                prop:value=move || image_url.get().unwrap_or_default()
                            />
                            <button class="btn" on:click=on_copy>
                                "Copy URL"
                            </button>
                        </div>
                    </div>
                </Show>
            </div>
        </div>
    }
}
