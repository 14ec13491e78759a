//! `<input type="file">` helpers.
//!
//! Browser-only: callers use these inside hydrate blocks.

/// Display summary for a picked file.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PickedFile {
    pub name: String,
    pub size: u64,
}

/// Human-readable byte size (`512 B`, `1.5 KB`, `2.0 MB`).
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn format_size(bytes: u64) -> String {
    const KB: f64 = 1024.0;
    let b = bytes as f64;
    if b < KB {
        format!("{bytes} B")
    } else if b < KB * KB {
        format!("{:.1} KB", b / KB)
    } else {
        format!("{:.1} MB", b / (KB * KB))
    }
}

/// First file selected in the input that fired `ev`.
#[cfg(feature = "hydrate")]
pub fn selected_file(ev: &leptos::ev::Event) -> Option<web_sys::File> {
    use wasm_bindgen::JsCast as _;

    let input = ev.target()?.dyn_into::<web_sys::HtmlInputElement>().ok()?;
    input.files()?.get(0)
}

/// Reset a file input so picking the same file again fires `change`.
#[cfg(feature = "hydrate")]
pub fn clear_input(ev: &leptos::ev::Event) {
    use wasm_bindgen::JsCast as _;

    if let Some(input) = ev.target().and_then(|t| t.dyn_into::<web_sys::HtmlInputElement>().ok()) {
        input.set_value("");
    }
}

#[cfg(feature = "hydrate")]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn describe(file: &web_sys::File) -> PickedFile {
    PickedFile { name: file.name(), size: file.size().max(0.0) as u64 }
}

/// Read a picked file as UTF-8 text.
///
/// # Errors
///
/// Returns a message when the browser cannot read the file.
#[cfg(feature = "hydrate")]
pub async fn read_text(file: &web_sys::File) -> Result<String, String> {
    let value = wasm_bindgen_futures::JsFuture::from(file.text())
        .await
        .map_err(|_| "Failed to read file".to_owned())?;
    value.as_string().ok_or_else(|| "Failed to read file".to_owned())
}

/// Object URL for a local preview of `file`.
#[cfg(feature = "hydrate")]
pub fn object_url(file: &web_sys::File) -> Option<String> {
    web_sys::Url::create_object_url_with_blob(file).ok()
}

#[cfg(test)]
#[path = "files_test.rs"]
mod files_test;
