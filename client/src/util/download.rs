//! Browser file download of generated text.

/// Offer `content` to the user as a file download.
///
/// # Errors
///
/// Returns a message when the browser refuses to create the blob or link.
pub fn download_text(file_name: &str, mime: &str, content: &str) -> Result<(), String> {
    #[cfg(feature = "hydrate")]
    {
        use wasm_bindgen::JsCast as _;

        let parts = js_sys::Array::of1(&wasm_bindgen::JsValue::from_str(content));
        let options = web_sys::BlobPropertyBag::new();
        options.set_type(mime);
        let blob = web_sys::Blob::new_with_str_sequence_and_options(&parts, &options)
            .map_err(|_| "Could not create download".to_owned())?;
        let url = web_sys::Url::create_object_url_with_blob(&blob)
            .map_err(|_| "Could not create download".to_owned())?;

        let document = web_sys::window()
            .and_then(|w| w.document())
            .ok_or_else(|| "No document available".to_owned())?;
        let anchor = document
            .create_element("a")
            .map_err(|_| "Could not create download link".to_owned())?
            .dyn_into::<web_sys::HtmlAnchorElement>()
            .map_err(|_| "Could not create download link".to_owned())?;
        anchor.set_href(&url);
        anchor.set_download(file_name);
        anchor.click();
        let _ = web_sys::Url::revoke_object_url(&url);
        Ok(())
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (file_name, mime, content);
        Err("Downloads are only available in the browser".to_owned())
    }
}
