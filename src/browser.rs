//! Browser Helpers
//!
//! Dialogs, downloads and file reads used by the admin screens.

use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{Blob, BlobPropertyBag, File, HtmlAnchorElement, Url};

fn window() -> Result<web_sys::Window, String> {
    web_sys::window().ok_or_else(|| "no window".to_string())
}

fn js_message(value: JsValue) -> String {
    value.as_string().unwrap_or_else(|| format!("{:?}", value))
}

/// Password prompt; `None` when the user cancels
pub fn prompt(message: &str) -> Option<String> {
    window().ok()?.prompt_with_message(message).ok().flatten()
}

pub fn scroll_to_top() {
    if let Ok(window) = window() {
        let options = web_sys::ScrollToOptions::new();
        options.set_top(0.0);
        options.set_behavior(web_sys::ScrollBehavior::Smooth);
        window.scroll_to_with_scroll_to_options(&options);
    }
}

/// Offer `text` as a JSON file download
pub fn download_text(file_name: &str, text: &str) -> Result<(), String> {
    let parts = js_sys::Array::of1(&JsValue::from_str(text));
    let options = BlobPropertyBag::new();
    options.set_type("application/json");
    let blob = Blob::new_with_str_sequence_and_options(&parts, &options).map_err(js_message)?;
    let url = Url::create_object_url_with_blob(&blob).map_err(js_message)?;

    let document = window()?.document().ok_or("no document")?;
    let anchor: HtmlAnchorElement = document
        .create_element("a")
        .map_err(js_message)?
        .dyn_into()
        .map_err(|_| "anchor element".to_string())?;
    anchor.set_href(&url);
    anchor.set_download(file_name);
    anchor.click();

    Url::revoke_object_url(&url).map_err(js_message)?;
    log::info!("offered {file_name} for download ({} bytes)", text.len());
    Ok(())
}

/// Read a user-selected file as UTF-8 text
pub async fn read_file_text(file: File) -> Result<String, String> {
    let text = JsFuture::from(file.text()).await.map_err(js_message)?;
    text.as_string().ok_or_else(|| "file is not text".to_string())
}
