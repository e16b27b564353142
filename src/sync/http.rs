//! Fetch Helpers
//!
//! Thin wrappers over `window.fetch` returning status and body text.

use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{Headers, Request, RequestCache, RequestInit, Response};

use crate::error::{SyncError, SyncResult};

pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn ok(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

fn js_error(value: JsValue) -> SyncError {
    SyncError::Network(
        value
            .as_string()
            .unwrap_or_else(|| format!("{:?}", value)),
    )
}

/// Append a `t=<millis>` query parameter so caches never answer
pub fn cache_busted(url: &str, millis: i64) -> String {
    let sep = if url.contains('?') { '&' } else { '?' };
    format!("{url}{sep}t={millis}")
}

async fn send(url: &str, init: &RequestInit) -> SyncResult<HttpResponse> {
    let window = web_sys::window().ok_or_else(|| SyncError::Network("no window".to_string()))?;
    let request = Request::new_with_str_and_init(url, init).map_err(js_error)?;
    let response: Response = JsFuture::from(window.fetch_with_request(&request))
        .await
        .map_err(js_error)?
        .dyn_into()
        .map_err(js_error)?;
    let status = response.status();
    let body = JsFuture::from(response.text().map_err(js_error)?)
        .await
        .map_err(js_error)?
        .as_string()
        .unwrap_or_default();
    Ok(HttpResponse { status, body })
}

pub async fn get(url: &str) -> SyncResult<HttpResponse> {
    let init = RequestInit::new();
    init.set_method("GET");
    init.set_cache(RequestCache::NoStore);
    send(url, &init).await
}

pub async fn put_json(url: &str, body: &str) -> SyncResult<HttpResponse> {
    let headers = Headers::new().map_err(js_error)?;
    headers.set("Content-Type", "application/json").map_err(js_error)?;

    let init = RequestInit::new();
    init.set_method("PUT");
    init.set_headers(&headers);
    init.set_body(&JsValue::from_str(body));
    send(url, &init).await
}
