//! `fetch`-backed [`HttpTransport`].

use async_trait::async_trait;
use calc_client::{HttpRequest, HttpResponse, HttpTransport, TransportError};
use gloo_utils::window;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Headers, Request, RequestInit, RequestMode, Response};

use crate::dom::Elements;

/// API base URL: the `#baseUrl` input when present and non-empty, otherwise
/// the page origin.
pub fn base_url(els: &Elements) -> String {
    if let Some(input) = &els.base_url {
        let v = input.value().trim().to_string();
        if !v.is_empty() {
            return v;
        }
    }
    window().location().origin().unwrap_or_default()
}

pub struct FetchTransport;

#[async_trait(?Send)]
impl HttpTransport for FetchTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        fetch(&request)
            .await
            .map_err(|err| TransportError(js_error_message(&err)))
    }
}

async fn fetch(request: &HttpRequest) -> Result<HttpResponse, JsValue> {
    let opts = RequestInit::new();
    opts.set_method(request.method.as_str());
    opts.set_mode(RequestMode::Cors);

    let headers = Headers::new()?;
    for (name, value) in &request.headers {
        headers.set(name, value)?;
    }
    opts.set_headers(&headers);

    if let Some(body) = &request.body {
        opts.set_body(&JsValue::from_str(body));
    }

    let req = Request::new_with_str_and_init(&request.url, &opts)?;
    let resp: Response = JsFuture::from(window().fetch_with_request(&req))
        .await?
        .dyn_into()?;

    let text = JsFuture::from(resp.text()?).await?;

    Ok(HttpResponse::new(resp.status(), text.as_string().unwrap_or_default()))
}

/// `Error.message` for thrown JS errors ("Failed to fetch"), debug output otherwise.
fn js_error_message(err: &JsValue) -> String {
    match err.dyn_ref::<js_sys::Error>() {
        Some(e) => String::from(e.message()),
        None => err.as_string().unwrap_or_else(|| format!("{err:?}")),
    }
}
