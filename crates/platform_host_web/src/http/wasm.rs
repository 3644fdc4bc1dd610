use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{Blob, Headers, Request, RequestInit, Response};

use super::{HttpRequest, HttpResponse};

pub(crate) fn js_error_to_string(err: JsValue) -> String {
    err.as_string().unwrap_or_else(|| format!("{err:?}"))
}

async fn fetch(request: &Request) -> Result<Response, String> {
    let window = web_sys::window().ok_or_else(|| "window unavailable".to_string())?;
    JsFuture::from(window.fetch_with_request(request))
        .await
        .map_err(js_error_to_string)?
        .dyn_into::<Response>()
        .map_err(|_| "fetch returned a non-Response value".to_string())
}

pub(super) async fn send(request: HttpRequest<'_>) -> Result<HttpResponse, String> {
    let headers = Headers::new().map_err(js_error_to_string)?;
    if request.body.is_some() {
        headers
            .set("Content-Type", request.content_type)
            .map_err(js_error_to_string)?;
    }
    if let Some(token) = request.bearer_token {
        headers
            .set("Authorization", &format!("Bearer {token}"))
            .map_err(js_error_to_string)?;
    }

    let init = RequestInit::new();
    init.set_method(request.method.as_str());
    init.set_headers(&headers);
    if let Some(body) = request.body.as_deref() {
        init.set_body(&JsValue::from_str(body));
    }

    let js_request =
        Request::new_with_str_and_init(request.url, &init).map_err(js_error_to_string)?;
    let response = fetch(&js_request).await?;
    let status = response.status();
    let text = JsFuture::from(response.text().map_err(js_error_to_string)?)
        .await
        .map_err(js_error_to_string)?;

    Ok(HttpResponse {
        status,
        body: text.as_string().unwrap_or_default(),
    })
}

/// Fetches `url` and materializes the body as a [`Blob`].
pub(crate) async fn fetch_blob(url: &str) -> Result<Blob, String> {
    let request = Request::new_with_str(url).map_err(js_error_to_string)?;
    let response = fetch(&request).await?;
    if !response.ok() {
        return Err(format!("HTTP {} fetching {url}", response.status()));
    }
    JsFuture::from(response.blob().map_err(js_error_to_string)?)
        .await
        .map_err(js_error_to_string)?
        .dyn_into::<Blob>()
        .map_err(|_| "response body is not a blob".to_string())
}
