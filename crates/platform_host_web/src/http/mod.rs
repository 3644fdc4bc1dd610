//! `fetch` transport shared by the REST adapters and the asset downloader.
//!
//! Calls route to target-specific implementations; off the browser every request fails with a
//! transport error so native builds and tests stay linkable.

#[cfg(not(target_arch = "wasm32"))]
mod non_wasm;
#[cfg(target_arch = "wasm32")]
mod wasm;

#[cfg(not(target_arch = "wasm32"))]
use non_wasm as imp;
#[cfg(target_arch = "wasm32")]
use wasm as imp;

use serde::Deserialize;

pub(crate) const JSON_CONTENT_TYPE: &str = "application/json";
pub(crate) const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Method {
    Get,
    Post,
    Patch,
}

impl Method {
    pub(crate) const fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Patch => "PATCH",
        }
    }
}

#[derive(Debug, Clone)]
pub(crate) struct HttpRequest<'a> {
    pub method: Method,
    pub url: &'a str,
    pub body: Option<String>,
    pub content_type: &'static str,
    pub bearer_token: Option<&'a str>,
}

impl<'a> HttpRequest<'a> {
    pub(crate) fn get(url: &'a str) -> Self {
        Self {
            method: Method::Get,
            url,
            body: None,
            content_type: JSON_CONTENT_TYPE,
            bearer_token: None,
        }
    }

    pub(crate) fn with_body(
        method: Method,
        url: &'a str,
        body: String,
        content_type: &'static str,
    ) -> Self {
        Self {
            method,
            url,
            body: Some(body),
            content_type,
            bearer_token: None,
        }
    }

    pub(crate) fn bearer(mut self, token: &'a str) -> Self {
        self.bearer_token = Some(token);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct HttpResponse {
    pub status: u16,
    pub body: String,
}

#[derive(Deserialize)]
struct ApiErrorEnvelope {
    error: ApiErrorBody,
}

#[derive(Deserialize)]
struct ApiErrorBody {
    message: String,
}

impl HttpResponse {
    pub(crate) fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Google API error message when present, otherwise the bare status.
    pub(crate) fn error_message(&self) -> String {
        match serde_json::from_str::<ApiErrorEnvelope>(&self.body) {
            Ok(envelope) => format!("HTTP {}: {}", self.status, envelope.error.message),
            Err(_) => format!("HTTP {}", self.status),
        }
    }
}

pub(crate) async fn send(request: HttpRequest<'_>) -> Result<HttpResponse, String> {
    imp::send(request).await
}

#[cfg(target_arch = "wasm32")]
pub(crate) use imp::{fetch_blob, js_error_to_string};
