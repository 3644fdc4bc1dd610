//! Favorites document store over the Firestore REST API.
//!
//! Watches are implemented by fetching once on subscribe and then polling on an interval.
//! Snapshots are de-duplicated per subscription so a poll that echoes a local write is not
//! delivered twice. Local merges notify watchers of the same path as soon as the write lands.

use std::{
    cell::RefCell,
    collections::HashMap,
    rc::Rc,
};

use platform_host::{
    BackendConfig, DocumentFuture, DocumentStore, FavoritesDocument, Listener, ListenerRegistry,
    Subscription,
};
use serde::Deserialize;
use serde_json::json;

use crate::{
    auth::WebAuthService,
    http::{self, HttpRequest, HttpResponse, Method, JSON_CONTENT_TYPE},
};

const FIRESTORE_BASE_URL: &str = "https://firestore.googleapis.com/v1";

/// REST URL of the document at `path` in the default database of `project_id`.
pub fn document_url(project_id: &str, path: &str) -> String {
    format!("{FIRESTORE_BASE_URL}/projects/{project_id}/databases/(default)/documents/{path}")
}

/// PATCH URL that upserts only the `ids` field.
pub fn merge_url(project_id: &str, path: &str) -> String {
    format!("{}?updateMask.fieldPaths=ids", document_url(project_id, path))
}

/// Encodes the favorites document as a Firestore `Document` body.
pub fn encode_favorites(document: &FavoritesDocument) -> serde_json::Value {
    let values: Vec<serde_json::Value> = document
        .ids
        .iter()
        .map(|id| json!({ "stringValue": id }))
        .collect();
    json!({ "fields": { "ids": { "arrayValue": { "values": values } } } })
}

#[derive(Debug, Default, Deserialize)]
struct WireDocument {
    #[serde(default)]
    fields: WireFields,
}

#[derive(Debug, Default, Deserialize)]
struct WireFields {
    #[serde(default)]
    ids: Option<WireArrayField>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireArrayField {
    #[serde(default)]
    array_value: WireArray,
}

#[derive(Debug, Default, Deserialize)]
struct WireArray {
    #[serde(default)]
    values: Vec<WireValue>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireValue {
    #[serde(default)]
    string_value: Option<String>,
}

/// Decodes a Firestore `Document` body; absent fields and non-string entries are dropped.
///
/// # Errors
///
/// Returns an error when `body` is not a JSON document.
pub fn decode_favorites(body: &str) -> Result<FavoritesDocument, String> {
    let wire: WireDocument =
        serde_json::from_str(body).map_err(|e| format!("malformed favorites document: {e}"))?;
    let ids = wire
        .fields
        .ids
        .map(|field| {
            field
                .array_value
                .values
                .into_iter()
                .filter_map(|value| value.string_value)
                .collect()
        })
        .unwrap_or_default();
    Ok(FavoritesDocument { ids })
}

fn read_outcome(response: &HttpResponse) -> Result<Option<FavoritesDocument>, String> {
    if response.status == 404 {
        return Ok(None);
    }
    if !response.is_success() {
        return Err(response.error_message());
    }
    decode_favorites(&response.body).map(Some)
}

/// Remembers the last snapshot a watcher saw and rejects repeats.
#[derive(Debug, Default)]
struct SnapshotFilter {
    last: Option<Option<FavoritesDocument>>,
}

impl SnapshotFilter {
    fn accept(&mut self, snapshot: &Option<FavoritesDocument>) -> bool {
        if self.last.as_ref() == Some(snapshot) {
            return false;
        }
        self.last = Some(snapshot.clone());
        true
    }
}

struct StoreInner {
    project_id: String,
    poll_interval_ms: u32,
    auth: WebAuthService,
    watchers: RefCell<HashMap<String, ListenerRegistry<Option<FavoritesDocument>>>>,
}

#[derive(Clone)]
/// Browser document store for the per-user favorites document.
pub struct WebDocumentStore {
    inner: Rc<StoreInner>,
}

impl std::fmt::Debug for WebDocumentStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WebDocumentStore")
            .field("project_id", &self.inner.project_id)
            .field("poll_interval_ms", &self.inner.poll_interval_ms)
            .finish()
    }
}

impl WebDocumentStore {
    /// Creates a store that authenticates requests through `auth`.
    pub fn new(config: &BackendConfig, auth: WebAuthService) -> Self {
        Self {
            inner: Rc::new(StoreInner {
                project_id: config.project_id.clone(),
                poll_interval_ms: config.sync_poll_interval_ms,
                auth,
                watchers: RefCell::new(HashMap::new()),
            }),
        }
    }

    fn registry(&self, path: &str) -> ListenerRegistry<Option<FavoritesDocument>> {
        self.inner
            .watchers
            .borrow_mut()
            .entry(path.to_string())
            .or_default()
            .clone()
    }

    fn notify(&self, path: &str, document: Option<FavoritesDocument>) {
        let registry = self.inner.watchers.borrow().get(path).cloned();
        if let Some(registry) = registry {
            registry.emit(document);
        }
    }

    async fn fetch(&self, path: &str) -> Result<Option<FavoritesDocument>, String> {
        let token = self.inner.auth.id_token().await?;
        let url = document_url(&self.inner.project_id, path);
        let response = http::send(HttpRequest::get(&url).bearer(&token)).await?;
        read_outcome(&response)
    }

    #[cfg(target_arch = "wasm32")]
    fn start_polling(
        &self,
        path: &str,
        deliver: Listener<Option<FavoritesDocument>>,
        on_error: Listener<String>,
    ) -> Box<dyn FnOnce()> {
        use std::cell::Cell;

        let active = Rc::new(Cell::new(true));
        let poll: Rc<dyn Fn()> = {
            let store = self.clone();
            let path = path.to_string();
            let active = active.clone();
            Rc::new(move || {
                let store = store.clone();
                let path = path.clone();
                let deliver = deliver.clone();
                let on_error = on_error.clone();
                let active = active.clone();
                wasm_bindgen_futures::spawn_local(async move {
                    let outcome = store.fetch(&path).await;
                    if !active.get() {
                        return;
                    }
                    match outcome {
                        Ok(document) => deliver(document),
                        Err(err) => on_error(err),
                    }
                });
            })
        };

        poll();
        let interval = {
            let poll = poll.clone();
            gloo_timers::callback::Interval::new(self.inner.poll_interval_ms, move || poll())
        };
        Box::new(move || {
            active.set(false);
            interval.cancel();
        })
    }

    #[cfg(not(target_arch = "wasm32"))]
    fn start_polling(
        &self,
        _path: &str,
        _deliver: Listener<Option<FavoritesDocument>>,
        _on_error: Listener<String>,
    ) -> Box<dyn FnOnce()> {
        Box::new(|| {})
    }
}

impl DocumentStore for WebDocumentStore {
    fn subscribe(
        &self,
        path: &str,
        on_data: Listener<Option<FavoritesDocument>>,
        on_error: Listener<String>,
    ) -> Subscription {
        let filter = Rc::new(RefCell::new(SnapshotFilter::default()));
        let deliver: Listener<Option<FavoritesDocument>> = Rc::new(move |snapshot| {
            let fresh = filter.borrow_mut().accept(&snapshot);
            if fresh {
                on_data(snapshot);
            }
        });
        let local = self.registry(path).subscribe(deliver.clone());
        let stop_polling = self.start_polling(path, deliver, on_error);
        Subscription::new(move || {
            stop_polling();
            drop(local);
        })
    }

    fn merge<'a>(
        &'a self,
        path: &'a str,
        document: &'a FavoritesDocument,
    ) -> DocumentFuture<'a, Result<(), String>> {
        Box::pin(async move {
            let token = self.inner.auth.id_token().await?;
            let url = merge_url(&self.inner.project_id, path);
            let body = encode_favorites(document).to_string();
            let response = http::send(
                HttpRequest::with_body(Method::Patch, &url, body, JSON_CONTENT_TYPE)
                    .bearer(&token),
            )
            .await?;
            if !response.is_success() {
                return Err(response.error_message());
            }
            self.notify(path, Some(document.clone()));
            Ok(())
        })
    }
}
