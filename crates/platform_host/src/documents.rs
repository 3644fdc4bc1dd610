//! Remote document-store contracts for the per-user favorites document.

use std::{cell::RefCell, collections::HashMap, future::Future, pin::Pin, rc::Rc};

use serde::{Deserialize, Serialize};

use crate::subscription::{Listener, ListenerRegistry, Subscription};

/// Object-safe boxed future used by [`DocumentStore`] async methods.
pub type DocumentFuture<'a, T> = Pin<Box<dyn Future<Output = T> + 'a>>;

/// Body of the favorites document.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FavoritesDocument {
    /// Favorited wallpaper ids in insertion order.
    #[serde(default)]
    pub ids: Vec<String>,
}

/// Returns `artifacts/{namespace}/users/{uid}/settings/favorites`.
pub fn favorites_document_path(app_namespace: &str, uid: &str) -> String {
    format!("artifacts/{app_namespace}/users/{uid}/settings/favorites")
}

/// Host service for reading, watching, and merging the favorites document.
pub trait DocumentStore {
    /// Watches the document at `path`.
    ///
    /// `on_data` receives `None` when the document does not exist. `on_error` receives read
    /// failures; the subscription stays registered after an error.
    fn subscribe(
        &self,
        path: &str,
        on_data: Listener<Option<FavoritesDocument>>,
        on_error: Listener<String>,
    ) -> Subscription;

    /// Merges `document` into the document at `path`, creating it when absent.
    fn merge<'a>(
        &'a self,
        path: &'a str,
        document: &'a FavoritesDocument,
    ) -> DocumentFuture<'a, Result<(), String>>;
}

#[derive(Debug, Clone, Copy, Default)]
/// Document store for hosts without a backend; reads are empty and writes fail.
pub struct NoopDocumentStore;

impl DocumentStore for NoopDocumentStore {
    fn subscribe(
        &self,
        _path: &str,
        on_data: Listener<Option<FavoritesDocument>>,
        _on_error: Listener<String>,
    ) -> Subscription {
        on_data(None);
        Subscription::noop()
    }

    fn merge<'a>(
        &'a self,
        _path: &'a str,
        _document: &'a FavoritesDocument,
    ) -> DocumentFuture<'a, Result<(), String>> {
        Box::pin(async { Err("document store is unavailable on this host".to_string()) })
    }
}

#[derive(Debug, Default)]
struct MemoryDocumentInner {
    documents: HashMap<String, FavoritesDocument>,
    watchers: HashMap<String, ListenerRegistry<Option<FavoritesDocument>>>,
    error_watchers: HashMap<String, ListenerRegistry<String>>,
    write_error: Option<String>,
}

#[derive(Debug, Clone, Default)]
/// In-memory document store that pushes every write to the path's watchers.
pub struct MemoryDocumentStore {
    inner: Rc<RefCell<MemoryDocumentInner>>,
}

impl MemoryDocumentStore {
    /// Reads the stored document at `path`.
    pub fn document(&self, path: &str) -> Option<FavoritesDocument> {
        self.inner.borrow().documents.get(path).cloned()
    }

    /// Simulates a write from another device: stores `document` and notifies watchers.
    pub fn push_remote(&self, path: &str, document: Option<FavoritesDocument>) {
        {
            let mut inner = self.inner.borrow_mut();
            match document.clone() {
                Some(document) => {
                    inner.documents.insert(path.to_string(), document);
                }
                None => {
                    inner.documents.remove(path);
                }
            }
        }
        self.notify(path, document);
    }

    /// Simulates a read failure delivered to the path's watchers.
    pub fn push_error(&self, path: &str, message: impl Into<String>) {
        let registry = self.inner.borrow().error_watchers.get(path).cloned();
        if let Some(registry) = registry {
            registry.emit(message.into());
        }
    }

    /// Makes every subsequent merge fail with `message`.
    pub fn fail_writes_with(&self, message: impl Into<String>) {
        self.inner.borrow_mut().write_error = Some(message.into());
    }

    /// Number of live watchers on `path`.
    pub fn watcher_count(&self, path: &str) -> usize {
        self.inner
            .borrow()
            .watchers
            .get(path)
            .map_or(0, ListenerRegistry::len)
    }

    fn notify(&self, path: &str, document: Option<FavoritesDocument>) {
        let registry = self.inner.borrow().watchers.get(path).cloned();
        if let Some(registry) = registry {
            registry.emit(document);
        }
    }
}

impl DocumentStore for MemoryDocumentStore {
    fn subscribe(
        &self,
        path: &str,
        on_data: Listener<Option<FavoritesDocument>>,
        on_error: Listener<String>,
    ) -> Subscription {
        let (data_registry, error_registry, current) = {
            let mut inner = self.inner.borrow_mut();
            let data_registry = inner.watchers.entry(path.to_string()).or_default().clone();
            let error_registry = inner
                .error_watchers
                .entry(path.to_string())
                .or_default()
                .clone();
            (data_registry, error_registry, inner.documents.get(path).cloned())
        };
        on_data(current);
        let data = data_registry.subscribe(on_data);
        let errors = error_registry.subscribe(on_error);
        Subscription::new(move || {
            drop(data);
            drop(errors);
        })
    }

    fn merge<'a>(
        &'a self,
        path: &'a str,
        document: &'a FavoritesDocument,
    ) -> DocumentFuture<'a, Result<(), String>> {
        Box::pin(async move {
            let merged = {
                let mut inner = self.inner.borrow_mut();
                if let Some(message) = inner.write_error.clone() {
                    return Err(message);
                }
                let entry = inner.documents.entry(path.to_string()).or_default();
                entry.ids = document.ids.clone();
                entry.clone()
            };
            self.notify(path, Some(merged));
            Ok(())
        })
    }
}
