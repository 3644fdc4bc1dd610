use std::rc::Rc;

use platform_host::{
    AuthFuture, AuthService, BackendConfig, DocumentFuture, DocumentStore, FavoritesDocument,
    HostServices, HostStrategy, Listener, NoopAuthService, NoopDocumentStore, Session,
    Subscription, DEFAULT_APP_NAMESPACE,
};

use crate::{
    WebAssetDownloadService, WebAuthService, WebDocumentStore, WebNavigationHost, WebTimerService,
};

/// Returns the compile-time selected host strategy for the active build.
pub const fn selected_host_strategy() -> HostStrategy {
    #[cfg(feature = "host-stub")]
    {
        HostStrategy::Stub
    }

    #[cfg(not(feature = "host-stub"))]
    {
        HostStrategy::Browser
    }
}

/// Returns the selected host strategy as a stable string token.
pub fn host_strategy_name() -> &'static str {
    selected_host_strategy().as_str()
}

/// Adapter enum that erases the concrete auth backend behind [`AuthService`].
#[derive(Debug, Clone)]
pub enum AuthServiceAdapter {
    /// Identity Toolkit anonymous auth.
    Browser(WebAuthService),
    /// Backend-less fallback; sign-in always fails.
    Stub(NoopAuthService),
}

impl AuthService for AuthServiceAdapter {
    fn sign_in_anonymously<'a>(&'a self) -> AuthFuture<'a, Result<Session, String>> {
        match self {
            Self::Browser(service) => service.sign_in_anonymously(),
            Self::Stub(service) => service.sign_in_anonymously(),
        }
    }

    fn sign_out<'a>(&'a self) -> AuthFuture<'a, Result<(), String>> {
        match self {
            Self::Browser(service) => service.sign_out(),
            Self::Stub(service) => service.sign_out(),
        }
    }

    fn current_session(&self) -> Option<Session> {
        match self {
            Self::Browser(service) => service.current_session(),
            Self::Stub(service) => service.current_session(),
        }
    }

    fn on_auth_state_changed(&self, listener: Listener<Option<Session>>) -> Subscription {
        match self {
            Self::Browser(service) => service.on_auth_state_changed(listener),
            Self::Stub(service) => service.on_auth_state_changed(listener),
        }
    }
}

/// Adapter enum that erases the concrete document backend behind [`DocumentStore`].
#[derive(Debug, Clone)]
pub enum DocumentStoreAdapter {
    /// Firestore REST document store.
    Browser(WebDocumentStore),
    /// Backend-less fallback; reads are empty and writes fail.
    Stub(NoopDocumentStore),
}

impl DocumentStore for DocumentStoreAdapter {
    fn subscribe(
        &self,
        path: &str,
        on_data: Listener<Option<FavoritesDocument>>,
        on_error: Listener<String>,
    ) -> Subscription {
        match self {
            Self::Browser(store) => store.subscribe(path, on_data, on_error),
            Self::Stub(store) => store.subscribe(path, on_data, on_error),
        }
    }

    fn merge<'a>(
        &'a self,
        path: &'a str,
        document: &'a FavoritesDocument,
    ) -> DocumentFuture<'a, Result<(), String>> {
        match self {
            Self::Browser(store) => store.merge(path, document),
            Self::Stub(store) => store.merge(path, document),
        }
    }
}

/// Builds the auth and document adapters for `config`.
///
/// Falls back to the stub pair when the build selects the stub strategy or no usable backend
/// configuration was supplied.
pub fn backend_adapters(
    config: Option<&BackendConfig>,
) -> (AuthServiceAdapter, DocumentStoreAdapter, HostStrategy) {
    match (selected_host_strategy(), config) {
        (HostStrategy::Browser, Some(config)) => {
            let auth = WebAuthService::new(config);
            let documents = WebDocumentStore::new(config, auth.clone());
            (
                AuthServiceAdapter::Browser(auth),
                DocumentStoreAdapter::Browser(documents),
                HostStrategy::Browser,
            )
        }
        _ => (
            AuthServiceAdapter::Stub(NoopAuthService),
            DocumentStoreAdapter::Stub(NoopDocumentStore),
            HostStrategy::Stub,
        ),
    }
}

/// Builds the browser [`HostServices`] bundle consumed by the gallery runtime.
///
/// Navigation, downloads, and timers are always browser-backed; only the backend pair depends on
/// `config` and the selected strategy.
pub fn build_host_services(config: Option<BackendConfig>) -> HostServices {
    let (auth, documents, host_strategy) = backend_adapters(config.as_ref());
    let app_namespace = config
        .map(|config| config.app_namespace)
        .unwrap_or_else(|| DEFAULT_APP_NAMESPACE.to_string());
    HostServices {
        auth: Rc::new(auth),
        documents: Rc::new(documents),
        navigation: Rc::new(WebNavigationHost),
        downloads: Rc::new(WebAssetDownloadService),
        timers: Rc::new(WebTimerService),
        app_namespace,
        host_strategy,
    }
}
