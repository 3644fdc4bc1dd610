//! Typed host-domain contracts and shared models used across the gallery runtime and browser
//! adapters.
//!
//! This crate is the API-first boundary for platform services. It exposes backend configuration,
//! anonymous-session auth, the favorites document store, navigation history, asset download,
//! and timer contracts, plus in-memory implementations, while concrete browser adapters live in
//! `platform_host_web`.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

pub mod config;
pub mod documents;
pub mod download;
pub mod host;
pub mod navigation;
pub mod session;
pub mod subscription;
pub mod time;

pub use config::{
    BackendConfig, ConfigError, DEFAULT_APP_NAMESPACE, DEFAULT_SYNC_POLL_INTERVAL_MS,
};
pub use documents::{
    favorites_document_path, DocumentFuture, DocumentStore, FavoritesDocument,
    MemoryDocumentStore, NoopDocumentStore,
};
pub use download::{
    AssetDownloadService, DownloadFuture, MemoryAssetDownloadService, NoopAssetDownloadService,
    SavedAsset,
};
pub use host::{HostServices, HostStrategy, MemoryHost};
pub use navigation::{HistoryEntry, MemoryNavigationHost, NavigationHost, NoopNavigationHost};
pub use session::{AuthFuture, AuthService, MemoryAuthService, NoopAuthService, Session};
pub use subscription::{Listener, ListenerRegistry, Subscription};
pub use time::{ImmediateTimerService, ManualTimerService, TimerFuture, TimerService};
