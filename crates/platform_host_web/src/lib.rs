//! Browser (`wasm32`) implementations of [`platform_host`] service contracts.
//!
//! This crate wires the gallery's host services to the browser: anonymous auth and the favorites
//! document over Google REST APIs, `window.history` for the preview modal, blob downloads, and
//! `setTimeout` timers.
//!
//! Browser calls are gated on `target_arch = "wasm32"`; native builds compile inert fallbacks so
//! codecs and adapter selection stay testable off the browser.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

/// Compile-time host-strategy selection and the [`platform_host::HostServices`] factory.
pub mod adapters;
pub mod auth;
pub mod download;
pub mod firestore;
mod http;
pub mod local_store;
pub mod navigation;
pub mod timers;

pub use adapters::{
    backend_adapters, build_host_services, host_strategy_name, selected_host_strategy,
    AuthServiceAdapter, DocumentStoreAdapter,
};
pub use auth::{credential_storage_key, StoredCredential, WebAuthService};
pub use download::WebAssetDownloadService;
pub use firestore::{decode_favorites, document_url, encode_favorites, merge_url, WebDocumentStore};
pub use local_store::LocalSlot;
pub use navigation::WebNavigationHost;
pub use timers::{unix_time_ms_now, WebTimerService};
