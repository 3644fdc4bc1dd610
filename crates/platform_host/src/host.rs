//! Shared host-bundle models for browser and stub runtime composition.

use std::rc::Rc;

use crate::{
    AssetDownloadService, AuthService, DocumentStore, ManualTimerService,
    MemoryAssetDownloadService, MemoryAuthService, MemoryDocumentStore, MemoryNavigationHost,
    NavigationHost, TimerService,
};

/// Stable host strategy selected for the current build/runtime composition path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostStrategy {
    /// Browser-backed runtime composition talking to the configured backend.
    Browser,
    /// Browser composition without a backend; auth and favorites degrade to no-ops.
    Stub,
    /// Fully in-memory composition used by tests and offline previews.
    Memory,
}

impl HostStrategy {
    /// Returns a stable string token for diagnostics.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Browser => "browser",
            Self::Stub => "stub",
            Self::Memory => "memory",
        }
    }
}

/// Runtime-selected host service bundle injected into the gallery runtime.
///
/// All environment-specific service selection happens before this bundle crosses into
/// `gallery_runtime`, which keeps the runtime decoupled from browser adapter details.
#[derive(Clone)]
pub struct HostServices {
    /// Anonymous-session provider.
    pub auth: Rc<dyn AuthService>,
    /// Remote favorites document store.
    pub documents: Rc<dyn DocumentStore>,
    /// Navigation history used for modal dismissal.
    pub navigation: Rc<dyn NavigationHost>,
    /// High-resolution asset download service.
    pub downloads: Rc<dyn AssetDownloadService>,
    /// Delay source for deferred runtime work.
    pub timers: Rc<dyn TimerService>,
    /// Namespace segment for remote document paths.
    pub app_namespace: String,
    /// Stable strategy identifier for diagnostics.
    pub host_strategy: HostStrategy,
}

/// Handles to the concrete in-memory services behind [`HostServices::memory`].
#[derive(Debug, Clone, Default)]
pub struct MemoryHost {
    /// In-memory auth provider.
    pub auth: MemoryAuthService,
    /// In-memory document store.
    pub documents: MemoryDocumentStore,
    /// In-memory history stack.
    pub navigation: MemoryNavigationHost,
    /// Recording download service.
    pub downloads: MemoryAssetDownloadService,
    /// Manually advanced timers.
    pub timers: ManualTimerService,
}

impl HostServices {
    /// Builds a bundle over fresh in-memory services and returns their concrete handles.
    pub fn memory(app_namespace: impl Into<String>) -> (Self, MemoryHost) {
        let host = MemoryHost::default();
        let services = Self {
            auth: Rc::new(host.auth.clone()),
            documents: Rc::new(host.documents.clone()),
            navigation: Rc::new(host.navigation.clone()),
            downloads: Rc::new(host.downloads.clone()),
            timers: Rc::new(host.timers.clone()),
            app_namespace: app_namespace.into(),
            host_strategy: HostStrategy::Memory,
        };
        (services, host)
    }
}
