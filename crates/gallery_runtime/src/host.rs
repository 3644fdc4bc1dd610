//! Host-side runtime helpers for executing reducer effects against injected platform services.
//!
//! The reducer stays pure; everything that touches auth, the favorites document, navigation
//! history, downloads, or timers is routed through [`GalleryHostContext`]. Completed async work
//! re-enters the reducer as a [`GalleryAction`] through an [`ActionSink`].

mod boot;
mod download_effects;
mod favorites_effects;
mod navigation_effects;

use std::{cell::RefCell, rc::Rc};

use futures::future::LocalBoxFuture;
use platform_host::{HostServices, HostStrategy, Subscription};

use crate::reducer::{GalleryAction, GalleryEffect};

/// Callback used by host effects to feed results back into the reducer.
pub type ActionSink = Rc<dyn Fn(GalleryAction)>;

/// Executor for host futures.
pub type TaskSpawner = Rc<dyn Fn(LocalBoxFuture<'static, ()>)>;

#[derive(Default)]
struct HostSubscriptions {
    auth: Option<Subscription>,
    back_navigation: Option<Subscription>,
    favorites: Option<Subscription>,
}

#[derive(Clone)]
/// Host service bundle plus the long-lived subscriptions owned by the gallery runtime.
pub struct GalleryHostContext {
    services: HostServices,
    spawner: TaskSpawner,
    subscriptions: Rc<RefCell<HostSubscriptions>>,
}

impl GalleryHostContext {
    /// Wraps `services`, running host futures on the Leptos local executor.
    pub fn new(services: HostServices) -> Self {
        Self::with_spawner(
            services,
            Rc::new(|task: LocalBoxFuture<'static, ()>| leptos::spawn_local(task)),
        )
    }

    /// Wraps `services` with a caller-provided executor.
    pub fn with_spawner(services: HostServices, spawner: TaskSpawner) -> Self {
        Self {
            services,
            spawner,
            subscriptions: Rc::new(RefCell::new(HostSubscriptions::default())),
        }
    }

    /// Returns the injected services.
    pub fn services(&self) -> &HostServices {
        &self.services
    }

    /// Returns the selected host strategy.
    pub fn host_strategy(&self) -> HostStrategy {
        self.services.host_strategy
    }

    /// Subscribes to auth and back-navigation events, then requests anonymous sign-in.
    pub fn install_boot(&self, dispatch: ActionSink) {
        boot::install_boot(self.clone(), dispatch);
    }

    /// Executes a single [`GalleryEffect`] emitted by the reducer.
    pub fn run_effect(&self, effect: GalleryEffect, dispatch: ActionSink) {
        match effect {
            GalleryEffect::PushModalHistoryEntry => {
                navigation_effects::push_modal_entry(self.clone(), dispatch)
            }
            GalleryEffect::DismissModalViaHistory => {
                navigation_effects::dismiss_modal(self.clone(), dispatch)
            }
            GalleryEffect::WatchFavorites { uid } => {
                favorites_effects::watch_favorites(self.clone(), uid, dispatch)
            }
            GalleryEffect::StopWatchingFavorites => favorites_effects::stop_watching(self.clone()),
            GalleryEffect::PersistFavorites { uid, ids } => {
                favorites_effects::persist_favorites(self.clone(), uid, ids)
            }
            GalleryEffect::DownloadAsset {
                item_id,
                url,
                file_name,
            } => download_effects::download_asset(self.clone(), item_id, url, file_name, dispatch),
            GalleryEffect::ScheduleDownloadRelease { item_id, delay_ms } => {
                download_effects::schedule_release(self.clone(), item_id, delay_ms, dispatch)
            }
        }
    }

    fn spawn(&self, task: impl std::future::Future<Output = ()> + 'static) {
        (self.spawner)(Box::pin(task));
    }
}
