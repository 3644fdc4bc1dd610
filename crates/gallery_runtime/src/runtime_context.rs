//! Runtime provider and context wiring for the gallery.
//!
//! This module owns the long-lived reducer container, the effect queue, and host bootstrap
//! wiring. UI composition stays in [`crate::components`].

use std::rc::Rc;

use leptos::*;
use platform_host::HostServices;

use crate::{
    catalog, effect_executor,
    host::{ActionSink, GalleryHostContext},
    model::{GalleryState, InteractionState, WallpaperItem},
    reducer::{reduce_gallery, GalleryAction, GalleryEffect},
};

#[derive(Clone, Copy)]
/// Leptos context for reading gallery state and dispatching [`GalleryAction`] values.
pub struct GalleryRuntimeContext {
    /// Host service bundle for executing runtime side effects.
    pub host: StoredValue<GalleryHostContext>,
    /// Catalog generated at startup.
    pub catalog: StoredValue<Rc<[WallpaperItem]>>,
    /// Reactive gallery state signal.
    pub state: RwSignal<GalleryState>,
    /// Reactive touch-gesture state signal.
    pub interaction: RwSignal<InteractionState>,
    /// Queue of effects emitted by the reducer and drained by the executor.
    pub effects: RwSignal<Vec<GalleryEffect>>,
    /// Reducer dispatch callback.
    pub dispatch: Callback<GalleryAction>,
}

impl GalleryRuntimeContext {
    /// Dispatches a reducer action through the runtime context callback.
    pub fn dispatch_action(&self, action: GalleryAction) {
        self.dispatch.call(action);
    }

    /// Returns a host-facing sink that dispatches into this runtime.
    pub fn action_sink(&self) -> ActionSink {
        let dispatch = self.dispatch;
        Rc::new(move |action: GalleryAction| dispatch.call(action))
    }
}

#[component]
/// Provides [`GalleryRuntimeContext`] to descendant components and starts the session.
pub fn GalleryProvider(
    /// Injected browser, stub, or memory host bundle assembled by the entry layer.
    host_services: HostServices,
    children: Children,
) -> impl IntoView {
    let host = store_value(GalleryHostContext::new(host_services));
    let catalog = store_value(catalog::catalog());
    let state = create_rw_signal(GalleryState::default());
    let interaction = create_rw_signal(InteractionState::default());
    let effects = create_rw_signal(Vec::<GalleryEffect>::new());

    let dispatch = Callback::new(move |action: GalleryAction| {
        let mut gallery = state.get_untracked();
        let mut ui = interaction.get_untracked();
        let previous_gallery = gallery.clone();
        let previous_ui = ui.clone();

        match reduce_gallery(&mut gallery, &mut ui, action) {
            Ok(new_effects) => {
                if gallery != previous_gallery {
                    state.set(gallery);
                }
                if ui != previous_ui {
                    interaction.set(ui);
                }
                if !new_effects.is_empty() {
                    let mut queue = effects.get_untracked();
                    queue.extend(new_effects);
                    effects.set(queue);
                }
            }
            Err(err) => logging::warn!("gallery reducer error: {err}"),
        }
    });

    let runtime = GalleryRuntimeContext {
        host,
        catalog,
        state,
        interaction,
        effects,
        dispatch,
    };

    provide_context(runtime);

    effect_executor::install(runtime);
    host.get_value().install_boot(runtime.action_sink());

    children().into_view()
}

/// Returns the current [`GalleryRuntimeContext`].
///
/// # Panics
///
/// Panics if called outside [`GalleryProvider`].
pub fn use_gallery_runtime() -> GalleryRuntimeContext {
    use_context::<GalleryRuntimeContext>().expect("GalleryRuntimeContext not provided")
}
