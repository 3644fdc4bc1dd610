//! Runtime effect-queue executor for reducer-emitted side effects.

use leptos::*;

use crate::runtime_context::GalleryRuntimeContext;

/// Installs the effect executor that drains reducer-emitted effects in order.
pub fn install(runtime: GalleryRuntimeContext) {
    // Clear the queue before draining so effects dispatched from host callbacks land in a fresh
    // batch instead of being overwritten.
    create_effect(move |_| {
        let queued = runtime.effects.get();
        if queued.is_empty() {
            return;
        }

        runtime.effects.set(Vec::new());

        let host = runtime.host.get_value();
        for effect in queued {
            host.run_effect(effect, runtime.action_sink());
        }
    });
}
