use leptos::logging;

use super::{ActionSink, GalleryHostContext};
use crate::reducer::GalleryAction;

pub(super) fn push_modal_entry(host: GalleryHostContext, dispatch: ActionSink) {
    if let Err(err) = host.services.navigation.push_modal_entry() {
        logging::warn!("push preview history entry failed: {err}");
        dispatch(GalleryAction::HistoryEntryRejected);
    }
}

/// Goes back when the preview entry is on top; the resulting back event closes the preview.
pub(super) fn dismiss_modal(host: GalleryHostContext, dispatch: ActionSink) {
    let navigation = &host.services.navigation;
    if !navigation.is_modal_entry_current() {
        dispatch(GalleryAction::PreviewDismissed);
        return;
    }
    if let Err(err) = navigation.back() {
        logging::warn!("history back failed: {err}");
        dispatch(GalleryAction::PreviewDismissed);
    }
}
