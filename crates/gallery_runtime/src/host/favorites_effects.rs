use std::rc::Rc;

use leptos::logging;
use platform_host::{favorites_document_path, FavoritesDocument};

use super::{ActionSink, GalleryHostContext};
use crate::{error::GalleryError, reducer::GalleryAction};

pub(super) fn watch_favorites(host: GalleryHostContext, uid: String, dispatch: ActionSink) {
    stop_watching(host.clone());

    let path = favorites_document_path(&host.services.app_namespace, &uid);
    let on_data = Rc::new(move |document: Option<FavoritesDocument>| {
        dispatch(GalleryAction::FavoritesSnapshot {
            uid: uid.clone(),
            document,
        })
    });
    let on_error = Rc::new(|err: String| logging::warn!("{}", GalleryError::Sync(err)));
    let subscription = host.services.documents.subscribe(&path, on_data, on_error);
    host.subscriptions.borrow_mut().favorites = Some(subscription);
}

pub(super) fn stop_watching(host: GalleryHostContext) {
    let previous = host.subscriptions.borrow_mut().favorites.take();
    drop(previous);
}

pub(super) fn persist_favorites(host: GalleryHostContext, uid: String, ids: Vec<String>) {
    let documents = host.services.documents.clone();
    let path = favorites_document_path(&host.services.app_namespace, &uid);
    host.spawn(async move {
        let document = FavoritesDocument { ids };
        if let Err(err) = documents.merge(&path, &document).await {
            logging::warn!("{}", GalleryError::Sync(err));
        }
    });
}
