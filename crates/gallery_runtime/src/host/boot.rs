use std::rc::Rc;

use leptos::logging;
use platform_host::Session;

use super::{ActionSink, GalleryHostContext};
use crate::{error::GalleryError, reducer::GalleryAction};

pub(super) fn install_boot(host: GalleryHostContext, dispatch: ActionSink) {
    let on_back = {
        let dispatch = dispatch.clone();
        host.services
            .navigation
            .on_back_navigation(Rc::new(move |()| dispatch(GalleryAction::HistoryBackNavigated)))
    };
    host.subscriptions.borrow_mut().back_navigation = Some(on_back);

    let on_auth = {
        let dispatch = dispatch.clone();
        host.services
            .auth
            .on_auth_state_changed(Rc::new(move |session: Option<Session>| {
                dispatch(GalleryAction::SessionChanged { session })
            }))
    };
    host.subscriptions.borrow_mut().auth = Some(on_auth);

    let auth = host.services.auth.clone();
    host.spawn(async move {
        // The session itself arrives through the auth-state listener.
        if let Err(err) = auth.sign_in_anonymously().await {
            logging::warn!("{}", GalleryError::Auth(err));
        }
    });
}
