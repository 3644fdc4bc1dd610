use leptos::logging;

use super::{ActionSink, GalleryHostContext};
use crate::{error::GalleryError, reducer::GalleryAction};

pub(super) fn download_asset(
    host: GalleryHostContext,
    item_id: String,
    url: String,
    file_name: String,
    dispatch: ActionSink,
) {
    let downloads = host.services.downloads.clone();
    host.spawn(async move {
        match downloads.download(&url, &file_name).await {
            Ok(()) => dispatch(GalleryAction::DownloadSaved { item_id }),
            Err(err) => {
                logging::warn!("{}", GalleryError::Fetch(err));
                dispatch(GalleryAction::DownloadFailed { item_id });
            }
        }
    });
}

pub(super) fn schedule_release(
    host: GalleryHostContext,
    item_id: String,
    delay_ms: u32,
    dispatch: ActionSink,
) {
    let sleep = host.services.timers.sleep(delay_ms);
    host.spawn(async move {
        sleep.await;
        dispatch(GalleryAction::ReleaseDownload { item_id });
    });
}
