//! Reducer actions, side-effect intents, and transition logic for the gallery runtime.

use platform_host::{FavoritesDocument, Session};
use thiserror::Error;

use crate::{
    catalog,
    favorites::FavoritesSet,
    modal::SwipeOutcome,
    model::{
        Category, GalleryState, InteractionState, ModalState, SwipeGesture, WallpaperItem,
        DOWNLOAD_RELEASE_DELAY_MS, PAGE_SIZE,
    },
};

#[derive(Debug, Clone, PartialEq)]
/// Actions accepted by [`reduce_gallery`] to mutate [`GalleryState`].
pub enum GalleryAction {
    /// Select a sidebar category.
    SetCategory {
        /// Category to filter by.
        category: Category,
    },
    /// Replace the search text.
    SetSearchQuery {
        /// Raw query as typed.
        query: String,
    },
    /// Return to Curated with an empty query (brand mark).
    ResetFilters,
    /// Reveal the next page of results.
    LoadMore,
    /// The auth collaborator reported a new session (or none).
    SessionChanged {
        /// Current session.
        session: Option<Session>,
    },
    /// The remote favorites document for `uid` changed.
    FavoritesSnapshot {
        /// Owner of the document.
        uid: String,
        /// Document contents; `None` when it does not exist.
        document: Option<FavoritesDocument>,
    },
    /// Add or remove an item from favorites.
    ToggleFavorite {
        /// Item to toggle.
        item_id: String,
    },
    /// Show an item in the preview modal.
    OpenPreview {
        /// Item to preview.
        item: WallpaperItem,
    },
    /// Show a catalog item, looked up by id, in the preview modal.
    OpenPreviewById {
        /// Catalog id.
        item_id: String,
    },
    /// Close button, backdrop click, or swipe.
    ClosePreview,
    /// The host could not push the synthetic history entry.
    HistoryEntryRejected,
    /// The platform navigated back.
    HistoryBackNavigated,
    /// The synthetic entry is no longer current; close without navigating.
    PreviewDismissed,
    /// Touch began over the preview.
    TouchStart {
        /// Client Y coordinate.
        y: i32,
    },
    /// Touch moved over the preview.
    TouchMove {
        /// Client Y coordinate.
        y: i32,
    },
    /// Touch ended over the preview.
    TouchEnd,
    /// Download the high-resolution asset of an item.
    StartDownload {
        /// Item to download.
        item: WallpaperItem,
    },
    /// The asset was saved.
    DownloadSaved {
        /// Downloaded item.
        item_id: String,
    },
    /// Fetching or saving the asset failed.
    DownloadFailed {
        /// Item whose download failed.
        item_id: String,
    },
    /// The post-download cooldown elapsed.
    ReleaseDownload {
        /// Item whose marker should clear.
        item_id: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Side-effect intents emitted by [`reduce_gallery`] for the host layer to execute.
pub enum GalleryEffect {
    /// Push the synthetic preview history entry.
    PushModalHistoryEntry,
    /// Navigate back if the synthetic entry is still current, otherwise dismiss directly.
    DismissModalViaHistory,
    /// Replace any favorites subscription with one for `uid`.
    WatchFavorites {
        /// Session owner.
        uid: String,
    },
    /// Drop the favorites subscription.
    StopWatchingFavorites,
    /// Merge the `ids` array into the remote favorites document.
    PersistFavorites {
        /// Session owner.
        uid: String,
        /// Full favorites list after the toggle.
        ids: Vec<String>,
    },
    /// Fetch and save a high-resolution asset.
    DownloadAsset {
        /// Item being downloaded.
        item_id: String,
        /// Asset URL.
        url: String,
        /// Saved file name.
        file_name: String,
    },
    /// Dispatch [`GalleryAction::ReleaseDownload`] after a delay.
    ScheduleDownloadRelease {
        /// Item whose marker should clear.
        item_id: String,
        /// Delay in milliseconds.
        delay_ms: u32,
    },
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
/// Reducer errors for invalid actions.
pub enum ReducerError {
    /// The referenced item id is not in the catalog.
    #[error("wallpaper `{0}` not found")]
    ItemNotFound(String),
}

/// Applies a [`GalleryAction`] to the gallery state and collects resulting side effects.
///
/// # Errors
///
/// Returns [`ReducerError::ItemNotFound`] when an action references an unknown catalog item.
pub fn reduce_gallery(
    state: &mut GalleryState,
    interaction: &mut InteractionState,
    action: GalleryAction,
) -> Result<Vec<GalleryEffect>, ReducerError> {
    let mut effects = Vec::new();
    match action {
        GalleryAction::SetCategory { category } => {
            if state.view.active_category != category {
                state.view.active_category = category;
                state.view.visible_count = PAGE_SIZE;
            }
        }
        GalleryAction::SetSearchQuery { query } => {
            if state.view.search_query != query {
                state.view.search_query = query;
                state.view.visible_count = PAGE_SIZE;
            }
        }
        GalleryAction::ResetFilters => {
            if state.view.active_category != Category::Curated
                || !state.view.search_query.is_empty()
            {
                state.view.active_category = Category::Curated;
                state.view.search_query.clear();
                state.view.visible_count = PAGE_SIZE;
            }
        }
        GalleryAction::LoadMore => {
            state.view.visible_count = state.view.visible_count.saturating_add(PAGE_SIZE);
        }
        GalleryAction::SessionChanged { session } => {
            if state.session == session {
                return Ok(effects);
            }
            state.session = session;
            match state.session.as_ref() {
                Some(session) => {
                    state.favorites = FavoritesSet::default();
                    effects.push(GalleryEffect::WatchFavorites {
                        uid: session.uid.clone(),
                    });
                }
                None => {
                    state.favorites = FavoritesSet::default();
                    effects.push(GalleryEffect::StopWatchingFavorites);
                }
            }
        }
        GalleryAction::FavoritesSnapshot { uid, document } => {
            if state.session.as_ref().map(|session| session.uid.as_str()) == Some(uid.as_str()) {
                state.favorites = FavoritesSet::from_document(document);
            }
        }
        GalleryAction::ToggleFavorite { item_id } => {
            if let Some(session) = state.session.as_ref() {
                state.favorites = state.favorites.toggled(&item_id);
                effects.push(GalleryEffect::PersistFavorites {
                    uid: session.uid.clone(),
                    ids: state.favorites.ids().to_vec(),
                });
            }
        }
        GalleryAction::OpenPreview { item } => {
            *interaction = InteractionState::default();
            match &mut state.modal {
                ModalState::Open { item: shown, .. } => *shown = item,
                ModalState::Closed => {
                    state.modal = ModalState::Open {
                        item,
                        history_entry: true,
                    };
                    effects.push(GalleryEffect::PushModalHistoryEntry);
                }
            }
        }
        GalleryAction::OpenPreviewById { item_id } => {
            let item = catalog::find_item(&catalog::catalog(), &item_id)
                .cloned()
                .ok_or(ReducerError::ItemNotFound(item_id))?;
            return reduce_gallery(state, interaction, GalleryAction::OpenPreview { item });
        }
        GalleryAction::ClosePreview => {
            close_preview(state, interaction, &mut effects);
        }
        GalleryAction::HistoryEntryRejected => {
            if let ModalState::Open { history_entry, .. } = &mut state.modal {
                *history_entry = false;
            }
        }
        GalleryAction::HistoryBackNavigated | GalleryAction::PreviewDismissed => {
            state.modal = ModalState::Closed;
            *interaction = InteractionState::default();
        }
        GalleryAction::TouchStart { y } => {
            interaction.swipe = SwipeGesture::begin(y);
        }
        GalleryAction::TouchMove { y } => {
            if interaction.swipe.start_y.is_some() {
                interaction.swipe.track(y);
            }
        }
        GalleryAction::TouchEnd => {
            let outcome = interaction.swipe.outcome();
            interaction.swipe = SwipeGesture::default();
            if outcome == SwipeOutcome::Dismiss {
                close_preview(state, interaction, &mut effects);
            }
        }
        GalleryAction::StartDownload { item } => {
            if state.downloading_id.is_none() {
                state.downloading_id = Some(item.id.clone());
                effects.push(GalleryEffect::DownloadAsset {
                    file_name: item.download_file_name(),
                    item_id: item.id,
                    url: item.hd_url,
                });
            }
        }
        GalleryAction::DownloadSaved { item_id } => {
            if state.is_downloading(&item_id) {
                effects.push(GalleryEffect::ScheduleDownloadRelease {
                    item_id,
                    delay_ms: DOWNLOAD_RELEASE_DELAY_MS,
                });
            }
        }
        GalleryAction::DownloadFailed { item_id } | GalleryAction::ReleaseDownload { item_id } => {
            if state.is_downloading(&item_id) {
                state.downloading_id = None;
            }
        }
    }

    Ok(effects)
}

fn close_preview(
    state: &mut GalleryState,
    interaction: &mut InteractionState,
    effects: &mut Vec<GalleryEffect>,
) {
    match &mut state.modal {
        ModalState::Closed => {}
        ModalState::Open { history_entry, .. } if *history_entry => {
            // Stays open until the back navigation lands; a second close falls through below.
            *history_entry = false;
            effects.push(GalleryEffect::DismissModalViaHistory);
        }
        ModalState::Open { .. } => {
            state.modal = ModalState::Closed;
            *interaction = InteractionState::default();
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn item(index: usize) -> WallpaperItem {
        catalog::catalog()[index].clone()
    }

    fn reduce(
        state: &mut GalleryState,
        interaction: &mut InteractionState,
        action: GalleryAction,
    ) -> Vec<GalleryEffect> {
        reduce_gallery(state, interaction, action).expect("reduce")
    }

    fn signed_in(uid: &str) -> GalleryState {
        GalleryState {
            session: Some(Session::new(uid)),
            ..GalleryState::default()
        }
    }

    #[test]
    fn category_change_resets_pagination() {
        let mut state = GalleryState::default();
        let mut interaction = InteractionState::default();
        state.view.visible_count = 96;

        reduce(
            &mut state,
            &mut interaction,
            GalleryAction::SetCategory {
                category: Category::Abstract,
            },
        );

        assert_eq!(state.view.active_category, Category::Abstract);
        assert_eq!(state.view.visible_count, PAGE_SIZE);
    }

    #[test]
    fn reselecting_same_category_keeps_pagination() {
        let mut state = GalleryState::default();
        let mut interaction = InteractionState::default();
        state.view.visible_count = 48;

        reduce(
            &mut state,
            &mut interaction,
            GalleryAction::SetCategory {
                category: Category::Curated,
            },
        );
        reduce(
            &mut state,
            &mut interaction,
            GalleryAction::SetSearchQuery {
                query: String::new(),
            },
        );

        assert_eq!(state.view.visible_count, 48);
    }

    #[test]
    fn search_change_resets_pagination_and_reset_filters_clears_both() {
        let mut state = GalleryState::default();
        let mut interaction = InteractionState::default();
        reduce(
            &mut state,
            &mut interaction,
            GalleryAction::SetCategory {
                category: Category::Vantage,
            },
        );
        reduce(
            &mut state,
            &mut interaction,
            GalleryAction::SetSearchQuery {
                query: "peak".to_string(),
            },
        );
        reduce(&mut state, &mut interaction, GalleryAction::LoadMore);
        assert_eq!(state.view.visible_count, 32);

        reduce(&mut state, &mut interaction, GalleryAction::ResetFilters);

        assert_eq!(state.view.active_category, Category::Curated);
        assert_eq!(state.view.search_query, "");
        assert_eq!(state.view.visible_count, PAGE_SIZE);
    }

    #[test]
    fn load_more_adds_one_page() {
        let mut state = GalleryState::default();
        let mut interaction = InteractionState::default();
        state.view.visible_count = 32;

        let effects = reduce(&mut state, &mut interaction, GalleryAction::LoadMore);

        assert_eq!(state.view.visible_count, 48);
        assert!(effects.is_empty());
    }

    #[test]
    fn session_change_watches_new_user_and_sign_out_clears_favorites() {
        let mut state = GalleryState::default();
        let mut interaction = InteractionState::default();

        let effects = reduce(
            &mut state,
            &mut interaction,
            GalleryAction::SessionChanged {
                session: Some(Session::new("anon-1")),
            },
        );
        assert_eq!(
            effects,
            vec![GalleryEffect::WatchFavorites {
                uid: "anon-1".to_string()
            }]
        );

        let repeated = reduce(
            &mut state,
            &mut interaction,
            GalleryAction::SessionChanged {
                session: Some(Session::new("anon-1")),
            },
        );
        assert!(repeated.is_empty());

        state.favorites = FavoritesSet::from_ids(["wall-v2-3"]);
        let effects = reduce(
            &mut state,
            &mut interaction,
            GalleryAction::SessionChanged { session: None },
        );
        assert_eq!(effects, vec![GalleryEffect::StopWatchingFavorites]);
        assert!(state.favorites.is_empty());
    }

    #[test]
    fn snapshot_for_current_user_replaces_set() {
        let mut state = signed_in("anon-1");
        let mut interaction = InteractionState::default();
        state.favorites = FavoritesSet::from_ids(["local"]);

        reduce(
            &mut state,
            &mut interaction,
            GalleryAction::FavoritesSnapshot {
                uid: "anon-2".to_string(),
                document: None,
            },
        );
        assert_eq!(state.favorites, FavoritesSet::from_ids(["local"]));

        reduce(
            &mut state,
            &mut interaction,
            GalleryAction::FavoritesSnapshot {
                uid: "anon-1".to_string(),
                document: Some(FavoritesDocument {
                    ids: vec!["wall-v2-4".to_string(), "wall-v2-8".to_string()],
                }),
            },
        );
        assert_eq!(state.favorites, FavoritesSet::from_ids(["wall-v2-4", "wall-v2-8"]));

        reduce(
            &mut state,
            &mut interaction,
            GalleryAction::FavoritesSnapshot {
                uid: "anon-1".to_string(),
                document: None,
            },
        );
        assert!(state.favorites.is_empty());
    }

    #[test]
    fn toggle_applies_locally_and_persists_full_list() {
        let mut state = signed_in("anon-1");
        let mut interaction = InteractionState::default();
        state.favorites = FavoritesSet::from_ids(["wall-v2-1"]);

        let effects = reduce(
            &mut state,
            &mut interaction,
            GalleryAction::ToggleFavorite {
                item_id: "wall-v2-9".to_string(),
            },
        );

        assert!(state.is_favorite("wall-v2-9"));
        assert_eq!(
            effects,
            vec![GalleryEffect::PersistFavorites {
                uid: "anon-1".to_string(),
                ids: vec!["wall-v2-1".to_string(), "wall-v2-9".to_string()],
            }]
        );
    }

    #[test]
    fn toggle_without_session_is_noop() {
        let mut state = GalleryState::default();
        let mut interaction = InteractionState::default();

        let effects = reduce(
            &mut state,
            &mut interaction,
            GalleryAction::ToggleFavorite {
                item_id: "wall-v2-9".to_string(),
            },
        );

        assert!(effects.is_empty());
        assert!(state.favorites.is_empty());
    }

    #[test]
    fn open_pushes_history_once_and_replaces_item_while_open() {
        let mut state = GalleryState::default();
        let mut interaction = InteractionState::default();

        let first = reduce(
            &mut state,
            &mut interaction,
            GalleryAction::OpenPreview { item: item(0) },
        );
        let second = reduce(
            &mut state,
            &mut interaction,
            GalleryAction::OpenPreview { item: item(5) },
        );

        assert_eq!(first, vec![GalleryEffect::PushModalHistoryEntry]);
        assert!(second.is_empty());
        assert_eq!(state.selected_item(), Some(&item(5)));
    }

    #[test]
    fn close_goes_through_history_then_back_closes() {
        let mut state = GalleryState::default();
        let mut interaction = InteractionState::default();
        reduce(
            &mut state,
            &mut interaction,
            GalleryAction::OpenPreview { item: item(2) },
        );

        let effects = reduce(&mut state, &mut interaction, GalleryAction::ClosePreview);
        assert_eq!(effects, vec![GalleryEffect::DismissModalViaHistory]);
        assert!(state.modal.is_open());

        reduce(
            &mut state,
            &mut interaction,
            GalleryAction::HistoryBackNavigated,
        );
        assert_eq!(state.modal, ModalState::Closed);
    }

    #[test]
    fn platform_back_closes_open_preview() {
        let mut state = GalleryState::default();
        let mut interaction = InteractionState::default();
        reduce(
            &mut state,
            &mut interaction,
            GalleryAction::OpenPreview { item: item(2) },
        );

        reduce(
            &mut state,
            &mut interaction,
            GalleryAction::HistoryBackNavigated,
        );

        assert_eq!(state.modal, ModalState::Closed);
    }

    #[test]
    fn close_without_history_entry_closes_directly() {
        let mut state = GalleryState::default();
        let mut interaction = InteractionState::default();
        reduce(
            &mut state,
            &mut interaction,
            GalleryAction::OpenPreview { item: item(2) },
        );
        reduce(
            &mut state,
            &mut interaction,
            GalleryAction::HistoryEntryRejected,
        );

        let effects = reduce(&mut state, &mut interaction, GalleryAction::ClosePreview);

        assert!(effects.is_empty());
        assert_eq!(state.modal, ModalState::Closed);
    }

    #[test]
    fn open_by_unknown_id_is_an_error() {
        let mut state = GalleryState::default();
        let mut interaction = InteractionState::default();

        let err = reduce_gallery(
            &mut state,
            &mut interaction,
            GalleryAction::OpenPreviewById {
                item_id: "wall-v2-999".to_string(),
            },
        )
        .expect_err("missing item");

        assert_eq!(err, ReducerError::ItemNotFound("wall-v2-999".to_string()));
        assert!(!state.modal.is_open());
    }

    #[test]
    fn swipe_down_past_threshold_closes_and_short_swipe_does_not() {
        let mut state = GalleryState::default();
        let mut interaction = InteractionState::default();
        reduce(
            &mut state,
            &mut interaction,
            GalleryAction::OpenPreview { item: item(1) },
        );

        reduce(&mut state, &mut interaction, GalleryAction::TouchStart { y: 200 });
        reduce(&mut state, &mut interaction, GalleryAction::TouchMove { y: 250 });
        let short = reduce(&mut state, &mut interaction, GalleryAction::TouchEnd);
        assert!(short.is_empty());
        assert!(state.modal.is_open());

        reduce(&mut state, &mut interaction, GalleryAction::TouchStart { y: 200 });
        reduce(&mut state, &mut interaction, GalleryAction::TouchMove { y: 290 });
        let long = reduce(&mut state, &mut interaction, GalleryAction::TouchEnd);
        assert_eq!(long, vec![GalleryEffect::DismissModalViaHistory]);
        assert_eq!(interaction, InteractionState::default());
    }

    #[test]
    fn download_marks_in_flight_and_ignores_second_request() {
        let mut state = GalleryState::default();
        let mut interaction = InteractionState::default();

        let effects = reduce(
            &mut state,
            &mut interaction,
            GalleryAction::StartDownload { item: item(3) },
        );
        assert_eq!(
            effects,
            vec![GalleryEffect::DownloadAsset {
                item_id: "wall-v2-3".to_string(),
                url: item(3).hd_url,
                file_name: "WALLUX_wall-v2-3.jpg".to_string(),
            }]
        );

        let ignored = reduce(
            &mut state,
            &mut interaction,
            GalleryAction::StartDownload { item: item(4) },
        );
        assert!(ignored.is_empty());
        assert_eq!(state.downloading_id.as_deref(), Some("wall-v2-3"));
    }

    #[test]
    fn saved_download_releases_after_delay_and_failure_releases_immediately() {
        let mut state = GalleryState::default();
        let mut interaction = InteractionState::default();
        reduce(
            &mut state,
            &mut interaction,
            GalleryAction::StartDownload { item: item(3) },
        );

        let effects = reduce(
            &mut state,
            &mut interaction,
            GalleryAction::DownloadSaved {
                item_id: "wall-v2-3".to_string(),
            },
        );
        assert_eq!(
            effects,
            vec![GalleryEffect::ScheduleDownloadRelease {
                item_id: "wall-v2-3".to_string(),
                delay_ms: DOWNLOAD_RELEASE_DELAY_MS,
            }]
        );
        assert!(state.is_downloading("wall-v2-3"));

        reduce(
            &mut state,
            &mut interaction,
            GalleryAction::ReleaseDownload {
                item_id: "wall-v2-3".to_string(),
            },
        );
        assert_eq!(state.downloading_id, None);

        reduce(
            &mut state,
            &mut interaction,
            GalleryAction::StartDownload { item: item(6) },
        );
        reduce(
            &mut state,
            &mut interaction,
            GalleryAction::DownloadFailed {
                item_id: "wall-v2-6".to_string(),
            },
        );
        assert_eq!(state.downloading_id, None);
    }

    #[test]
    fn stale_release_does_not_clear_other_download() {
        let mut state = GalleryState::default();
        let mut interaction = InteractionState::default();
        state.downloading_id = Some("wall-v2-7".to_string());

        reduce(
            &mut state,
            &mut interaction,
            GalleryAction::ReleaseDownload {
                item_id: "wall-v2-3".to_string(),
            },
        );

        assert_eq!(state.downloading_id.as_deref(), Some("wall-v2-7"));
    }
}
