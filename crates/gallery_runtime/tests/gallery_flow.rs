use std::{
    cell::{Cell, RefCell},
    collections::VecDeque,
    rc::Rc,
};

use futures::{
    executor::LocalPool,
    future::LocalBoxFuture,
    task::LocalSpawnExt,
};
use gallery_runtime::{
    catalog, reduce_gallery, ActionSink, Category, GalleryAction, GalleryHostContext,
    GalleryState, InteractionState, ModalState, TaskSpawner, WallpaperItem,
    DOWNLOAD_RELEASE_DELAY_MS,
};
use platform_host::{
    favorites_document_path, FavoritesDocument, HistoryEntry, HostServices, MemoryHost,
    SavedAsset, Session,
};
use pretty_assertions::assert_eq;

const NAMESPACE: &str = "wallux-aethel";

/// Single-threaded reducer loop with the same FIFO semantics as the Leptos provider.
struct Harness {
    state: RefCell<GalleryState>,
    interaction: RefCell<InteractionState>,
    queue: RefCell<VecDeque<GalleryAction>>,
    draining: Cell<bool>,
    host: GalleryHostContext,
}

impl Harness {
    fn dispatch(&self, action: GalleryAction, sink: &ActionSink) {
        self.queue.borrow_mut().push_back(action);
        if self.draining.replace(true) {
            return;
        }
        loop {
            let Some(next) = self.queue.borrow_mut().pop_front() else {
                break;
            };
            let effects = {
                let mut state = self.state.borrow_mut();
                let mut interaction = self.interaction.borrow_mut();
                reduce_gallery(&mut state, &mut interaction, next).unwrap_or_default()
            };
            for effect in effects {
                self.host.run_effect(effect, sink.clone());
            }
        }
        self.draining.set(false);
    }
}

struct Gallery {
    harness: Rc<Harness>,
    sink: ActionSink,
    pool: LocalPool,
    memory: MemoryHost,
}

impl Gallery {
    fn new() -> Self {
        let (services, memory) = HostServices::memory(NAMESPACE);
        let pool = LocalPool::new();
        let spawner = pool.spawner();
        let spawn: TaskSpawner = Rc::new(move |task: LocalBoxFuture<'static, ()>| {
            spawner.spawn_local(task).expect("spawn host task");
        });
        let harness = Rc::new(Harness {
            state: RefCell::new(GalleryState::default()),
            interaction: RefCell::new(InteractionState::default()),
            queue: RefCell::new(VecDeque::new()),
            draining: Cell::new(false),
            host: GalleryHostContext::with_spawner(services, spawn),
        });
        let sink = harness_sink(&harness);
        Self {
            harness,
            sink,
            pool,
            memory,
        }
    }

    fn booted() -> Self {
        let mut gallery = Self::new();
        gallery.harness.host.install_boot(gallery.sink.clone());
        gallery.settle();
        gallery
    }

    fn dispatch(&mut self, action: GalleryAction) {
        (self.sink)(action);
        self.settle();
    }

    fn settle(&mut self) {
        self.pool.run_until_stalled();
    }

    fn state(&self) -> GalleryState {
        self.harness.state.borrow().clone()
    }

    fn favorites_path(&self) -> String {
        let uid = self
            .state()
            .session
            .map(|session| session.uid)
            .expect("signed in");
        favorites_document_path(NAMESPACE, &uid)
    }
}

fn harness_sink(harness: &Rc<Harness>) -> ActionSink {
    let weak = Rc::downgrade(harness);
    Rc::new(move |action: GalleryAction| {
        if let Some(harness) = weak.upgrade() {
            let sink = harness_sink(&harness);
            harness.dispatch(action, &sink);
        }
    })
}

fn item(index: usize) -> WallpaperItem {
    catalog()[index].clone()
}

#[test]
fn boot_signs_in_and_watches_favorites_document() {
    let gallery = Gallery::booted();

    let state = gallery.state();
    assert_eq!(state.session, Some(Session::new("anon-1")));
    assert!(state.favorites.is_empty());
    assert_eq!(
        gallery
            .memory
            .documents
            .watcher_count("artifacts/wallux-aethel/users/anon-1/settings/favorites"),
        1
    );
}

#[test]
fn failed_sign_in_leaves_gallery_usable_without_favorites() {
    let mut gallery = Gallery::new();
    gallery.memory.auth.fail_sign_in_with("auth/operation-not-allowed");
    gallery.harness.host.install_boot(gallery.sink.clone());
    gallery.settle();

    gallery.dispatch(GalleryAction::ToggleFavorite {
        item_id: "wall-v2-1".to_string(),
    });
    gallery.dispatch(GalleryAction::SetCategory {
        category: Category::Vantage,
    });

    let state = gallery.state();
    assert_eq!(state.session, None);
    assert!(state.favorites.is_empty());
    assert_eq!(state.view.active_category, Category::Vantage);
}

#[test]
fn toggle_writes_through_and_remote_snapshot_wins() {
    let mut gallery = Gallery::booted();
    let path = gallery.favorites_path();

    gallery.dispatch(GalleryAction::ToggleFavorite {
        item_id: "wall-v2-4".to_string(),
    });
    gallery.dispatch(GalleryAction::ToggleFavorite {
        item_id: "wall-v2-9".to_string(),
    });

    assert_eq!(
        gallery.memory.documents.document(&path),
        Some(FavoritesDocument {
            ids: vec!["wall-v2-4".to_string(), "wall-v2-9".to_string()],
        })
    );
    assert!(gallery.state().is_favorite("wall-v2-9"));

    gallery.memory.documents.push_remote(
        &path,
        Some(FavoritesDocument {
            ids: vec!["wall-v2-30".to_string()],
        }),
    );
    gallery.settle();

    let state = gallery.state();
    assert!(state.is_favorite("wall-v2-30"));
    assert!(!state.is_favorite("wall-v2-4"));

    gallery.memory.documents.push_remote(&path, None);
    gallery.settle();
    assert!(gallery.state().favorites.is_empty());
}

#[test]
fn failed_write_keeps_optimistic_toggle() {
    let mut gallery = Gallery::booted();
    let path = gallery.favorites_path();
    gallery.memory.documents.fail_writes_with("permission-denied");

    gallery.dispatch(GalleryAction::ToggleFavorite {
        item_id: "wall-v2-2".to_string(),
    });

    assert!(gallery.state().is_favorite("wall-v2-2"));
    assert_eq!(gallery.memory.documents.document(&path), None);
}

#[test]
fn subscription_errors_do_not_touch_local_favorites() {
    let mut gallery = Gallery::booted();
    let path = gallery.favorites_path();
    gallery.dispatch(GalleryAction::ToggleFavorite {
        item_id: "wall-v2-2".to_string(),
    });

    gallery.memory.documents.push_error(&path, "unavailable");
    gallery.settle();

    assert!(gallery.state().is_favorite("wall-v2-2"));
}

#[test]
fn favorites_category_follows_synced_set() {
    let mut gallery = Gallery::booted();
    gallery.dispatch(GalleryAction::ToggleFavorite {
        item_id: "wall-v2-7".to_string(),
    });
    gallery.dispatch(GalleryAction::SetCategory {
        category: Category::Favorites,
    });

    let state = gallery.state();
    let page = gallery_runtime::visible_page(&catalog(), &state.view, &state.favorites);
    let ids: Vec<String> = page.items.into_iter().map(|item| item.id).collect();
    assert_eq!(ids, vec!["wall-v2-7".to_string()]);
    assert!(!page.has_more);
}

#[test]
fn sign_out_clears_favorites_and_stops_watching() {
    let mut gallery = Gallery::booted();
    let path = gallery.favorites_path();
    gallery.dispatch(GalleryAction::ToggleFavorite {
        item_id: "wall-v2-2".to_string(),
    });

    let auth = gallery.harness.host.services().auth.clone();
    futures::executor::block_on(auth.sign_out()).expect("sign out");
    gallery.settle();

    let state = gallery.state();
    assert_eq!(state.session, None);
    assert!(state.favorites.is_empty());
    assert_eq!(gallery.memory.documents.watcher_count(&path), 0);
}

#[test]
fn open_then_close_returns_through_history() {
    let mut gallery = Gallery::booted();

    gallery.dispatch(GalleryAction::OpenPreview { item: item(12) });
    assert_eq!(
        gallery.memory.navigation.entries(),
        vec![HistoryEntry::Page, HistoryEntry::Modal]
    );
    assert_eq!(gallery.state().selected_item(), Some(&item(12)));

    gallery.dispatch(GalleryAction::ClosePreview);

    assert_eq!(gallery.state().modal, ModalState::Closed);
    assert_eq!(gallery.memory.navigation.entries(), vec![HistoryEntry::Page]);
}

#[test]
fn platform_back_closes_preview() {
    let mut gallery = Gallery::booted();
    gallery.dispatch(GalleryAction::OpenPreview { item: item(3) });

    gallery.memory.navigation.press_back_button();
    gallery.settle();

    assert_eq!(gallery.state().modal, ModalState::Closed);
    assert_eq!(gallery.memory.navigation.entries(), vec![HistoryEntry::Page]);
}

#[test]
fn reopening_while_open_does_not_stack_history() {
    let mut gallery = Gallery::booted();
    gallery.dispatch(GalleryAction::OpenPreview { item: item(3) });
    gallery.dispatch(GalleryAction::OpenPreview { item: item(4) });

    assert_eq!(
        gallery.memory.navigation.entries(),
        vec![HistoryEntry::Page, HistoryEntry::Modal]
    );

    gallery.dispatch(GalleryAction::ClosePreview);
    assert_eq!(gallery.state().modal, ModalState::Closed);
    assert_eq!(gallery.memory.navigation.entries(), vec![HistoryEntry::Page]);
}

#[test]
fn swipe_down_dismisses_through_history() {
    let mut gallery = Gallery::booted();
    gallery.dispatch(GalleryAction::OpenPreview { item: item(8) });

    gallery.dispatch(GalleryAction::TouchStart { y: 300 });
    gallery.dispatch(GalleryAction::TouchMove { y: 350 });
    gallery.dispatch(GalleryAction::TouchEnd);
    assert!(gallery.state().modal.is_open());

    gallery.dispatch(GalleryAction::TouchStart { y: 300 });
    gallery.dispatch(GalleryAction::TouchMove { y: 390 });
    gallery.dispatch(GalleryAction::TouchEnd);
    assert_eq!(gallery.state().modal, ModalState::Closed);
    assert_eq!(gallery.memory.navigation.entries(), vec![HistoryEntry::Page]);
}

#[test]
fn download_saves_named_file_and_releases_after_delay() {
    let mut gallery = Gallery::booted();
    let wallpaper = item(21);

    gallery.dispatch(GalleryAction::StartDownload {
        item: wallpaper.clone(),
    });
    gallery.dispatch(GalleryAction::StartDownload { item: item(22) });

    assert_eq!(
        gallery.memory.downloads.saved(),
        vec![SavedAsset {
            url: wallpaper.hd_url.clone(),
            file_name: "WALLUX_wall-v2-21.jpg".to_string(),
        }]
    );
    assert!(gallery.state().is_downloading("wall-v2-21"));
    assert_eq!(
        gallery.memory.timers.pending_delays(),
        vec![DOWNLOAD_RELEASE_DELAY_MS]
    );

    gallery.memory.timers.fire_all();
    gallery.settle();
    assert_eq!(gallery.state().downloading_id, None);
}

#[test]
fn failed_download_clears_marker_immediately() {
    let mut gallery = Gallery::booted();
    gallery.memory.downloads.fail_with("network error");

    gallery.dispatch(GalleryAction::StartDownload { item: item(5) });

    assert_eq!(gallery.state().downloading_id, None);
    assert!(gallery.memory.timers.pending_delays().is_empty());
    assert!(gallery.memory.downloads.saved().is_empty());
}
