//! Gallery UI composition and interaction surfaces.

mod grid;
mod header;
mod preview;
mod sidebar;

use leptos::*;

use self::{grid::GalleryGrid, header::GalleryHeader, preview::PreviewModal, sidebar::Sidebar};
use crate::{
    model::{Category, WallpaperItem},
    reducer::GalleryAction,
    view::{visible_page, GalleryPage},
};

pub use crate::runtime_context::{use_gallery_runtime, GalleryProvider, GalleryRuntimeContext};

fn current_page(runtime: GalleryRuntimeContext) -> Signal<GalleryPage> {
    let catalog = runtime.catalog.get_value();
    let state = runtime.state;
    Signal::derive(move || {
        let gallery = state.get();
        visible_page(&catalog, &gallery.view, &gallery.favorites)
    })
}

#[component]
/// Root gallery layout: sidebar, header, grid, and the preview overlay.
pub fn GalleryShell() -> impl IntoView {
    let runtime = use_gallery_runtime();
    let page = current_page(runtime);

    view! {
        <div class="gallery-root" data-host-strategy=runtime.host.get_value().host_strategy().as_str()>
            <Sidebar />
            <main class="gallery-main">
                <GalleryHeader total=Signal::derive(move || page.get().total) />
                <GalleryGrid page=page />
            </main>
            <PreviewModal />
        </div>
    }
}
