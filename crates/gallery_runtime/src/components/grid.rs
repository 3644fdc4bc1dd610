use super::*;

#[component]
pub(super) fn GalleryGrid(page: Signal<GalleryPage>) -> impl IntoView {
    let runtime = use_gallery_runtime();
    let is_empty = Signal::derive(move || page.get().total == 0);
    let has_more = Signal::derive(move || page.get().has_more);
    let empty_message = move || {
        if runtime.state.get().view.active_category == Category::Favorites {
            "No favorites yet."
        } else {
            "Nothing matches this filter."
        }
    };

    view! {
        <Show
            when=move || !is_empty.get()
            fallback=move || view! { <p class="gallery-empty">{empty_message}</p> }
        >
            <section class="gallery-grid">
                <For
                    each=move || page.get().items
                    key=|item| item.id.clone()
                    children=move |item| view! { <WallpaperTile item=item /> }
                />
            </section>
        </Show>
        <Show when=move || has_more.get() fallback=|| ()>
            <div class="load-more">
                <button on:click=move |_| runtime.dispatch_action(GalleryAction::LoadMore)>
                    "Expand Collection"
                </button>
            </div>
        </Show>
    }
}

#[component]
fn WallpaperTile(item: WallpaperItem) -> impl IntoView {
    let runtime = use_gallery_runtime();
    let item_id = item.id.clone();
    let is_favorite = Signal::derive(move || runtime.state.get().is_favorite(&item_id));
    let signed_in = Signal::derive(move || runtime.state.get().session.is_some());

    let open = {
        let item = item.clone();
        move |_: web_sys::MouseEvent| {
            runtime.dispatch_action(GalleryAction::OpenPreview { item: item.clone() })
        }
    };
    let toggle = {
        let item_id = item.id.clone();
        move |ev: web_sys::MouseEvent| {
            ev.stop_propagation();
            runtime.dispatch_action(GalleryAction::ToggleFavorite {
                item_id: item_id.clone(),
            });
        }
    };

    view! {
        <article class="wallpaper-tile">
            <div class="wallpaper-frame" on:click=open>
                <img src=item.url.clone() alt=item.title.clone() loading="lazy" />
                <button
                    class="favorite-toggle"
                    class:active=move || is_favorite.get()
                    disabled=move || !signed_in.get()
                    aria-label=move || {
                        if is_favorite.get() { "Remove from favorites" } else { "Add to favorites" }
                    }
                    on:click=toggle
                >
                    {move || if is_favorite.get() { "\u{2665}" } else { "\u{2661}" }}
                </button>
            </div>
            <h3 class="wallpaper-title">{item.title.clone()}</h3>
        </article>
    }
}
