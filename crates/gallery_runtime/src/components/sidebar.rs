use super::*;

#[component]
pub(super) fn Sidebar() -> impl IntoView {
    let runtime = use_gallery_runtime();
    let active = Signal::derive(move || runtime.state.get().view.active_category);

    view! {
        <aside class="gallery-sidebar">
            <button
                class="brand-mark"
                aria-label="Reset filters"
                on:click=move |_| runtime.dispatch_action(GalleryAction::ResetFilters)
            >
                <span class="brand-dot" aria-hidden="true"></span>
            </button>
            <nav class="category-nav" aria-label="Categories">
                {Category::ALL
                    .into_iter()
                    .map(|category| {
                        let is_active = move || active.get() == category;
                        view! {
                            <button
                                class="category-button"
                                class:active=is_active
                                title=category.label()
                                aria-label=category.label()
                                aria-pressed=move || is_active().to_string()
                                on:click=move |_| {
                                    runtime.dispatch_action(GalleryAction::SetCategory { category })
                                }
                            >
                                <span aria-hidden="true">{category.glyph()}</span>
                                <Show when=is_active fallback=|| ()>
                                    <span class="category-indicator" aria-hidden="true"></span>
                                </Show>
                            </button>
                        }
                    })
                    .collect_view()}
            </nav>
        </aside>
    }
}
