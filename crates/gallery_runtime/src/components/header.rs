use super::*;

fn result_label(total: usize) -> String {
    match total {
        1 => "1 wallpaper".to_string(),
        n => format!("{n} wallpapers"),
    }
}

#[component]
pub(super) fn GalleryHeader(total: Signal<usize>) -> impl IntoView {
    let runtime = use_gallery_runtime();
    let query = Signal::derive(move || runtime.state.get().view.search_query);

    view! {
        <header class="gallery-header">
            <div class="gallery-title">
                <h1>"Wallux " <span class="gallery-title-accent">"Aethel"</span></h1>
                <p class="result-count" aria-live="polite">{move || result_label(total.get())}</p>
            </div>
            <label class="search-field">
                <span class="search-icon" aria-hidden="true">"\u{2315}"</span>
                <input
                    type="text"
                    placeholder="FILTER COLLECTION..."
                    aria-label="Filter collection"
                    prop:value=move || query.get()
                    on:input=move |ev| {
                        runtime.dispatch_action(GalleryAction::SetSearchQuery {
                            query: event_target_value(&ev),
                        })
                    }
                />
            </label>
        </header>
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::result_label;

    #[test]
    fn result_label_pluralizes() {
        assert_eq!(result_label(0), "0 wallpapers");
        assert_eq!(result_label(1), "1 wallpaper");
        assert_eq!(result_label(120), "120 wallpapers");
    }
}
