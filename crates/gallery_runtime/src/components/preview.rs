use super::*;

fn first_touch_y(ev: &web_sys::TouchEvent) -> Option<i32> {
    ev.target_touches().get(0).map(|touch| touch.client_y())
}

fn download_label(downloading: bool) -> &'static str {
    if downloading {
        "Downloading..."
    } else {
        "Download Asset"
    }
}

#[component]
pub(super) fn PreviewModal() -> impl IntoView {
    let runtime = use_gallery_runtime();
    let selected = create_memo(move |_| runtime.state.get().selected_item().cloned());

    let close = move |_: web_sys::MouseEvent| runtime.dispatch_action(GalleryAction::ClosePreview);
    let close_button = move |ev: web_sys::MouseEvent| {
        ev.stop_propagation();
        runtime.dispatch_action(GalleryAction::ClosePreview);
    };
    let touch_start = move |ev: web_sys::TouchEvent| {
        if let Some(y) = first_touch_y(&ev) {
            runtime.dispatch_action(GalleryAction::TouchStart { y });
        }
    };
    let touch_move = move |ev: web_sys::TouchEvent| {
        if let Some(y) = first_touch_y(&ev) {
            runtime.dispatch_action(GalleryAction::TouchMove { y });
        }
    };
    let touch_end = move |_: web_sys::TouchEvent| runtime.dispatch_action(GalleryAction::TouchEnd);

    move || {
        selected
            .get()
            .map(|item| {
                let item_id = item.id.clone();
                let downloading = Signal::derive(move || {
                    runtime.state.get().is_downloading(&item_id)
                });
                let download = {
                    let item = item.clone();
                    move |_: web_sys::MouseEvent| {
                        runtime.dispatch_action(GalleryAction::StartDownload {
                            item: item.clone(),
                        })
                    }
                };
                view! {
                    <div class="preview-modal" role="dialog" aria-modal="true" aria-label=item.title.clone()>
                        <div class="preview-backdrop" on:click=close></div>
                        <div class="preview-body">
                            <div
                                class="preview-stage"
                                on:click=close
                                on:touchstart=touch_start
                                on:touchmove=touch_move
                                on:touchend=touch_end
                            >
                                <img
                                    src=item.hd_url.clone()
                                    alt=item.title.clone()
                                    on:click=|ev: web_sys::MouseEvent| ev.stop_propagation()
                                />
                                <button class="preview-close" aria-label="Close preview" on:click=close_button>
                                    "\u{2715}"
                                </button>
                            </div>
                            <aside
                                class="preview-info"
                                on:click=|ev: web_sys::MouseEvent| ev.stop_propagation()
                            >
                                <h2>{item.title.clone()}</h2>
                                <dl class="preview-meta">
                                    <dt>"Resolution"</dt>
                                    <dd>{item.resolution.clone()}</dd>
                                    <dt>"Size"</dt>
                                    <dd>{item.file_size.clone()}</dd>
                                    <dt>"Category"</dt>
                                    <dd>{item.category.label()}</dd>
                                </dl>
                                <button
                                    class="preview-download"
                                    class:busy=move || downloading.get()
                                    on:click=download
                                >
                                    {move || download_label(downloading.get())}
                                </button>
                            </aside>
                        </div>
                    </div>
                }
            })
    }
}
