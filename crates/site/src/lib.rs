mod config;
mod web_app;

pub use config::{compiled_backend_config, resolve_backend_config};
pub use web_app::{GalleryEntry, SiteApp};

#[cfg(all(feature = "csr", target_arch = "wasm32"))]
pub fn mount() {
    console_error_panic_hook::set_once();
    leptos::mount_to_body(|| leptos::view! { <SiteApp /> })
}
