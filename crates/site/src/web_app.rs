use gallery_runtime::{GalleryProvider, GalleryShell};
use leptos::*;
use leptos_meta::*;
use platform_host_web::build_host_services;

use crate::config::compiled_backend_config;

#[component]
pub fn SiteApp() -> impl IntoView {
    provide_meta_context();

    view! {
        <Title text="Wallux Aethel" />
        <Meta name="description" content="A curated wallpaper gallery with synced favorites." />
        <Meta name="theme-color" content="#050505" />

        <main class="site-root">
            <GalleryEntry />
        </main>
    }
}

#[component]
pub fn GalleryEntry() -> impl IntoView {
    let host_services = build_host_services(compiled_backend_config());

    view! {
        <GalleryProvider host_services=host_services>
            <GalleryShell />
        </GalleryProvider>
    }
}
