//! Binary entrypoint for the browser-hosted gallery.

#[cfg(all(target_arch = "wasm32", feature = "csr"))]
fn main() {
    site::mount();
}

#[cfg(not(all(target_arch = "wasm32", feature = "csr")))]
fn main() {
    eprintln!(
        "This binary is intended for the browser/WASM workflow. Serve `crates/site` with `trunk serve`, or build `site_app` for wasm32 with the `csr` feature."
    );
}
