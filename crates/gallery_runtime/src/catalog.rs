//! Fixed wallpaper catalog generated once at startup.

use std::rc::Rc;

use rand::Rng;

use crate::model::{Category, WallpaperItem};

pub const CATALOG_SIZE: usize = 120;
pub const SEED_BASE: u32 = 4_000;
pub const IMAGE_SERVICE_HOST: &str = "picsum.photos";
pub const PREVIEW_SIZE: (u32, u32) = (800, 1_000);
pub const HIGH_RES_SIZE: (u32, u32) = (3_840, 2_160);

pub const TITLES: [&str; 25] = [
    "Ethereal Drift",
    "Silent Summit",
    "Obsidian Flow",
    "Neon Pulse",
    "Arctic Stillness",
    "Void Walker",
    "Solar Flare",
    "Urban Decay",
    "Crimson Tide",
    "Golden Hour",
    "Marble Mist",
    "Deep Azure",
    "Static Rain",
    "Lunar Path",
    "Verdant Veil",
    "Cyber Echo",
    "Sand Storm",
    "Liquid Chrome",
    "Prism Break",
    "Velvet Night",
    "Fractal Bloom",
    "Glacier Peak",
    "Saffron Dust",
    "Cobalt Dream",
    "Indigo Rise",
];

/// Builds the image-by-seed URL for one size variant.
pub fn seeded_image_url(seed: u32, (width, height): (u32, u32)) -> String {
    format!("https://{IMAGE_SERVICE_HOST}/seed/{seed}/{width}/{height}")
}

fn catalog_title(index: usize) -> String {
    let base = TITLES[index % TITLES.len()];
    let cycle = index / TITLES.len() + 1;
    format!("{base} {cycle:02}")
}

fn random_file_size<R: Rng + ?Sized>(rng: &mut R) -> String {
    format!("{:.1} MB", rng.gen_range(4.0_f64..8.0))
}

/// Generates the catalog with a caller-supplied RNG for the cosmetic file-size strings.
pub fn generate_catalog_with<R: Rng + ?Sized>(rng: &mut R) -> Vec<WallpaperItem> {
    (0..CATALOG_SIZE)
        .map(|index| {
            let seed = SEED_BASE + index as u32;
            let resolution = format!("{} x {}", HIGH_RES_SIZE.0, HIGH_RES_SIZE.1);
            WallpaperItem {
                id: format!("wall-v2-{index}"),
                title: catalog_title(index),
                category: Category::ASSIGNABLE[index % Category::ASSIGNABLE.len()],
                url: seeded_image_url(seed, PREVIEW_SIZE),
                hd_url: seeded_image_url(seed, HIGH_RES_SIZE),
                resolution,
                file_size: random_file_size(rng),
            }
        })
        .collect()
}

/// Generates a fresh catalog using the thread RNG.
pub fn generate_catalog() -> Vec<WallpaperItem> {
    generate_catalog_with(&mut rand::thread_rng())
}

thread_local! {
    static CATALOG: Rc<[WallpaperItem]> = generate_catalog().into();
}

/// Returns the process-wide catalog, generating it on first use.
pub fn catalog() -> Rc<[WallpaperItem]> {
    CATALOG.with(Rc::clone)
}

/// Looks up a catalog item by id.
pub fn find_item<'a>(catalog: &'a [WallpaperItem], item_id: &str) -> Option<&'a WallpaperItem> {
    catalog.iter().find(|item| item.id == item_id)
}
