use platform_host::Session;
use serde::{Deserialize, Serialize};

use crate::favorites::FavoritesSet;

pub const PAGE_SIZE: usize = 16;
pub const SWIPE_DISMISS_THRESHOLD_PX: i32 = 80;
pub const DOWNLOAD_RELEASE_DELAY_MS: u32 = 1_500;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Category {
    #[default]
    Curated,
    Atmospheric,
    Vantage,
    Abstract,
    Favorites,
}

impl Category {
    pub const ALL: [Category; 5] = [
        Category::Curated,
        Category::Atmospheric,
        Category::Vantage,
        Category::Abstract,
        Category::Favorites,
    ];

    /// Categories an item can carry; excludes the Favorites pseudo-category.
    pub const ASSIGNABLE: [Category; 4] = [
        Category::Curated,
        Category::Atmospheric,
        Category::Vantage,
        Category::Abstract,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::Curated => "Curated",
            Self::Atmospheric => "Atmospheric",
            Self::Vantage => "Vantage",
            Self::Abstract => "Abstract",
            Self::Favorites => "Favorites",
        }
    }

    pub fn glyph(self) -> &'static str {
        match self {
            Self::Curated => "\u{2726}",
            Self::Atmospheric => "\u{224B}",
            Self::Vantage => "\u{25CE}",
            Self::Abstract => "\u{25D0}",
            Self::Favorites => "\u{2665}",
        }
    }

    pub fn is_pseudo(self) -> bool {
        matches!(self, Self::Curated | Self::Favorites)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WallpaperItem {
    pub id: String,
    pub title: String,
    pub category: Category,
    pub url: String,
    pub hd_url: String,
    pub resolution: String,
    pub file_size: String,
}

impl WallpaperItem {
    /// File name used when the high-resolution asset is saved.
    pub fn download_file_name(&self) -> String {
        format!("WALLUX_{}.jpg", self.id)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewState {
    pub active_category: Category,
    pub search_query: String,
    pub visible_count: usize,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            active_category: Category::Curated,
            search_query: String::new(),
            visible_count: PAGE_SIZE,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ModalState {
    #[default]
    Closed,
    Open {
        item: WallpaperItem,
        /// Whether the synthetic history entry pushed on open has not been consumed yet.
        history_entry: bool,
    },
}

impl ModalState {
    pub fn item(&self) -> Option<&WallpaperItem> {
        match self {
            Self::Closed => None,
            Self::Open { item, .. } => Some(item),
        }
    }

    pub fn is_open(&self) -> bool {
        matches!(self, Self::Open { .. })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GalleryState {
    pub view: ViewState,
    pub modal: ModalState,
    pub favorites: FavoritesSet,
    pub session: Option<Session>,
    pub downloading_id: Option<String>,
}

impl GalleryState {
    pub fn selected_item(&self) -> Option<&WallpaperItem> {
        self.modal.item()
    }

    pub fn is_favorite(&self, item_id: &str) -> bool {
        self.favorites.contains(item_id)
    }

    pub fn is_downloading(&self, item_id: &str) -> bool {
        self.downloading_id.as_deref() == Some(item_id)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SwipeGesture {
    pub start_y: Option<i32>,
    pub end_y: Option<i32>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct InteractionState {
    pub swipe: SwipeGesture,
}
