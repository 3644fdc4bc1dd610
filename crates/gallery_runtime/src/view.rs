//! Derived gallery views: category/search filtering and pagination.

use crate::{
    favorites::FavoritesSet,
    model::{Category, ViewState, WallpaperItem},
};

/// Returns whether `item` passes the category predicate for `category`.
pub fn matches_category(item: &WallpaperItem, category: Category, favorites: &FavoritesSet) -> bool {
    match category {
        Category::Curated => true,
        Category::Favorites => favorites.contains(&item.id),
        other => item.category == other,
    }
}

/// Case-insensitive substring match of `query` against the item title; empty queries pass.
pub fn matches_search(item: &WallpaperItem, query: &str) -> bool {
    query.is_empty() || item.title.to_lowercase().contains(&query.to_lowercase())
}

/// Items passing both predicates, in catalog order.
pub fn filtered_items<'a>(
    catalog: &'a [WallpaperItem],
    view: &ViewState,
    favorites: &FavoritesSet,
) -> Vec<&'a WallpaperItem> {
    catalog
        .iter()
        .filter(|item| {
            matches_category(item, view.active_category, favorites)
                && matches_search(item, &view.search_query)
        })
        .collect()
}

/// The rendered page of results plus whether a "load more" control should be offered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GalleryPage {
    pub items: Vec<WallpaperItem>,
    pub total: usize,
    pub has_more: bool,
}

/// Applies the pagination cutoff to the filtered results.
pub fn visible_page(
    catalog: &[WallpaperItem],
    view: &ViewState,
    favorites: &FavoritesSet,
) -> GalleryPage {
    let filtered = filtered_items(catalog, view, favorites);
    let total = filtered.len();
    GalleryPage {
        items: filtered
            .into_iter()
            .take(view.visible_count)
            .cloned()
            .collect(),
        total,
        has_more: view.visible_count < total,
    }
}
