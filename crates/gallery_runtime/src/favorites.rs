//! Ordered favorites set mirrored from the per-user remote document.

use platform_host::FavoritesDocument;

/// Favorited wallpaper ids in insertion order, without duplicates.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FavoritesSet {
    ids: Vec<String>,
}

impl FavoritesSet {
    /// Builds a set from a remote `ids` array, dropping repeated ids.
    pub fn from_ids<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut set = Self::default();
        for id in ids {
            let id = id.into();
            if !set.contains(&id) {
                set.ids.push(id);
            }
        }
        set
    }

    /// Replaces the set with a remote snapshot; a missing document means empty.
    pub fn from_document(document: Option<FavoritesDocument>) -> Self {
        document.map_or_else(Self::default, |doc| Self::from_ids(doc.ids))
    }

    pub fn contains(&self, id: &str) -> bool {
        self.ids.iter().any(|entry| entry == id)
    }

    /// Returns the set with `id` removed if present, appended otherwise.
    pub fn toggled(&self, id: &str) -> Self {
        let mut ids = self.ids.clone();
        if let Some(index) = ids.iter().position(|entry| entry == id) {
            ids.remove(index);
        } else {
            ids.push(id.to_string());
        }
        Self { ids }
    }

    pub fn ids(&self) -> &[String] {
        &self.ids
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn to_document(&self) -> FavoritesDocument {
        FavoritesDocument {
            ids: self.ids.clone(),
        }
    }
}
