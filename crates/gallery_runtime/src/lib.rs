//! Wallux gallery runtime: catalog, reducer, host effect execution, and Leptos UI.

pub mod catalog;
pub mod components;
mod effect_executor;
pub mod error;
pub mod favorites;
pub mod host;
pub mod modal;
pub mod model;
pub mod reducer;
mod runtime_context;
pub mod view;

pub use catalog::{catalog, find_item, generate_catalog};
pub use components::{GalleryProvider, GalleryRuntimeContext, GalleryShell};
pub use error::GalleryError;
pub use favorites::FavoritesSet;
pub use host::{ActionSink, GalleryHostContext, TaskSpawner};
pub use model::*;
pub use reducer::{reduce_gallery, GalleryAction, GalleryEffect, ReducerError};
pub use view::{filtered_items, visible_page, GalleryPage};
