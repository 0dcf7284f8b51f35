//! In-memory stores for the catalog and favorites

mod catalog_store;
mod favorites_store;

pub use catalog_store::{Catalog, CatalogError, CatalogFilter, CatalogProvider};
pub use favorites_store::{FavoritesStore, DEFAULT_FAVORITES_KEY};
