//! Favorites store - the persisted set of favorited item ids
//!
//! The set is read from storage on first access and written back in full on
//! every toggle. Storage faults never escape: a payload that cannot be read
//! or parsed is treated as an empty set, and a failed write only logs.

use std::sync::Arc;

use parking_lot::Mutex;

use super::CatalogProvider;
use crate::core::{NotificationBus, Topic};
use crate::models::{Item, ItemId};
use crate::storage::KeyValueStorage;

/// Storage key shared by every view that reads favorites
pub const DEFAULT_FAVORITES_KEY: &str = "favIds";

/// Persisted favorites with change notifications
pub struct FavoritesStore {
    storage: Arc<dyn KeyValueStorage>,
    bus: Arc<NotificationBus>,
    key: String,
    /// Favorited ids in insertion order, `None` until first loaded
    ids: Mutex<Option<Vec<ItemId>>>,
}

impl FavoritesStore {
    pub fn new(storage: Arc<dyn KeyValueStorage>, bus: Arc<NotificationBus>) -> Self {
        Self::with_key(storage, bus, DEFAULT_FAVORITES_KEY)
    }

    pub fn with_key(
        storage: Arc<dyn KeyValueStorage>,
        bus: Arc<NotificationBus>,
        key: impl Into<String>,
    ) -> Self {
        Self {
            storage,
            bus,
            key: key.into(),
            ids: Mutex::new(None),
        }
    }

    /// Check whether an id is favorited
    pub fn is_favorite(&self, id: ItemId) -> bool {
        self.with_ids(|ids| ids.contains(&id))
    }

    /// Number of favorited ids, stale ones included
    pub fn count(&self) -> usize {
        self.with_ids(|ids| ids.len())
    }

    /// Snapshot of the favorited ids in insertion order
    pub fn ids(&self) -> Vec<ItemId> {
        self.with_ids(|ids| ids.clone())
    }

    /// Flip membership of `id`, persist, and notify. Returns the new state.
    pub fn toggle_favorite(&self, id: ItemId) -> bool {
        let favorited = self.with_ids(|ids| {
            let favorited = match ids.iter().position(|&existing| existing == id) {
                Some(position) => {
                    ids.remove(position);
                    false
                }
                None => {
                    ids.push(id);
                    true
                }
            };
            self.persist(ids);
            favorited
        });

        tracing::debug!(
            "item {} {} favorites",
            id,
            if favorited { "added to" } else { "removed from" }
        );

        // lock is released here, handlers are free to query the store
        self.bus.publish(Topic::FavoritesChanged, None);

        favorited
    }

    /// Favorited items in catalog order. Ids missing from the catalog are skipped.
    pub fn list_favorite_items<'a, C>(&self, catalog: &'a C) -> Vec<&'a Item>
    where
        C: CatalogProvider + ?Sized,
    {
        self.with_ids(|ids| {
            catalog
                .list_all()
                .iter()
                .filter(|item| ids.contains(&item.id))
                .collect()
        })
    }

    /// Run `f` against the loaded set while holding the store lock
    fn with_ids<T>(&self, f: impl FnOnce(&mut Vec<ItemId>) -> T) -> T {
        let mut guard = self.ids.lock();
        let ids = guard.get_or_insert_with(|| self.load());
        f(ids)
    }

    fn load(&self) -> Vec<ItemId> {
        let raw = match self.storage.get(&self.key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Vec::new(),
            Err(e) => {
                tracing::warn!("Favorites storage unavailable, starting empty: {}", e);
                return Vec::new();
            }
        };

        let parsed: Vec<ItemId> = match serde_json::from_str(&raw) {
            Ok(ids) => ids,
            Err(e) => {
                tracing::warn!("Ignoring corrupt favorites payload: {}", e);
                return Vec::new();
            }
        };

        let mut ids = Vec::with_capacity(parsed.len());
        for id in parsed {
            if !ids.contains(&id) {
                ids.push(id);
            }
        }

        tracing::debug!("loaded {} favorite(s)", ids.len());
        ids
    }

    fn persist(&self, ids: &[ItemId]) {
        let payload = match serde_json::to_string(ids) {
            Ok(payload) => payload,
            Err(e) => {
                tracing::warn!("Failed to serialize favorites: {}", e);
                return;
            }
        };

        if let Err(e) = self.storage.set(&self.key, &payload) {
            tracing::warn!("Failed to persist favorites: {}", e);
        }
    }
}
