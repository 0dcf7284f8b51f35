//! Catalog store - the immutable list of instruments with id lookups

use std::collections::HashMap;
use std::path::Path;

use rand::seq::SliceRandom;
use rand::Rng;
use thiserror::Error;

use crate::models::{Category, Item, ItemId};

/// Instruments shipped with the application
const BUILTIN_CATALOG: &str = include_str!("../../assets/catalog.json");

/// Catalog loading errors
#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("failed to read catalog: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse catalog: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("duplicate item id {0} in catalog")]
    DuplicateId(ItemId),
}

/// Read access to the catalog, as consumed by the quiz and favorites
pub trait CatalogProvider: Send + Sync {
    /// Every item, in catalog order
    fn list_all(&self) -> &[Item];

    /// Look up an item by id
    fn find_by_id(&self, id: ItemId) -> Option<&Item>;
}

/// Gallery filter criteria, all optional and combined with AND
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CatalogFilter {
    pub category: Option<Category>,
    pub era: Option<String>,
    /// Case-insensitive keyword matched against name and description
    pub search: Option<String>,
}

impl CatalogFilter {
    pub fn matches(&self, item: &Item) -> bool {
        if let Some(category) = self.category {
            if item.category != category {
                return false;
            }
        }

        if let Some(era) = &self.era {
            if &item.era != era {
                return false;
            }
        }

        match self.search.as_deref().map(str::trim) {
            Some(keyword) if !keyword.is_empty() => item.matches_keyword(keyword),
            _ => true,
        }
    }
}

/// In-memory catalog
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    /// Items in catalog order
    items: Vec<Item>,
    /// Position of each item by id
    index: HashMap<ItemId, usize>,
}

impl Catalog {
    /// Build a catalog, rejecting duplicate ids
    pub fn new(items: Vec<Item>) -> Result<Self, CatalogError> {
        let mut index = HashMap::with_capacity(items.len());

        for (position, item) in items.iter().enumerate() {
            if index.insert(item.id, position).is_some() {
                return Err(CatalogError::DuplicateId(item.id));
            }
        }

        Ok(Self { items, index })
    }

    /// The bundled instrument catalog
    pub fn builtin() -> Result<Self, CatalogError> {
        Self::from_json(BUILTIN_CATALOG)
    }

    /// Parse a catalog from a JSON array of items
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let items: Vec<Item> = serde_json::from_str(json)?;
        Self::new(items)
    }

    /// Load a catalog from a JSON file
    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let content = std::fs::read_to_string(path)?;
        let catalog = Self::from_json(&content)?;
        tracing::info!("Loaded {} catalog items from {:?}", catalog.len(), path);
        Ok(catalog)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Items matching `filter`, in catalog order
    pub fn filter(&self, filter: &CatalogFilter) -> Vec<&Item> {
        self.items.iter().filter(|i| filter.matches(i)).collect()
    }

    /// Distinct eras in first-seen order
    pub fn eras(&self) -> Vec<&str> {
        let mut eras: Vec<&str> = Vec::new();
        for item in &self.items {
            if !eras.contains(&item.era.as_str()) {
                eras.push(&item.era);
            }
        }
        eras
    }

    /// Item count per category, every category listed
    pub fn category_counts(&self) -> Vec<(Category, usize)> {
        Category::ALL
            .iter()
            .map(|c| (*c, self.items.iter().filter(|i| i.category == *c).count()))
            .collect()
    }

    /// Uniformly random item for the recommendation panel
    pub fn random_item<R>(&self, rng: &mut R) -> Option<&Item>
    where
        R: Rng + ?Sized,
    {
        self.items.choose(rng)
    }
}

impl CatalogProvider for Catalog {
    fn list_all(&self) -> &[Item] {
        &self.items
    }

    fn find_by_id(&self, id: ItemId) -> Option<&Item> {
        self.index.get(&id).map(|&position| &self.items[position])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashSet;

    #[test]
    fn test_builtin_catalog() {
        let catalog = Catalog::builtin().unwrap();

        assert_eq!(catalog.len(), 12);
        let ids: Vec<ItemId> = catalog.list_all().iter().map(|i| i.id).collect();
        assert_eq!(ids, (1..=12).collect::<Vec<_>>());

        for (_, count) in catalog.category_counts() {
            assert_eq!(count, 3);
        }
        assert!(catalog
            .list_all()
            .iter()
            .all(|i| !i.audio_path.is_empty() && !i.image_path.is_empty()));
    }

    #[test]
    fn test_find_by_id() {
        let catalog = Catalog::builtin().unwrap();

        assert_eq!(catalog.find_by_id(4).map(|i| i.name.as_str()), Some("Erhu"));
        assert!(catalog.find_by_id(99).is_none());
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let items = vec![
            Item::new(1, "Di", Category::Wind, "Han"),
            Item::new(1, "Xiao", Category::Wind, "Han"),
        ];

        assert!(matches!(
            Catalog::new(items),
            Err(CatalogError::DuplicateId(1))
        ));
    }

    #[test]
    fn test_from_json_rejects_garbage() {
        assert!(matches!(
            Catalog::from_json("not json"),
            Err(CatalogError::Parse(_))
        ));
    }

    #[test]
    fn test_load_from_file() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let path = temp_dir.path().join("catalog.json");
        std::fs::write(
            &path,
            r#"[{"id": 1, "name": "Di", "category": "wind", "era": "Han"}]"#,
        )
        .unwrap();

        let catalog = Catalog::load(&path).unwrap();
        assert_eq!(catalog.len(), 1);
        assert!(matches!(
            Catalog::load(&temp_dir.path().join("missing.json")),
            Err(CatalogError::Io(_))
        ));
    }

    #[test]
    fn test_filter_by_category_and_era() {
        let catalog = Catalog::builtin().unwrap();

        let bowed = catalog.filter(&CatalogFilter {
            category: Some(Category::Bowed),
            ..Default::default()
        });
        assert_eq!(bowed.iter().map(|i| i.id).collect::<Vec<_>>(), vec![4, 5, 6]);

        let era = bowed[0].era.clone();
        let narrowed = catalog.filter(&CatalogFilter {
            category: Some(Category::Bowed),
            era: Some(era.clone()),
            search: None,
        });
        assert!(narrowed.iter().all(|i| i.era == era));
        assert!(!narrowed.is_empty());
    }

    #[test]
    fn test_filter_search_is_case_insensitive() {
        let catalog = Catalog::builtin().unwrap();

        let hits = catalog.filter(&CatalogFilter {
            search: Some("PIPA".to_string()),
            ..Default::default()
        });
        assert!(hits.iter().any(|i| i.name == "Pipa"));

        let blank = catalog.filter(&CatalogFilter {
            search: Some("   ".to_string()),
            ..Default::default()
        });
        assert_eq!(blank.len(), catalog.len());
    }

    #[test]
    fn test_eras_are_distinct_in_order() {
        let items = vec![
            Item::new(1, "a", Category::Wind, "Han"),
            Item::new(2, "b", Category::Wind, "Tang"),
            Item::new(3, "c", Category::Bowed, "Han"),
        ];
        let catalog = Catalog::new(items).unwrap();

        assert_eq!(catalog.eras(), vec!["Han", "Tang"]);
    }

    #[test]
    fn test_random_item() {
        let catalog = Catalog::builtin().unwrap();
        let mut seen = HashSet::new();

        for seed in 0..200 {
            let mut rng = StdRng::seed_from_u64(seed);
            seen.insert(catalog.random_item(&mut rng).unwrap().id);
        }
        assert_eq!(seen.len(), 12);

        let empty = Catalog::default();
        assert!(empty.random_item(&mut StdRng::seed_from_u64(0)).is_none());
    }
}
