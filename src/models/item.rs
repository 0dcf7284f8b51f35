//! Item model

use serde::{Deserialize, Serialize};

use super::Category;

/// Stable catalog identifier
pub type ItemId = i64;

/// A catalog entry (one instrument)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    /// Unique id for the lifetime of the catalog
    pub id: ItemId,
    /// Display name
    pub name: String,
    /// Instrument family
    pub category: Category,
    /// Historical period the instrument is associated with
    pub era: String,
    /// Long description
    #[serde(default)]
    pub description: String,
    /// Relative path to the card image
    #[serde(default)]
    pub image_path: String,
    /// Relative path to the audio sample
    #[serde(default)]
    pub audio_path: String,
}

impl Item {
    /// Create an item with empty description and media paths
    pub fn new(
        id: ItemId,
        name: impl Into<String>,
        category: Category,
        era: impl Into<String>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            category,
            era: era.into(),
            description: String::new(),
            image_path: String::new(),
            audio_path: String::new(),
        }
    }

    /// Case-insensitive keyword match against name and description
    pub fn matches_keyword(&self, keyword: &str) -> bool {
        let keyword = keyword.to_lowercase();
        self.name.to_lowercase().contains(&keyword)
            || self.description.to_lowercase().contains(&keyword)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_item_deserializes_camel_case() {
        let json = r#"{
            "id": 4,
            "name": "Erhu",
            "category": "bowed",
            "era": "Tang / Song",
            "imagePath": "./assets/img/erhu.jpg",
            "audioPath": "./assets/audio/erhu.mp3"
        }"#;

        let item: Item = serde_json::from_str(json).unwrap();
        assert_eq!(item.id, 4);
        assert_eq!(item.category, Category::Bowed);
        assert_eq!(item.audio_path, "./assets/audio/erhu.mp3");
        assert!(item.description.is_empty());
    }

    #[test]
    fn test_matches_keyword() {
        let mut item = Item::new(7, "Guqin", Category::Plucked, "Pre-Qin");
        item.description = "Seven strings and thirteen studs".to_string();

        assert!(item.matches_keyword("guqin"));
        assert!(item.matches_keyword("STRINGS"));
        assert!(!item.matches_keyword("bow"));
    }
}
