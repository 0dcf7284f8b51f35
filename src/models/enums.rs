//! Enums for Guyun

use serde::{Deserialize, Serialize};

/// Instrument family, by the way the instrument is played
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Wind,
    Bowed,
    Plucked,
    Percussion,
}

impl Category {
    /// All categories in display order
    pub const ALL: [Category; 4] = [
        Category::Wind,
        Category::Bowed,
        Category::Plucked,
        Category::Percussion,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Wind => "wind",
            Category::Bowed => "bowed",
            Category::Plucked => "plucked",
            Category::Percussion => "percussion",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "wind" => Some(Category::Wind),
            "bowed" => Some(Category::Bowed),
            "plucked" => Some(Category::Plucked),
            "percussion" => Some(Category::Percussion),
            _ => None,
        }
    }

    /// Human-readable name shown on cards and badges
    pub fn label(&self) -> &'static str {
        match self {
            Category::Wind => "Wind instrument",
            Category::Bowed => "Bowed string instrument",
            Category::Plucked => "Plucked string instrument",
            Category::Percussion => "Percussion instrument",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_from_str() {
        assert_eq!(Category::from_str("Wind"), Some(Category::Wind));
        assert_eq!(Category::from_str(" percussion "), Some(Category::Percussion));
        assert_eq!(Category::from_str("brass"), None);
    }

    #[test]
    fn test_category_serde_is_lowercase() {
        let json = serde_json::to_string(&Category::Plucked).unwrap();
        assert_eq!(json, "\"plucked\"");

        let parsed: Category = serde_json::from_str("\"bowed\"").unwrap();
        assert_eq!(parsed, Category::Bowed);
    }
}
