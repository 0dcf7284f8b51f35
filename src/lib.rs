//! Guyun - a listening quiz and favorites shelf for traditional Chinese instruments
//!
//! The crate holds the quiz engine (question generation, scoring, session
//! phases) and the favorites store shared by every view. Rendering is left
//! to whatever front end drives them.

pub mod config;
pub mod core;
pub mod models;
pub mod storage;
pub mod stores;
pub mod utils;

pub use crate::core::{NotificationBus, Phase, QuizConfig, QuizError, QuizSession, Topic};
pub use crate::models::{Category, Item, ItemId};
pub use crate::stores::{Catalog, CatalogProvider, FavoritesStore};
