//! Data models for Guyun
//!
//! Catalog records are read-only to the rest of the crate.

mod enums;
mod item;

pub use enums::Category;
pub use item::{Item, ItemId};
