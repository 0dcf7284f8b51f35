//! Configuration module for Guyun
//!
//! This module contains the settings structure and path management.

mod paths;
mod settings;

pub use paths::Paths;
pub use settings::Settings;

/// Characters of an item description shown in quiz feedback
pub const FEEDBACK_EXCERPT_CHARS: usize = 80;

/// Characters of an item description shown on gallery cards
pub const CARD_EXCERPT_CHARS: usize = 60;
