//! Utility modules for Guyun

pub mod text;
