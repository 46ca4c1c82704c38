//! # Ingredient Structurer
//!
//! Turns free-text recipe ingredient blocks into categorized ingredient
//! records, stores them as a single JSON string, and computes frequency
//! statistics over a corpus of stored structures.

pub mod analyzer;
pub mod codec;
pub mod config;
pub mod ingredient_model;
pub mod ingredient_parser;
pub mod pipeline;
pub mod report;
pub mod structurer;
