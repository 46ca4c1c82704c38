//! # Structured Ingredient Data Model
//!
//! This module defines the data structures produced by structuring a recipe's
//! ingredient block: individual ingredient records grouped under categories.
//!
//! ## Core Concepts
//!
//! - **IngredientRecord**: One ingredient phrase split into name, amount, unit and description
//! - **Category**: A named group of records, inferred from a heading line
//! - **StructuredIngredients**: All categories of one recipe, in order of appearance
//!
//! Amounts and units are kept verbatim as they appear in the source text
//! ("1/2", "큰술", "cups"); nothing is converted or normalized.
//!
//! ## Usage
//!
//! ```rust
//! use ingredient_structurer::ingredient_model::{Category, IngredientRecord, StructuredIngredients};
//!
//! let mut sauce = Category::new("양념");
//! sauce.push(IngredientRecord::new("간장").with_amount("1").with_unit("큰술"));
//!
//! let structured = StructuredIngredients { categories: vec![sauce] };
//! assert_eq!(structured.ingredient_count(), 1);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;

/// One parsed ingredient phrase
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct IngredientRecord {
    /// The ingredient name (e.g., "국간장", "flour")
    pub name: String,

    /// The quantity exactly as written (e.g., "1/2", "0.5"), empty if none
    pub amount: String,

    /// The unit exactly as written (e.g., "큰술", "g"), empty if none
    pub unit: String,

    /// Contents of the parenthetical note, empty if none
    pub description: String,
}

/// A named group of ingredients
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Category {
    /// Heading text, or the default label when no heading preceded the items
    #[serde(rename = "category")]
    pub label: String,

    /// Ingredients in order of appearance
    pub ingredients: Vec<IngredientRecord>,
}

/// All ingredient categories of a single recipe
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StructuredIngredients {
    /// Categories in order of appearance in the source text
    pub categories: Vec<Category>,
}

impl IngredientRecord {
    /// Create a record with just a name
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            ..Default::default()
        }
    }

    /// Set the amount
    pub fn with_amount(mut self, amount: &str) -> Self {
        self.amount = amount.to_string();
        self
    }

    /// Set the unit
    pub fn with_unit(mut self, unit: &str) -> Self {
        self.unit = unit.to_string();
        self
    }

    /// Set the description
    pub fn with_description(mut self, description: &str) -> Self {
        self.description = description.to_string();
        self
    }

    /// Check if an amount was extracted for this record
    pub fn has_amount(&self) -> bool {
        !self.amount.is_empty()
    }

    /// A record is only kept by the structurer when it has a name
    pub fn is_valid(&self) -> bool {
        !self.name.is_empty()
    }
}

impl Category {
    /// Create an empty category
    pub fn new(label: &str) -> Self {
        Self {
            label: label.to_string(),
            ingredients: Vec::new(),
        }
    }

    /// Create a category holding the given records
    pub fn with_ingredients(label: &str, ingredients: Vec<IngredientRecord>) -> Self {
        Self {
            label: label.to_string(),
            ingredients,
        }
    }

    /// Append a record
    pub fn push(&mut self, record: IngredientRecord) {
        self.ingredients.push(record);
    }
}

impl StructuredIngredients {
    /// An empty structure, as produced for blank input
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    /// Total number of ingredients across all categories
    pub fn ingredient_count(&self) -> usize {
        self.categories.iter().map(|c| c.ingredients.len()).sum()
    }

    /// Iterate over every ingredient, category by category
    pub fn iter_ingredients(&self) -> impl Iterator<Item = &IngredientRecord> {
        self.categories.iter().flat_map(|c| c.ingredients.iter())
    }
}

impl fmt::Display for IngredientRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)?;

        if self.has_amount() {
            write!(f, " {}{}", self.amount, self.unit)?;
        }

        if !self.description.is_empty() {
            write!(f, " ({})", self.description)?;
        }

        Ok(())
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]", self.label)?;
        for ingredient in &self.ingredients {
            write!(f, "\n  - {}", ingredient)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_builder() {
        let record = IngredientRecord::new("국간장")
            .with_amount("1")
            .with_unit("큰술")
            .with_description("또는 진간장");

        assert_eq!(record.name, "국간장");
        assert_eq!(record.amount, "1");
        assert_eq!(record.unit, "큰술");
        assert_eq!(record.description, "또는 진간장");
        assert!(record.has_amount());
        assert!(record.is_valid());
    }

    #[test]
    fn test_record_without_name_is_invalid() {
        let record = IngredientRecord::default().with_amount("2").with_unit("개");
        assert!(!record.is_valid());
    }

    #[test]
    fn test_record_display() {
        let record = IngredientRecord::new("대파").with_amount("1/2").with_unit("대");
        assert_eq!(record.to_string(), "대파 1/2대");

        let record = IngredientRecord::new("소금").with_description("약간");
        assert_eq!(record.to_string(), "소금 (약간)");
    }

    #[test]
    fn test_ingredient_count_and_iteration() {
        let structured = StructuredIngredients {
            categories: vec![
                Category::with_ingredients(
                    "주재료",
                    vec![IngredientRecord::new("두부"), IngredientRecord::new("애호박")],
                ),
                Category::new("고명"),
                Category::with_ingredients("양념", vec![IngredientRecord::new("소금")]),
            ],
        };

        assert_eq!(structured.ingredient_count(), 3);
        let names: Vec<&str> = structured.iter_ingredients().map(|i| i.name.as_str()).collect();
        assert_eq!(names, vec!["두부", "애호박", "소금"]);
        assert!(!structured.is_empty());
        assert!(StructuredIngredients::empty().is_empty());
    }

    #[test]
    fn test_category_serializes_label_as_category_key() {
        let category = Category::new("기본양념");
        let json = serde_json::to_string(&category).unwrap();
        assert_eq!(json, r#"{"category":"기본양념","ingredients":[]}"#);
    }
}
