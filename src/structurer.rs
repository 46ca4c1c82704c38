//! # Category Structurer
//!
//! Turns a recipe's whole ingredient block into [`StructuredIngredients`] by
//! classifying each line as a comma-separated list, a single measured item, or
//! a category heading.
//!
//! Classification precedence is fixed and evaluated per non-blank line:
//!
//! 1. A line containing a comma is a list; every segment is parsed as an item.
//! 2. A line whose item parse yields an amount is a single item.
//! 3. Anything else is a heading and opens a new category.
//!
//! Items seen while no heading is open go into a fresh category carrying the
//! default label. Those default categories never become the open heading, so
//! each such line gets its own category.

use crate::config::StructureConfig;
use crate::ingredient_model::{Category, IngredientRecord, StructuredIngredients};
use crate::ingredient_parser::parse_item;
use log::{debug, trace};

/// Structures ingredient blocks with a given configuration
#[derive(Debug, Clone, Default)]
pub struct Structurer {
    config: StructureConfig,
}

impl Structurer {
    /// Create a structurer using the default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a structurer with a custom configuration
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ingredient_structurer::config::StructureConfig;
    /// use ingredient_structurer::structurer::Structurer;
    ///
    /// let structurer = Structurer::with_config(StructureConfig::korean());
    /// let structured = structurer.structure(Some("소금 1작은술"));
    /// assert_eq!(structured.categories[0].label, "기본재료");
    /// ```
    pub fn with_config(config: StructureConfig) -> Self {
        Self { config }
    }

    /// Structure one ingredient block
    ///
    /// Missing or blank input yields an empty structure. Never fails.
    pub fn structure(&self, block: Option<&str>) -> StructuredIngredients {
        let block = match block {
            Some(text) if !text.trim().is_empty() => text,
            _ => return StructuredIngredients::empty(),
        };

        let mut categories: Vec<Category> = Vec::new();
        // Index into `categories` of the open heading, if any
        let mut current: Option<usize> = None;

        for (line_number, line) in block.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }

            if line.contains(',') {
                let items: Vec<IngredientRecord> = line
                    .split(',')
                    .filter_map(parse_item)
                    .filter(IngredientRecord::is_valid)
                    .collect();
                trace!("Line {}: list with {} items", line_number, items.len());
                self.append(&mut categories, current, items);
                continue;
            }

            match parse_item(line) {
                Some(record) if record.has_amount() => {
                    trace!("Line {}: single item '{}'", line_number, record.name);
                    if record.is_valid() {
                        self.append(&mut categories, current, vec![record]);
                    } else {
                        debug!("Dropping nameless item on line {}: '{}'", line_number, line);
                    }
                }
                _ => {
                    trace!("Line {}: heading '{}'", line_number, line);
                    categories.push(Category::new(line));
                    current = Some(categories.len() - 1);
                }
            }
        }

        debug!(
            "Structured block into {} categories with {} ingredients",
            categories.len(),
            categories.iter().map(|c| c.ingredients.len()).sum::<usize>()
        );

        StructuredIngredients { categories }
    }

    fn append(
        &self,
        categories: &mut Vec<Category>,
        current: Option<usize>,
        items: Vec<IngredientRecord>,
    ) {
        match current.and_then(|index| categories.get_mut(index)) {
            Some(category) => category.ingredients.extend(items),
            None => categories.push(Category::with_ingredients(&self.config.default_label, items)),
        }
    }
}

/// Structure one ingredient block with the default configuration
///
/// # Examples
///
/// ```rust
/// use ingredient_structurer::structurer::structure_ingredients;
///
/// let structured = structure_ingredients(Some("기본양념\n소금, 후추, 설탕\n다진마늘 1작은술"));
/// assert_eq!(structured.categories.len(), 1);
/// assert_eq!(structured.categories[0].label, "기본양념");
/// assert_eq!(structured.categories[0].ingredients.len(), 4);
///
/// assert!(structure_ingredients(None).is_empty());
/// ```
pub fn structure_ingredients(block: Option<&str>) -> StructuredIngredients {
    Structurer::new().structure(block)
}
