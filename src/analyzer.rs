//! # Corpus Analyzer
//!
//! Computes frequency statistics over many stored ingredient structures:
//! the most common category labels, ingredient names and units, and the mean
//! number of ingredients per recipe.
//!
//! Records that fail to decode are skipped and counted; they never abort the
//! analysis. Frequency ties are ranked by first appearance in the corpus.
//!
//! ## Usage
//!
//! ```rust
//! use ingredient_structurer::analyzer::analyze;
//!
//! let records = vec![
//!     ("1", r#"{"categories":[{"category":"양념","ingredients":[{"name":"간장","amount":"1","unit":"큰술","description":""}]}]}"#),
//!     ("2", "not json"),
//! ];
//!
//! let stats = analyze(records);
//! assert_eq!(stats.parsed_recipes, 1);
//! assert_eq!(stats.skipped_recipes, 1);
//! assert_eq!(stats.top_ingredients[0].value, "간장");
//! ```

use crate::codec::deserialize;
use crate::config::AnalysisConfig;
use crate::ingredient_model::StructuredIngredients;
use serde::Serialize;
use std::collections::HashMap;
use std::fmt::Display;
use tracing::{debug, info, warn};

/// One row of a top-K table
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FrequencyEntry {
    pub value: String,
    pub count: usize,
}

/// Counter that remembers the order in which values were first seen
#[derive(Debug, Clone, Default)]
pub struct FrequencyTable {
    entries: Vec<FrequencyEntry>,
    index: HashMap<String, usize>,
}

impl FrequencyTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one occurrence of `value`
    pub fn record(&mut self, value: &str) {
        self.record_n(value, 1);
    }

    fn record_n(&mut self, value: &str, n: usize) {
        match self.index.get(value) {
            Some(&position) => self.entries[position].count += n,
            None => {
                self.index.insert(value.to_string(), self.entries.len());
                self.entries.push(FrequencyEntry {
                    value: value.to_string(),
                    count: n,
                });
            }
        }
    }

    /// Occurrences of `value` so far
    pub fn count(&self, value: &str) -> usize {
        self.index
            .get(value)
            .map(|&position| self.entries[position].count)
            .unwrap_or(0)
    }

    /// Number of distinct values
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The `k` most frequent values, ties in first-seen order
    pub fn top_k(&self, k: usize) -> Vec<FrequencyEntry> {
        let mut ranked = self.entries.clone();
        // Stable sort keeps first-seen order among equal counts
        ranked.sort_by(|a, b| b.count.cmp(&a.count));
        ranked.truncate(k);
        ranked
    }

    /// Add the counts of a table built from a later part of the corpus
    pub fn merge(&mut self, other: &FrequencyTable) {
        for entry in &other.entries {
            self.record_n(&entry.value, entry.count);
        }
    }
}

/// Aggregate statistics over a corpus of recipes
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CorpusStatistics {
    /// Records handed to the analyzer, decodable or not
    pub total_records: usize,
    /// Records that decoded successfully
    pub parsed_recipes: usize,
    /// Records skipped because they failed to decode
    pub skipped_recipes: usize,
    pub top_categories: Vec<FrequencyEntry>,
    pub top_ingredients: Vec<FrequencyEntry>,
    pub top_units: Vec<FrequencyEntry>,
    /// Total ingredients divided by parsed recipes, 0 when none parsed
    pub mean_ingredients: f64,
}

/// Running counts for a corpus, or for one partition of it
#[derive(Debug, Clone, Default)]
pub struct CorpusAccumulator {
    categories: FrequencyTable,
    ingredients: FrequencyTable,
    units: FrequencyTable,
    parsed_recipes: usize,
    skipped_recipes: usize,
    total_ingredients: usize,
}

impl CorpusAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one decoded recipe
    pub fn add(&mut self, structured: &StructuredIngredients) {
        for category in &structured.categories {
            self.categories.record(&category.label);
            self.total_ingredients += category.ingredients.len();

            for ingredient in &category.ingredients {
                self.ingredients.record(&ingredient.name);
                if !ingredient.unit.is_empty() {
                    self.units.record(&ingredient.unit);
                }
            }
        }
        self.parsed_recipes += 1;
    }

    /// Count one record that could not be decoded
    pub fn record_skip(&mut self) {
        self.skipped_recipes += 1;
    }

    /// Fold in the counts of a later partition
    pub fn merge(&mut self, other: &CorpusAccumulator) {
        self.categories.merge(&other.categories);
        self.ingredients.merge(&other.ingredients);
        self.units.merge(&other.units);
        self.parsed_recipes += other.parsed_recipes;
        self.skipped_recipes += other.skipped_recipes;
        self.total_ingredients += other.total_ingredients;
    }

    pub fn parsed_recipes(&self) -> usize {
        self.parsed_recipes
    }

    pub fn skipped_recipes(&self) -> usize {
        self.skipped_recipes
    }

    /// Produce the statistics, keeping the configured number of top values
    pub fn finish(&self, config: &AnalysisConfig) -> CorpusStatistics {
        let mean_ingredients = if self.parsed_recipes == 0 {
            0.0
        } else {
            self.total_ingredients as f64 / self.parsed_recipes as f64
        };

        CorpusStatistics {
            total_records: self.parsed_recipes + self.skipped_recipes,
            parsed_recipes: self.parsed_recipes,
            skipped_recipes: self.skipped_recipes,
            top_categories: self.categories.top_k(config.top_categories),
            top_ingredients: self.ingredients.top_k(config.top_ingredients),
            top_units: self.units.top_k(config.top_units),
            mean_ingredients,
        }
    }
}

/// Analyzer over `(recipe_id, serialized_structure)` records
#[derive(Debug, Clone, Default)]
pub struct CorpusAnalyzer {
    config: AnalysisConfig,
}

impl CorpusAnalyzer {
    pub fn new(config: AnalysisConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    /// Decode and count every record, skipping the ones that fail to decode
    pub fn analyze<I, K, S>(&self, records: I) -> CorpusStatistics
    where
        I: IntoIterator<Item = (K, S)>,
        K: Display,
        S: AsRef<str>,
    {
        let mut accumulator = CorpusAccumulator::new();
        self.accumulate(&mut accumulator, records);
        let stats = accumulator.finish(&self.config);

        info!(
            total = stats.total_records,
            parsed = stats.parsed_recipes,
            skipped = stats.skipped_recipes,
            "Corpus analysis complete"
        );

        stats
    }

    /// Feed records into an existing accumulator
    pub fn accumulate<I, K, S>(&self, accumulator: &mut CorpusAccumulator, records: I)
    where
        I: IntoIterator<Item = (K, S)>,
        K: Display,
        S: AsRef<str>,
    {
        for (recipe_id, encoded) in records {
            match deserialize(encoded.as_ref()) {
                Ok(structured) => {
                    debug!(
                        recipe_id = %recipe_id,
                        categories = structured.categories.len(),
                        "Decoded recipe structure"
                    );
                    accumulator.add(&structured);
                }
                Err(err) => {
                    warn!(recipe_id = %recipe_id, error = %err, "Skipping undecodable recipe");
                    accumulator.record_skip();
                }
            }
        }
    }
}

/// Analyze records with the default top-K sizes (10 categories, 20 ingredients, 10 units)
pub fn analyze<I, K, S>(records: I) -> CorpusStatistics
where
    I: IntoIterator<Item = (K, S)>,
    K: Display,
    S: AsRef<str>,
{
    CorpusAnalyzer::default().analyze(records)
}
