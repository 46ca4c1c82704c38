//! # Corpus Report
//!
//! Renders [`CorpusStatistics`] as a JSON report file for downstream tools and
//! as a short console summary. Report keys come in an English and a Korean
//! variant; the Korean keys match the reports produced for the recipe corpus.

use crate::analyzer::{CorpusStatistics, FrequencyEntry};
pub use crate::config::ReportLocale;
use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::ser::{Serialize, SerializeMap, Serializer};
use std::fmt::Write as _;
use std::fs;
use std::path::Path;

struct ReportKeys {
    total_recipes: &'static str,
    category_stats: &'static str,
    ingredient_stats: &'static str,
    unit_stats: &'static str,
    average_ingredients: &'static str,
    generated_at: &'static str,
}

const ENGLISH_KEYS: ReportKeys = ReportKeys {
    total_recipes: "total_recipes",
    category_stats: "category_stats",
    ingredient_stats: "ingredient_stats",
    unit_stats: "unit_stats",
    average_ingredients: "average_ingredients",
    generated_at: "generated_at",
};

const KOREAN_KEYS: ReportKeys = ReportKeys {
    total_recipes: "총_레시피_수",
    category_stats: "카테고리_통계",
    ingredient_stats: "재료_통계",
    unit_stats: "단위_통계",
    average_ingredients: "평균_재료_수",
    generated_at: "생성_시각",
};

impl ReportLocale {
    fn keys(self) -> &'static ReportKeys {
        match self {
            ReportLocale::English => &ENGLISH_KEYS,
            ReportLocale::Korean => &KOREAN_KEYS,
        }
    }
}

/// Serializes a ranked table as a JSON object in rank order
struct RankedTable<'a>(&'a [FrequencyEntry]);

impl Serialize for RankedTable<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for entry in self.0 {
            map.serialize_entry(&entry.value, &entry.count)?;
        }
        map.end()
    }
}

/// A corpus report ready to be written as JSON
#[derive(Debug, Clone)]
pub struct CorpusReport<'a> {
    stats: &'a CorpusStatistics,
    locale: ReportLocale,
    generated_at: DateTime<Utc>,
}

impl<'a> CorpusReport<'a> {
    pub fn new(stats: &'a CorpusStatistics, locale: ReportLocale) -> Self {
        Self::with_timestamp(stats, locale, Utc::now())
    }

    /// Build a report with a fixed generation time
    pub fn with_timestamp(
        stats: &'a CorpusStatistics,
        locale: ReportLocale,
        generated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            stats,
            locale,
            generated_at,
        }
    }

    /// Mean ingredient count rounded to two decimals
    pub fn average_ingredients(&self) -> f64 {
        (self.stats.mean_ingredients * 100.0).round() / 100.0
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        serde_json::to_string_pretty(self).context("Failed to encode corpus report")
    }
}

impl Serialize for CorpusReport<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let keys = self.locale.keys();
        let mut map = serializer.serialize_map(Some(6))?;
        map.serialize_entry(keys.total_recipes, &self.stats.total_records)?;
        map.serialize_entry(keys.category_stats, &RankedTable(&self.stats.top_categories))?;
        map.serialize_entry(keys.ingredient_stats, &RankedTable(&self.stats.top_ingredients))?;
        map.serialize_entry(keys.unit_stats, &RankedTable(&self.stats.top_units))?;
        map.serialize_entry(keys.average_ingredients, &self.average_ingredients())?;
        map.serialize_entry(keys.generated_at, &self.generated_at.to_rfc3339())?;
        map.end()
    }
}

/// Write a report as pretty-printed JSON
pub fn write_report(path: &Path, report: &CorpusReport<'_>) -> Result<()> {
    let json = report.to_json_pretty()?;
    fs::write(path, json)
        .with_context(|| format!("Failed to write report to {}", path.display()))?;
    log::info!("Corpus report written to {}", path.display());
    Ok(())
}

/// Render a console summary listing the `top_n` leading values of each table
pub fn render_summary(stats: &CorpusStatistics, top_n: usize) -> String {
    let mut output = String::new();

    let _ = writeln!(output, "Total recipes: {}", stats.total_records);
    let _ = writeln!(
        output,
        "Parsed: {}, skipped: {}",
        stats.parsed_recipes, stats.skipped_recipes
    );
    let _ = writeln!(
        output,
        "Average ingredients per recipe: {:.2}",
        stats.mean_ingredients
    );

    for (title, table) in [
        ("categories", &stats.top_categories),
        ("ingredients", &stats.top_ingredients),
        ("units", &stats.top_units),
    ] {
        let _ = writeln!(output, "\nTop {} {}:", top_n.min(table.len()), title);
        for entry in table.iter().take(top_n) {
            let _ = writeln!(output, "  - {}: {} times", entry.value, entry.count);
        }
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn stats() -> CorpusStatistics {
        CorpusStatistics {
            total_records: 3,
            parsed_recipes: 2,
            skipped_recipes: 1,
            top_categories: vec![FrequencyEntry {
                value: "양념".to_string(),
                count: 2,
            }],
            top_ingredients: vec![
                FrequencyEntry {
                    value: "소금".to_string(),
                    count: 2,
                },
                FrequencyEntry {
                    value: "간장".to_string(),
                    count: 1,
                },
            ],
            top_units: Vec::new(),
            mean_ingredients: 5.0 / 3.0,
        }
    }

    #[test]
    fn test_average_is_rounded() {
        let stats = stats();
        let report = CorpusReport::new(&stats, ReportLocale::English);
        assert_eq!(report.average_ingredients(), 1.67);
    }

    #[test]
    fn test_english_keys_in_order() {
        let stats = stats();
        let timestamp = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
        let report = CorpusReport::with_timestamp(&stats, ReportLocale::English, timestamp);
        let json = serde_json::to_string(&report).unwrap();

        assert_eq!(
            json,
            r#"{"total_recipes":3,"category_stats":{"양념":2},"ingredient_stats":{"소금":2,"간장":1},"unit_stats":{},"average_ingredients":1.67,"generated_at":"2024-05-01T12:00:00+00:00"}"#
        );
    }

    #[test]
    fn test_korean_keys() {
        let stats = stats();
        let report = CorpusReport::new(&stats, ReportLocale::Korean);
        let value: serde_json::Value = serde_json::to_value(&report).unwrap();

        assert_eq!(value["총_레시피_수"], 3);
        assert_eq!(value["재료_통계"]["소금"], 2);
        assert_eq!(value["평균_재료_수"], 1.67);
    }

    #[test]
    fn test_summary() {
        let summary = render_summary(&stats(), 1);
        assert!(summary.contains("Total recipes: 3"));
        assert!(summary.contains("Average ingredients per recipe: 1.67"));
        assert!(summary.contains("  - 소금: 2 times"));
        assert!(!summary.contains("간장"));
    }
}
