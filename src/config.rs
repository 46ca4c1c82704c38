//! # Configuration Module
//!
//! This module defines configuration structures for ingredient structuring
//! and corpus analysis, plus loading of the application settings from the
//! environment.

use anyhow::{anyhow, Context, Result};
use std::env;
use std::str::FromStr;

// Constants for structuring and analysis
pub const DEFAULT_CATEGORY_LABEL: &str = "basic ingredients";
pub const KOREAN_DEFAULT_CATEGORY_LABEL: &str = "기본재료";
pub const DEFAULT_TOP_CATEGORIES: usize = 10;
pub const DEFAULT_TOP_INGREDIENTS: usize = 20;
pub const DEFAULT_TOP_UNITS: usize = 10;

/// Configuration for the category structurer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StructureConfig {
    /// Label given to items that appear before any heading line
    pub default_label: String,
}

impl Default for StructureConfig {
    fn default() -> Self {
        Self {
            default_label: DEFAULT_CATEGORY_LABEL.to_string(),
        }
    }
}

impl StructureConfig {
    /// Configuration matching the Korean recipe corpus ("기본재료")
    pub fn korean() -> Self {
        Self {
            default_label: KOREAN_DEFAULT_CATEGORY_LABEL.to_string(),
        }
    }
}

/// Configuration for corpus analysis
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisConfig {
    /// Number of category labels kept in the statistics
    pub top_categories: usize,
    /// Number of ingredient names kept in the statistics
    pub top_ingredients: usize,
    /// Number of units kept in the statistics
    pub top_units: usize,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            top_categories: DEFAULT_TOP_CATEGORIES,
            top_ingredients: DEFAULT_TOP_INGREDIENTS,
            top_units: DEFAULT_TOP_UNITS,
        }
    }
}

/// Key set used when writing the corpus report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReportLocale {
    #[default]
    English,
    Korean,
}

impl FromStr for ReportLocale {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "en" | "english" => Ok(ReportLocale::English),
            "ko" | "korean" => Ok(ReportLocale::Korean),
            other => Err(anyhow!("Unsupported report locale: {other}")),
        }
    }
}

/// Log output format for the binary
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

/// Application settings loaded from the environment
#[derive(Debug, Clone, Default)]
pub struct AppConfig {
    pub structure: StructureConfig,
    pub analysis: AnalysisConfig,
    pub report_locale: ReportLocale,
    pub log_format: LogFormat,
}

impl AppConfig {
    /// Load settings from environment variables, falling back to defaults
    ///
    /// Recognized variables: `INGREDIENTS_DEFAULT_LABEL`, `INGREDIENTS_TOP_CATEGORIES`,
    /// `INGREDIENTS_TOP_INGREDIENTS`, `INGREDIENTS_TOP_UNITS`,
    /// `INGREDIENTS_REPORT_LOCALE` (`en` or `ko`) and `LOG_FORMAT` (`text` or `json`).
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load settings through an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = AppConfig::default();

        if let Some(label) = lookup("INGREDIENTS_DEFAULT_LABEL") {
            let label = label.trim();
            if !label.is_empty() {
                config.structure.default_label = label.to_string();
            }
        }

        if let Some(value) = lookup("INGREDIENTS_TOP_CATEGORIES") {
            config.analysis.top_categories = parse_count("INGREDIENTS_TOP_CATEGORIES", &value)?;
        }
        if let Some(value) = lookup("INGREDIENTS_TOP_INGREDIENTS") {
            config.analysis.top_ingredients = parse_count("INGREDIENTS_TOP_INGREDIENTS", &value)?;
        }
        if let Some(value) = lookup("INGREDIENTS_TOP_UNITS") {
            config.analysis.top_units = parse_count("INGREDIENTS_TOP_UNITS", &value)?;
        }

        if let Some(value) = lookup("INGREDIENTS_REPORT_LOCALE") {
            config.report_locale = value
                .parse()
                .context("Invalid INGREDIENTS_REPORT_LOCALE")?;
        }

        if let Some(value) = lookup("LOG_FORMAT") {
            config.log_format = match value.trim().to_lowercase().as_str() {
                "json" => LogFormat::Json,
                _ => LogFormat::Text,
            };
        }

        Ok(config)
    }
}

fn parse_count(key: &str, value: &str) -> Result<usize> {
    value
        .trim()
        .parse::<usize>()
        .with_context(|| format!("{key} must be a non-negative integer, got '{value}'"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = AppConfig::from_lookup(|_| None).unwrap();
        assert_eq!(config.structure.default_label, "basic ingredients");
        assert_eq!(config.analysis, AnalysisConfig::default());
        assert_eq!(config.analysis.top_categories, 10);
        assert_eq!(config.analysis.top_ingredients, 20);
        assert_eq!(config.analysis.top_units, 10);
        assert_eq!(config.report_locale, ReportLocale::English);
        assert_eq!(config.log_format, LogFormat::Text);
    }

    #[test]
    fn test_overrides() {
        let config = AppConfig::from_lookup(lookup_from(&[
            ("INGREDIENTS_DEFAULT_LABEL", "기본재료"),
            ("INGREDIENTS_TOP_INGREDIENTS", "5"),
            ("INGREDIENTS_REPORT_LOCALE", "ko"),
            ("LOG_FORMAT", "JSON"),
        ]))
        .unwrap();

        assert_eq!(config.structure, StructureConfig::korean());
        assert_eq!(config.analysis.top_ingredients, 5);
        assert_eq!(config.analysis.top_units, DEFAULT_TOP_UNITS);
        assert_eq!(config.report_locale, ReportLocale::Korean);
        assert_eq!(config.log_format, LogFormat::Json);
    }

    #[test]
    fn test_invalid_count_is_rejected() {
        let result = AppConfig::from_lookup(lookup_from(&[("INGREDIENTS_TOP_UNITS", "ten")]));
        let message = format!("{:#}", result.unwrap_err());
        assert!(message.contains("INGREDIENTS_TOP_UNITS"));
    }

    #[test]
    fn test_invalid_locale_is_rejected() {
        let result = AppConfig::from_lookup(lookup_from(&[("INGREDIENTS_REPORT_LOCALE", "fr")]));
        assert!(result.is_err());
    }
}
