//! # Ingredient Parser
//!
//! This module splits a single ingredient phrase into a structured
//! [`IngredientRecord`]: name, amount, unit and parenthetical description.
//!
//! ## Features
//!
//! - Extract the first parenthetical note ("국간장(또는 진간장)" → "또는 진간장")
//! - Find the first amount immediately followed by a unit ("1/2컵", "200g", "1.5큰술")
//! - Units are matched with the Unicode letter class, so Hangul and Latin units work alike
//! - Amounts and units are kept verbatim, never converted
//!
//! Only the first amount/unit pair of a phrase is extracted.
//!
//! ## Usage
//!
//! ```rust
//! use ingredient_structurer::ingredient_parser::parse_item;
//!
//! let record = parse_item("대파 1/2대").unwrap();
//! assert_eq!(record.name, "대파");
//! assert_eq!(record.amount, "1/2");
//! assert_eq!(record.unit, "대");
//! ```

use crate::ingredient_model::IngredientRecord;
use lazy_static::lazy_static;
use log::trace;
use regex::Regex;

// First parenthetical span with non-empty contents
const DESCRIPTION_PATTERN: &str = r"\(([^)]+)\)";

// Numeric-like run immediately followed by a run of letters (any script)
const AMOUNT_UNIT_PATTERN: &str = r"([0-9./]+)(\p{L}+)";

lazy_static! {
    static ref DESCRIPTION_REGEX: Regex =
        Regex::new(DESCRIPTION_PATTERN).expect("Description pattern should be valid");
    static ref AMOUNT_UNIT_REGEX: Regex =
        Regex::new(AMOUNT_UNIT_PATTERN).expect("Amount/unit pattern should be valid");
}

/// Parse one ingredient phrase
///
/// Returns `None` for blank input. The returned record may have an empty
/// name (e.g. for "(약간)" or "2개"); callers decide whether to keep it.
///
/// # Examples
///
/// ```rust
/// use ingredient_structurer::ingredient_parser::parse_item;
///
/// let record = parse_item("국간장(또는 진간장) 1큰술").unwrap();
/// assert_eq!(record.name, "국간장");
/// assert_eq!(record.amount, "1");
/// assert_eq!(record.unit, "큰술");
/// assert_eq!(record.description, "또는 진간장");
///
/// assert!(parse_item("   ").is_none());
/// ```
pub fn parse_item(text: &str) -> Option<IngredientRecord> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }

    let mut record = IngredientRecord::default();

    let working = match DESCRIPTION_REGEX.captures(text) {
        Some(captures) => {
            let span = captures.get(0)?;
            record.description = captures[1].to_string();
            format!("{}{}", &text[..span.start()], &text[span.end()..])
        }
        None => text.to_string(),
    };
    let working = working.trim();

    match AMOUNT_UNIT_REGEX.captures(working) {
        Some(captures) => {
            let start = captures.get(0)?.start();
            record.amount = captures[1].to_string();
            record.unit = captures[2].to_string();
            record.name = working[..start].trim().to_string();
        }
        None => {
            record.name = working.to_string();
        }
    }

    trace!(
        "Parsed item '{}' -> name='{}', amount='{}', unit='{}', description='{}'",
        text,
        record.name,
        record.amount,
        record.unit,
        record.description
    );

    Some(record)
}
