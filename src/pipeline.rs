//! # Batch Pipeline
//!
//! JSON-lines glue between stored recipe rows and the structuring/analysis
//! engine. Used by the command-line binary.
//!
//! Structuring input, one object per line:
//!
//! ```text
//! {"id": "28", "ingredients": "기본양념\n소금, 후추"}
//! ```
//!
//! Structuring output and analysis input:
//!
//! ```text
//! {"id": "28", "ingredients_structured": "{\"categories\":[...]}"}
//! ```

use crate::analyzer::{CorpusAccumulator, CorpusAnalyzer, CorpusStatistics};
use crate::codec::serialize;
use crate::structurer::Structurer;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::io::{BufRead, Write};
use tracing::{info, warn};

/// A raw recipe row
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RawRecipe {
    pub id: Value,
    #[serde(default)]
    pub ingredients: Option<String>,
}

/// A recipe row carrying its encoded structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StructuredRecipe {
    pub id: Value,
    pub ingredients_structured: String,
}

/// Outcome of a batch run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchSummary {
    pub processed: usize,
    pub skipped: usize,
}

/// Structure every raw recipe row read from `reader`
///
/// Lines that are not valid rows are skipped with a warning.
pub fn structure_jsonl<R, W>(reader: R, mut writer: W, structurer: &Structurer) -> Result<BatchSummary>
where
    R: BufRead,
    W: Write,
{
    let mut summary = BatchSummary::default();

    for (line_number, line) in reader.lines().enumerate() {
        let line = line.with_context(|| format!("Failed to read input line {}", line_number + 1))?;
        if line.trim().is_empty() {
            continue;
        }

        let raw: RawRecipe = match serde_json::from_str(&line) {
            Ok(raw) => raw,
            Err(err) => {
                warn!(line = line_number + 1, error = %err, "Skipping malformed recipe row");
                summary.skipped += 1;
                continue;
            }
        };

        let structured = structurer.structure(raw.ingredients.as_deref());
        let row = StructuredRecipe {
            id: raw.id,
            ingredients_structured: serialize(&structured),
        };

        serde_json::to_writer(&mut writer, &row).context("Failed to encode output row")?;
        writer.write_all(b"\n").context("Failed to write output row")?;
        summary.processed += 1;

        if summary.processed % 100 == 0 {
            info!(processed = summary.processed, "Structuring progress");
        }
    }

    writer.flush().context("Failed to flush output")?;
    info!(
        processed = summary.processed,
        skipped = summary.skipped,
        "Structuring complete"
    );
    Ok(summary)
}

/// Analyze every structured recipe row read from `reader`
///
/// Rows that are not valid JSON objects count as skipped recipes, the same
/// as rows whose structure fails to decode.
pub fn analyze_jsonl<R: BufRead>(reader: R, analyzer: &CorpusAnalyzer) -> Result<CorpusStatistics> {
    let mut accumulator = CorpusAccumulator::new();

    for (line_number, line) in reader.lines().enumerate() {
        let line = line.with_context(|| format!("Failed to read input line {}", line_number + 1))?;
        if line.trim().is_empty() {
            continue;
        }

        match serde_json::from_str::<StructuredRecipe>(&line) {
            Ok(row) => {
                let id = display_id(&row.id);
                analyzer.accumulate(&mut accumulator, [(id, row.ingredients_structured)]);
            }
            Err(err) => {
                warn!(line = line_number + 1, error = %err, "Skipping malformed structured row");
                accumulator.record_skip();
            }
        }
    }

    if accumulator.skipped_recipes() > 0 {
        warn!(
            parsed = accumulator.parsed_recipes(),
            skipped = accumulator.skipped_recipes(),
            "Some structured rows could not be analyzed"
        );
    }

    let stats = accumulator.finish(analyzer.config());
    info!(
        total = stats.total_records,
        parsed = stats.parsed_recipes,
        skipped = stats.skipped_recipes,
        "Corpus analysis complete"
    );
    Ok(stats)
}

fn display_id(id: &Value) -> String {
    match id {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
