//! # Structure Codec
//!
//! Converts [`StructuredIngredients`] to and from the single-line JSON string
//! stored in a text column:
//!
//! ```text
//! {"categories":[{"category":"양념","ingredients":[{"name":"간장","amount":"1","unit":"큰술","description":""}]}]}
//! ```
//!
//! Field values are escaped by `serde_json`, so quotes, backslashes and
//! newlines inside names or descriptions survive the round trip.
//! Decoding is strict: anything other than the exact `{categories: [...]}`
//! shape is rejected with a [`StructureDecodeError`].
//!
//! Rows written by the historical single-quote dump can only be read through
//! [`deserialize_legacy`], which is lossy.

use crate::ingredient_model::StructuredIngredients;
use log::{debug, warn};
use serde_json::Value;

/// Encoding of a structure with no categories
pub const EMPTY_ENCODING: &str = r#"{"categories":[]}"#;

/// What went wrong while decoding
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodeErrorKind {
    /// The text is not valid JSON
    MalformedEncoding,
    /// Valid JSON that does not match the `{categories: [...]}` shape
    UnexpectedShape,
}

/// Error returned when a stored string cannot be decoded
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StructureDecodeError {
    pub kind: DecodeErrorKind,
    pub message: String,
}

impl std::fmt::Display for StructureDecodeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.kind {
            DecodeErrorKind::MalformedEncoding => write!(f, "Malformed encoding: {}", self.message),
            DecodeErrorKind::UnexpectedShape => write!(f, "Unexpected shape: {}", self.message),
        }
    }
}

impl std::error::Error for StructureDecodeError {}

impl From<serde_json::Error> for StructureDecodeError {
    fn from(err: serde_json::Error) -> Self {
        let kind = match err.classify() {
            serde_json::error::Category::Data => DecodeErrorKind::UnexpectedShape,
            _ => DecodeErrorKind::MalformedEncoding,
        };
        StructureDecodeError {
            kind,
            message: err.to_string(),
        }
    }
}

/// Encode a structure for storage
///
/// # Examples
///
/// ```rust
/// use ingredient_structurer::codec::{serialize, EMPTY_ENCODING};
/// use ingredient_structurer::ingredient_model::StructuredIngredients;
///
/// assert_eq!(serialize(&StructuredIngredients::empty()), EMPTY_ENCODING);
/// ```
pub fn serialize(structured: &StructuredIngredients) -> String {
    // Only string fields and sequences: serializing into memory cannot fail
    serde_json::to_string(structured).unwrap_or_else(|err| {
        warn!("Failed to encode structured ingredients: {}", err);
        EMPTY_ENCODING.to_string()
    })
}

/// Decode a stored string
///
/// # Examples
///
/// ```rust
/// use ingredient_structurer::codec::{deserialize, DecodeErrorKind};
///
/// let structured = deserialize(r#"{"categories":[]}"#).unwrap();
/// assert!(structured.is_empty());
///
/// let err = deserialize("{'categories': []}").unwrap_err();
/// assert_eq!(err.kind, DecodeErrorKind::MalformedEncoding);
/// ```
pub fn deserialize(text: &str) -> Result<StructuredIngredients, StructureDecodeError> {
    let value: Value = serde_json::from_str(text)?;
    check_shape(&value)?;
    Ok(serde_json::from_value(value)?)
}

// serde's derived structs also accept positional arrays; only objects are valid here
fn check_shape(root: &Value) -> Result<(), StructureDecodeError> {
    let root = expect_object(root, "root")?;

    if let Some(Value::Array(categories)) = root.get("categories") {
        for (i, category) in categories.iter().enumerate() {
            let category = expect_object(category, &format!("categories[{i}]"))?;

            if let Some(Value::Array(ingredients)) = category.get("ingredients") {
                for (j, ingredient) in ingredients.iter().enumerate() {
                    expect_object(ingredient, &format!("categories[{i}].ingredients[{j}]"))?;
                }
            }
        }
    }

    Ok(())
}

fn expect_object<'a>(
    value: &'a Value,
    path: &str,
) -> Result<&'a serde_json::Map<String, Value>, StructureDecodeError> {
    value.as_object().ok_or_else(|| StructureDecodeError {
        kind: DecodeErrorKind::UnexpectedShape,
        message: format!("expected an object at {path}"),
    })
}

/// Decode a string that may have been written by the historical dump
///
/// That dump swapped every `"` for `'`, so reading it back means swapping
/// every `'` for `"`. Any field that contained either quote character was
/// corrupted at write time and either fails here or decodes with altered
/// text. Strict decoding is always tried first.
pub fn deserialize_legacy(text: &str) -> Result<StructuredIngredients, StructureDecodeError> {
    match deserialize(text) {
        Ok(structured) => Ok(structured),
        Err(strict_err) => {
            debug!("Strict decode failed ({}), trying quote-swapped form", strict_err);
            deserialize(&text.replace('\'', "\""))
        }
    }
}

/// Normalize a stored column value to the canonical encoding
///
/// Missing or blank values and values that cannot be decoded at all become
/// [`EMPTY_ENCODING`].
pub fn normalize_encoding(value: Option<&str>) -> String {
    let value = match value {
        Some(text) if !text.trim().is_empty() => text.trim(),
        _ => return EMPTY_ENCODING.to_string(),
    };

    match deserialize_legacy(value) {
        Ok(structured) => serialize(&structured),
        Err(err) => {
            warn!("Replacing undecodable structure with empty encoding: {}", err);
            EMPTY_ENCODING.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ingredient_model::{Category, IngredientRecord};

    fn sample() -> StructuredIngredients {
        StructuredIngredients {
            categories: vec![Category::with_ingredients(
                "양념",
                vec![IngredientRecord::new("간장").with_amount("1").with_unit("큰술")],
            )],
        }
    }

    #[test]
    fn test_serialize_shape() {
        assert_eq!(
            serialize(&sample()),
            r#"{"categories":[{"category":"양념","ingredients":[{"name":"간장","amount":"1","unit":"큰술","description":""}]}]}"#
        );
    }

    #[test]
    fn test_round_trip_with_quotes() {
        let structured = StructuredIngredients {
            categories: vec![Category::with_ingredients(
                "Mom's \"secret\" sauce",
                vec![IngredientRecord::new("baker's chocolate")
                    .with_amount("1/2")
                    .with_unit("cup")
                    .with_description("70% \\ dark, \"bitter\"\nchopped")],
            )],
        };

        let encoded = serialize(&structured);
        assert!(!encoded.contains('\n'));
        assert_eq!(deserialize(&encoded).unwrap(), structured);
    }

    #[test]
    fn test_rejects_wrong_shape() {
        let err = deserialize(r#"{"items":[]}"#).unwrap_err();
        assert_eq!(err.kind, DecodeErrorKind::UnexpectedShape);

        let err = deserialize(r#"{"categories":[{"category":"양념"}]}"#).unwrap_err();
        assert_eq!(err.kind, DecodeErrorKind::UnexpectedShape);

        let err = deserialize(r#"[1, 2]"#).unwrap_err();
        assert_eq!(err.kind, DecodeErrorKind::UnexpectedShape);

        let err = deserialize(r#"{"categories":[],"extra":1}"#).unwrap_err();
        assert_eq!(err.kind, DecodeErrorKind::UnexpectedShape);
    }

    #[test]
    fn test_rejects_positional_arrays() {
        for input in [
            "[[]]",
            r#"[[["양념",[["간장","1","큰술",""]]]]]"#,
            r#"{"categories":[["양념",[]]]}"#,
            r#"{"categories":[{"category":"양념","ingredients":[["간장","1","큰술",""]]}]}"#,
        ] {
            let err = deserialize(input).unwrap_err();
            assert_eq!(err.kind, DecodeErrorKind::UnexpectedShape, "input: {input}");
        }
    }

    #[test]
    fn test_rejects_malformed_text() {
        for input in ["", "not json", r#"{"categories":["#, r#"{"categories":[]} trailing"#] {
            let err = deserialize(input).unwrap_err();
            assert_eq!(err.kind, DecodeErrorKind::MalformedEncoding, "input: {input}");
        }
    }

    #[test]
    fn test_error_display() {
        let err = deserialize("nope").unwrap_err();
        assert!(err.to_string().starts_with("Malformed encoding:"));
    }

    #[test]
    fn test_legacy_single_quote_form() {
        let legacy = "{'categories': [{'category': '양념', 'ingredients': [{'name': '간장', 'amount': '1', 'unit': '큰술', 'description': ''}]}]}";
        assert!(deserialize(legacy).is_err());
        assert_eq!(deserialize_legacy(legacy).unwrap(), sample());
    }

    #[test]
    fn test_legacy_prefers_strict_form() {
        let structured = StructuredIngredients {
            categories: vec![Category::new("it's fine")],
        };
        let encoded = serialize(&structured);
        assert_eq!(deserialize_legacy(&encoded).unwrap(), structured);
    }

    #[test]
    fn test_normalize_encoding() {
        assert_eq!(normalize_encoding(None), EMPTY_ENCODING);
        assert_eq!(normalize_encoding(Some("   ")), EMPTY_ENCODING);
        assert_eq!(normalize_encoding(Some("garbage")), EMPTY_ENCODING);
        assert_eq!(
            normalize_encoding(Some("{'categories': []}")),
            EMPTY_ENCODING
        );
        let canonical = serialize(&sample());
        assert_eq!(normalize_encoding(Some(&canonical)), canonical);
    }
}
