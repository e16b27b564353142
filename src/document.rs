//! Menu Document Codec
//!
//! Every ingestion boundary (file poll, cloud load, import) goes through
//! [`parse`], which accepts the legacy bare item list as well as the full
//! `{ items, categories, config }` document and produces one canonical
//! [`Catalog`].

use serde_json::Value;

use crate::error::DocumentError;
use crate::models::{BoardConfig, Catalog, Category, Item};

/// File name used for exports and the default poll resource
pub const DOCUMENT_FILE_NAME: &str = "data.json";

/// Which document shape was ingested
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentShape {
    /// Bare item array
    Legacy,
    /// `{ items, categories?, config? }`
    Full,
}

/// Result of parsing a menu document
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedDocument {
    pub catalog: Catalog,
    pub shape: DocumentShape,
    /// True when categories were derived from the items
    pub categories_synthesized: bool,
}

/// Parse document text
pub fn parse(text: &str) -> Result<ParsedDocument, DocumentError> {
    let value: Value =
        serde_json::from_str(text).map_err(|e| DocumentError::InvalidJson(e.to_string()))?;
    from_value(value)
}

/// Normalize an already-decoded JSON value
pub fn from_value(value: Value) -> Result<ParsedDocument, DocumentError> {
    let (items, categories, config, shape) = match value {
        Value::Array(_) => {
            let items: Vec<Item> = decode(value)?;
            (items, Vec::new(), BoardConfig::default(), DocumentShape::Legacy)
        }
        Value::Object(mut map) => {
            let items = match map.remove("items") {
                Some(v @ Value::Array(_)) => decode::<Vec<Item>>(v)?,
                _ => return Err(DocumentError::UnrecognizedShape),
            };
            let categories = match map.remove("categories") {
                Some(Value::Null) | None => Vec::new(),
                Some(v) => decode::<Vec<Category>>(v)?,
            };
            let config = match map.remove("config") {
                Some(Value::Null) | None => BoardConfig::default(),
                Some(v) => decode::<BoardConfig>(v)?,
            };
            (items, categories, config, DocumentShape::Full)
        }
        _ => return Err(DocumentError::UnrecognizedShape),
    };

    let categories_synthesized = categories.is_empty() && !items.is_empty();
    let categories = if categories_synthesized {
        synthesize_categories(&items)
    } else {
        categories
    };

    Ok(ParsedDocument {
        catalog: Catalog { items, categories, config },
        shape,
        categories_synthesized,
    })
}

fn decode<T: serde::de::DeserializeOwned>(value: Value) -> Result<T, DocumentError> {
    serde_json::from_value(value).map_err(|e| DocumentError::InvalidJson(e.to_string()))
}

/// Distinct non-empty item categories in first-seen order
pub fn synthesize_categories(items: &[Item]) -> Vec<Category> {
    let mut seen: Vec<Category> = Vec::new();
    for item in items {
        if !item.category.is_empty() && !seen.contains(&item.category) {
            seen.push(item.category.clone());
        }
    }
    seen
}

/// Serialize the full three-field document
pub fn to_json(catalog: &Catalog) -> Result<String, DocumentError> {
    serde_json::to_string_pretty(catalog).map_err(|e| DocumentError::Serialize(e.to_string()))
}
