//! Local Storage Source
//!
//! Keeps the catalog in `window.localStorage`, one key per field. Nothing
//! else writes these keys, so there is no change feed.

use async_trait::async_trait;
use serde_json::{Map, Value};

use super::{CatalogSource, ChangeHandler, SourceKind, Subscription};
use crate::document;
use crate::error::{DocumentError, SyncError, SyncResult};
use crate::models::Catalog;

pub const ITEMS_KEY: &str = "menu_board.items";
pub const CATEGORIES_KEY: &str = "menu_board.categories";
pub const CONFIG_KEY: &str = "menu_board.config";

pub struct LocalStorageSource;

fn storage() -> SyncResult<web_sys::Storage> {
    web_sys::window()
        .and_then(|w| w.local_storage().ok().flatten())
        .ok_or_else(|| SyncError::Storage("localStorage is not available".to_string()))
}

fn encode<T: serde::Serialize>(value: &T) -> SyncResult<String> {
    serde_json::to_string(value).map_err(|e| DocumentError::Serialize(e.to_string()).into())
}

/// Key/value pairs written on save
pub fn encode_fields(catalog: &Catalog) -> SyncResult<Vec<(&'static str, String)>> {
    Ok(vec![
        (ITEMS_KEY, encode(&catalog.items)?),
        (CATEGORIES_KEY, encode(&catalog.categories)?),
        (CONFIG_KEY, encode(&catalog.config)?),
    ])
}

/// Rebuild a catalog from stored fields; no items key means nothing stored
pub fn decode_fields(get: impl Fn(&str) -> Option<String>) -> SyncResult<Option<Catalog>> {
    let Some(items) = get(ITEMS_KEY) else {
        return Ok(None);
    };

    let mut doc = Map::new();
    for (key, field, raw) in [
        (ITEMS_KEY, "items", Some(items)),
        (CATEGORIES_KEY, "categories", get(CATEGORIES_KEY)),
        (CONFIG_KEY, "config", get(CONFIG_KEY)),
    ] {
        if let Some(raw) = raw {
            let value: Value = serde_json::from_str(&raw)
                .map_err(|e| DocumentError::InvalidJson(format!("{key}: {e}")))?;
            doc.insert(field.to_string(), value);
        }
    }
    Ok(Some(document::from_value(Value::Object(doc))?.catalog))
}

#[async_trait(?Send)]
impl CatalogSource for LocalStorageSource {
    fn kind(&self) -> SourceKind {
        SourceKind::Local
    }

    fn autosave(&self) -> bool {
        true
    }

    async fn load(&self) -> SyncResult<Option<Catalog>> {
        let storage = storage()?;
        decode_fields(|key| storage.get_item(key).ok().flatten())
    }

    async fn save(&self, catalog: &Catalog) -> SyncResult<()> {
        let storage = storage()?;
        for (key, value) in encode_fields(catalog)? {
            storage
                .set_item(key, &value)
                .map_err(|_| SyncError::Storage(format!("failed to write {key}")))?;
        }
        Ok(())
    }

    fn subscribe(&self, _on_change: ChangeHandler) -> Subscription {
        Subscription::inert()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{BoardConfig, Item};
    use std::collections::HashMap;

    #[test]
    fn test_fields_round_trip() {
        let catalog = Catalog {
            items: vec![Item::new(1, "Cola", "Bar", 2.0)],
            categories: vec!["Bar".to_string(), "Kitchen".to_string()],
            config: BoardConfig {
                currency: Some("€".to_string()),
                ..Default::default()
            },
        };
        let stored: HashMap<&str, String> = encode_fields(&catalog).unwrap().into_iter().collect();
        let loaded = decode_fields(|key| stored.get(key).cloned()).unwrap();
        assert_eq!(loaded, Some(catalog));
    }

    #[test]
    fn test_missing_items_is_not_found() {
        assert_eq!(decode_fields(|_| None).unwrap(), None);
    }

    #[test]
    fn test_missing_categories_are_synthesized() {
        let loaded = decode_fields(|key| {
            (key == ITEMS_KEY).then(|| r#"[{"id":1,"name":"Cola","price":2,"category":"Bar"}]"#.to_string())
        })
        .unwrap()
        .unwrap();
        assert_eq!(loaded.categories, vec!["Bar"]);
    }

    #[test]
    fn test_corrupt_field_is_an_error() {
        let result = decode_fields(|key| {
            Some(if key == CONFIG_KEY { "{".to_string() } else { "[]".to_string() })
        });
        assert!(matches!(result, Err(SyncError::Document(DocumentError::InvalidJson(_)))));
    }
}
