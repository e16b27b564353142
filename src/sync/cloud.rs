//! Cloud Document Source
//!
//! A single document in a Firebase Realtime Database, read and written over
//! its REST API and watched through the `text/event-stream` endpoint. Stream
//! events carry partial updates; they are applied to a mirror of the remote
//! JSON tree, and top-level fields missing from the mirror fall back to the
//! last catalog we delivered or saved.

use std::cell::RefCell;
use std::rc::Rc;

use async_trait::async_trait;
use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{Map, Value};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{EventSource, MessageEvent};

use super::{http, CatalogSource, ChangeHandler, SourceKind, Subscription};
use crate::document;
use crate::error::{DocumentError, SyncError, SyncResult};
use crate::models::Catalog;
use crate::settings::CloudSettings;

/// Body of a `put` / `patch` stream event
#[derive(Debug, Deserialize)]
struct StreamEvent {
    path: String,
    data: Value,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum EventKind {
    Put,
    Patch,
}

/// Remote JSON tree plus the last catalog handed out
#[derive(Debug, Default)]
struct Mirror {
    tree: Value,
    catalog: Catalog,
}

fn segments(path: &str) -> Vec<&str> {
    path.split('/').filter(|s| !s.is_empty()).collect()
}

/// Step into `segment`, turning scalars into objects on the way
fn child_mut<'a>(node: &'a mut Value, segment: &str) -> Option<&'a mut Value> {
    if !node.is_array() && !node.is_object() {
        *node = Value::Object(Map::new());
    }
    match node {
        Value::Array(items) => segment.parse::<usize>().ok().and_then(|i| items.get_mut(i)),
        Value::Object(map) => Some(
            map.entry(segment.to_string())
                .or_insert_with(|| Value::Object(Map::new())),
        ),
        _ => None,
    }
}

/// Set (or with `null`, remove) the value at a slash path
fn put_at(root: &mut Value, path: &str, data: Value) {
    let segments = segments(path);
    let Some((last, parents)) = segments.split_last() else {
        *root = data;
        return;
    };

    let mut node = root;
    for segment in parents {
        let Some(next) = child_mut(node, segment) else {
            return;
        };
        node = next;
    }

    if !node.is_array() && !node.is_object() {
        *node = Value::Object(Map::new());
    }
    match node {
        Value::Array(items) => {
            if let Ok(i) = last.parse::<usize>() {
                if i < items.len() {
                    items[i] = data;
                } else if i == items.len() && !data.is_null() {
                    items.push(data);
                }
            }
        }
        Value::Object(map) => {
            if data.is_null() {
                map.remove(*last);
            } else {
                map.insert(last.to_string(), data);
            }
        }
        _ => {}
    }
}

/// Apply each child of `data` as a put below `path`
fn patch_at(root: &mut Value, path: &str, data: Value) {
    let Value::Object(children) = data else {
        put_at(root, path, data);
        return;
    };
    let base = path.trim_end_matches('/');
    for (key, value) in children {
        put_at(root, &format!("{base}/{key}"), value);
    }
}

/// Firebase turns sparse arrays into objects keyed by index
fn as_list(value: &Value) -> Value {
    match value {
        Value::Object(map) => {
            let mut entries: Vec<(usize, &Value)> = map
                .iter()
                .filter_map(|(k, v)| k.parse::<usize>().ok().map(|i| (i, v)))
                .collect();
            entries.sort_by_key(|(i, _)| *i);
            Value::Array(
                entries
                    .into_iter()
                    .map(|(_, v)| v)
                    .filter(|v| !v.is_null())
                    .cloned()
                    .collect(),
            )
        }
        Value::Array(items) => Value::Array(items.iter().filter(|v| !v.is_null()).cloned().collect()),
        other => other.clone(),
    }
}

fn field<T: DeserializeOwned>(tree: &Value, key: &str, list: bool) -> Result<Option<T>, DocumentError> {
    match tree.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(value) => {
            let value = if list { as_list(value) } else { value.clone() };
            serde_json::from_value(value)
                .map(Some)
                .map_err(|e| DocumentError::InvalidJson(format!("{key}: {e}")))
        }
    }
}

/// Catalog from the remote tree, absent fields taken from `prior`
fn merge(prior: &Catalog, tree: &Value) -> Result<Catalog, DocumentError> {
    let items = field(tree, "items", true)?.unwrap_or_else(|| prior.items.clone());
    let mut categories = field(tree, "categories", true)?.unwrap_or_else(|| prior.categories.clone());
    let config = field(tree, "config", false)?.unwrap_or_else(|| prior.config.clone());

    if categories.is_empty() {
        categories = document::synthesize_categories(&items);
    }
    Ok(Catalog { items, categories, config })
}

impl Mirror {
    /// Track a catalog this client just wrote
    ///
    /// Without a tree, later deep events fall back to `catalog` for the
    /// fields they do not carry.
    fn record_saved(&mut self, catalog: &Catalog) {
        self.tree = match serde_json::to_value(catalog) {
            Ok(tree) => tree,
            Err(e) => {
                log::warn!("cloud mirror tree reset after save: {e}");
                Value::Null
            }
        };
        self.catalog = catalog.clone();
    }

    fn apply(&mut self, kind: EventKind, event: StreamEvent) -> Result<Option<Catalog>, DocumentError> {
        match kind {
            EventKind::Put => put_at(&mut self.tree, &event.path, event.data),
            EventKind::Patch => patch_at(&mut self.tree, &event.path, event.data),
        }
        if self.tree.is_null() {
            return Ok(None);
        }
        let catalog = merge(&self.catalog, &self.tree)?;
        self.catalog = catalog.clone();
        Ok(Some(catalog))
    }
}

pub struct CloudSyncSource {
    settings: CloudSettings,
    mirror: Rc<RefCell<Mirror>>,
}

impl CloudSyncSource {
    pub fn new(settings: CloudSettings) -> Self {
        Self {
            settings,
            mirror: Rc::new(RefCell::new(Mirror::default())),
        }
    }

    /// REST URL of the document
    pub fn document_url(&self) -> String {
        let mut url = format!("{}/{}.json", self.settings.database_url, self.settings.document_path);
        if let Some(key) = &self.settings.api_key {
            url.push_str("?auth=");
            url.push_str(&utf8_percent_encode(key, NON_ALPHANUMERIC).to_string());
        }
        url
    }
}

fn listen(
    events: &EventSource,
    name: &str,
    kind: EventKind,
    mirror: Rc<RefCell<Mirror>>,
    on_change: ChangeHandler,
) -> Closure<dyn FnMut(MessageEvent)> {
    let callback = Closure::<dyn FnMut(MessageEvent)>::new(move |ev: MessageEvent| {
        let Some(raw) = ev.data().as_string() else {
            return;
        };
        let event: StreamEvent = match serde_json::from_str(&raw) {
            Ok(event) => event,
            Err(e) => {
                log::warn!("unreadable stream event: {e}");
                return;
            }
        };
        let result = mirror.borrow_mut().apply(kind, event);
        match result {
            Ok(Some(catalog)) => on_change(catalog),
            Ok(None) => log::info!("cloud document is empty"),
            Err(e) => log::warn!("cloud update ignored: {e}"),
        }
    });
    if let Err(e) = events.add_event_listener_with_callback(name, callback.as_ref().unchecked_ref()) {
        log::warn!("failed to listen for {name}: {e:?}");
    }
    callback
}

#[async_trait(?Send)]
impl CatalogSource for CloudSyncSource {
    fn kind(&self) -> SourceKind {
        SourceKind::Cloud
    }

    fn autosave(&self) -> bool {
        true
    }

    async fn load(&self) -> SyncResult<Option<Catalog>> {
        let response = http::get(&self.document_url()).await?;
        if !response.ok() {
            return Err(SyncError::Status(response.status));
        }
        let tree: Value = serde_json::from_str(&response.body)
            .map_err(|e| DocumentError::InvalidJson(e.to_string()))?;
        if tree.is_null() {
            return Ok(None);
        }
        let mut mirror = self.mirror.borrow_mut();
        let catalog = merge(&mirror.catalog, &tree)?;
        mirror.tree = tree;
        mirror.catalog = catalog.clone();
        Ok(Some(catalog))
    }

    async fn save(&self, catalog: &Catalog) -> SyncResult<()> {
        let body = document::to_json(catalog)?;
        let response = http::put_json(&self.document_url(), &body).await?;
        if !response.ok() {
            return Err(SyncError::Status(response.status));
        }
        self.mirror.borrow_mut().record_saved(catalog);
        Ok(())
    }

    fn subscribe(&self, on_change: ChangeHandler) -> Subscription {
        let events = match EventSource::new(&self.document_url()) {
            Ok(events) => events,
            Err(e) => {
                log::warn!("cloud stream unavailable: {e:?}");
                return Subscription::inert();
            }
        };

        let put = listen(&events, "put", EventKind::Put, self.mirror.clone(), on_change.clone());
        let patch = listen(&events, "patch", EventKind::Patch, self.mirror.clone(), on_change);
        let revoked = Closure::<dyn FnMut(MessageEvent)>::new(|_: MessageEvent| {
            log::warn!("cloud stream closed by server (cancel or auth_revoked)");
        });
        for name in ["cancel", "auth_revoked"] {
            if let Err(e) = events.add_event_listener_with_callback(name, revoked.as_ref().unchecked_ref()) {
                log::warn!("failed to listen for {name}: {e:?}");
            }
        }

        Subscription::new(move || {
            events.close();
            drop((put, patch, revoked));
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{BoardConfig, Item};
    use serde_json::json;

    fn event(path: &str, data: Value) -> StreamEvent {
        StreamEvent { path: path.to_string(), data }
    }

    fn prior() -> Catalog {
        Catalog {
            items: vec![Item::new(1, "Cola", "Bar", 2.0)],
            categories: vec!["Bar".to_string()],
            config: BoardConfig {
                gym_name: Some("Local Name".to_string()),
                ..Default::default()
            },
        }
    }

    #[test]
    fn test_absent_fields_keep_prior_values() {
        let tree = json!({ "items": [{"id": 2, "name": "Water", "price": 1, "category": "Bar"}] });
        let merged = merge(&prior(), &tree).unwrap();
        assert_eq!(merged.items[0].name, "Water");
        assert_eq!(merged.categories, vec!["Bar"]);
        assert_eq!(merged.config.display_name(), "Local Name");
    }

    #[test]
    fn test_full_put_then_deep_put() {
        let mut mirror = Mirror { tree: Value::Null, catalog: prior() };
        let doc = json!({
            "items": [{"id": 1, "name": "Cola", "price": 2, "category": "Bar"}],
            "categories": ["Bar", "Kitchen"],
            "config": {"gymName": "Remote"}
        });
        let first = mirror.apply(EventKind::Put, event("/", doc)).unwrap().unwrap();
        assert_eq!(first.categories, vec!["Bar", "Kitchen"]);
        assert_eq!(first.config.display_name(), "Remote");

        let second = mirror
            .apply(EventKind::Put, event("/items/0/name", json!("Cola Zero")))
            .unwrap()
            .unwrap();
        assert_eq!(second.items[0].name, "Cola Zero");
        assert_eq!(second.config.display_name(), "Remote");
    }

    #[test]
    fn test_patch_merges_children() {
        let mut mirror = Mirror { tree: Value::Null, catalog: prior() };
        let patched = mirror
            .apply(EventKind::Patch, event("/config", json!({"currency": "€", "accentColor": "#fff"})))
            .unwrap()
            .unwrap();
        assert_eq!(patched.config.currency(), "€");
        assert_eq!(patched.config.accent_color(), "#fff");
        // items and categories were never in the tree
        assert_eq!(patched.items, prior().items);
        assert_eq!(patched.categories, prior().categories);
    }

    #[test]
    fn test_deleted_document_delivers_nothing() {
        let mut mirror = Mirror::default();
        assert_eq!(mirror.apply(EventKind::Put, event("/", Value::Null)).unwrap(), None);
    }

    #[test]
    fn test_sparse_arrays_read_as_lists() {
        let tree = json!({ "categories": {"0": "Bar", "2": "Kitchen"} });
        let merged = merge(&Catalog::default(), &tree).unwrap();
        assert_eq!(merged.categories, vec!["Bar", "Kitchen"]);
    }

    #[test]
    fn test_saved_catalog_is_base_for_deep_events() {
        let mut mirror = Mirror::default();
        let mut saved = prior();
        saved.categories.push("Kitchen".to_string());
        mirror.record_saved(&saved);
        assert_eq!(mirror.tree["categories"], json!(["Bar", "Kitchen"]));

        let renamed = mirror
            .apply(EventKind::Put, event("/items/0/name", json!("Cola Zero")))
            .unwrap()
            .unwrap();
        assert_eq!(renamed.items[0].name, "Cola Zero");
        assert_eq!(renamed.categories, vec!["Bar", "Kitchen"]);
        assert_eq!(renamed.config.display_name(), "Local Name");
    }

    #[test]
    fn test_put_null_removes_key() {
        let mut tree = json!({ "config": {"currency": "€"} });
        put_at(&mut tree, "/config/currency", Value::Null);
        assert_eq!(tree, json!({ "config": {} }));
    }

    #[test]
    fn test_document_url() {
        let source = CloudSyncSource::new(CloudSettings {
            database_url: "https://board.firebaseio.com".to_string(),
            api_key: Some("a/b".to_string()),
            document_path: "menu/catalog".to_string(),
        });
        assert_eq!(
            source.document_url(),
            "https://board.firebaseio.com/menu/catalog.json?auth=a%2Fb"
        );
    }
}
