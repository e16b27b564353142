//! Catalog Store
//!
//! Owns the one in-memory [`Catalog`]. Every operation is synchronous and
//! every effective change bumps [`CatalogStore::revision`], which the render
//! and autosave paths watch.

use crate::models::{Catalog, ConfigField, Item, ItemId};

/// Direction for adjacent category swaps
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
}

impl Direction {
    fn offset(self) -> isize {
        match self {
            Direction::Up => -1,
            Direction::Down => 1,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct CatalogStore {
    catalog: Catalog,
    revision: u64,
}

impl CatalogStore {
    pub fn new(catalog: Catalog) -> Self {
        Self { catalog, revision: 0 }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    fn touch(&mut self) {
        self.revision += 1;
    }

    pub fn replace(&mut self, catalog: Catalog) {
        self.catalog = catalog;
        self.touch();
    }

    /// Overwrite in place when `id` is present, else assign a fresh id and append
    pub fn upsert_item(&mut self, id: Option<ItemId>, mut item: Item) -> ItemId {
        if let Some(id) = id {
            if let Some(slot) = self.catalog.items.iter_mut().find(|i| i.id == id) {
                item.id = id;
                if *slot != item {
                    *slot = item;
                    self.touch();
                }
                return id;
            }
        }

        let id = self.next_id(chrono::Utc::now().timestamp_millis());
        item.id = id;
        self.catalog.items.push(item);
        self.touch();
        id
    }

    /// Time-based, but strictly above every id already in the catalog
    fn next_id(&self, now_millis: i64) -> ItemId {
        let floor = self
            .catalog
            .items
            .iter()
            .map(|i| i.id.saturating_add(1))
            .max()
            .unwrap_or(1);
        (now_millis.max(0) as ItemId).max(floor)
    }

    /// Returns false when the id was not present
    pub fn remove_item(&mut self, id: ItemId) -> bool {
        let before = self.catalog.items.len();
        self.catalog.items.retain(|item| item.id != id);
        let removed = self.catalog.items.len() != before;
        if removed {
            self.touch();
        }
        removed
    }

    /// Exact, case-sensitive duplicate check
    pub fn add_category(&mut self, name: &str) -> bool {
        if self.catalog.has_category(name) {
            return false;
        }
        self.catalog.categories.push(name.to_string());
        self.touch();
        true
    }

    /// Items referencing the category keep their stale value
    pub fn remove_category(&mut self, name: &str) -> bool {
        let before = self.catalog.categories.len();
        self.catalog.categories.retain(|c| c != name);
        let removed = self.catalog.categories.len() != before;
        if removed {
            self.touch();
        }
        removed
    }

    pub fn reorder_category(&mut self, name: &str, direction: Direction) -> bool {
        let Some(index) = self.catalog.categories.iter().position(|c| c == name) else {
            return false;
        };
        let Some(target) = index.checked_add_signed(direction.offset()) else {
            return false;
        };
        if target >= self.catalog.categories.len() {
            return false;
        }
        self.catalog.categories.swap(index, target);
        self.touch();
        true
    }

    /// Empty values clear the field so the default applies again
    pub fn update_config_field(&mut self, field: ConfigField, value: &str) -> bool {
        // the password is compared verbatim at the prompt
        let value = match field {
            ConfigField::AdminPassword => value,
            _ => value.trim(),
        };
        let next = (!value.is_empty()).then(|| value.to_string());
        let slot = self.catalog.config.slot_mut(field);
        if *slot == next {
            return false;
        }
        *slot = next;
        self.touch();
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::DEFAULT_ADMIN_PASSWORD;

    fn store_with(items: Vec<Item>, categories: &[&str]) -> CatalogStore {
        CatalogStore::new(Catalog {
            items,
            categories: categories.iter().map(|c| c.to_string()).collect(),
            ..Default::default()
        })
    }

    #[test]
    fn test_upsert_existing_keeps_position() {
        let mut store = store_with(
            vec![Item::new(1, "Cola", "Bar", 2.0), Item::new(2, "Water", "Bar", 1.0)],
            &["Bar"],
        );
        let id = store.upsert_item(Some(1), Item::new(0, "Cola Zero", "Bar", 2.2));
        assert_eq!(id, 1);
        assert_eq!(store.catalog().items[0].name, "Cola Zero");
        assert_eq!(store.catalog().items[1].name, "Water");
        assert_eq!(store.catalog().items.len(), 2);
    }

    #[test]
    fn test_upsert_is_idempotent() {
        let mut store = store_with(vec![Item::new(1, "Cola", "Bar", 2.0)], &["Bar"]);
        let payload = Item::new(1, "Cola Zero", "Bar", 2.2);

        store.upsert_item(Some(1), payload.clone());
        let once = store.catalog().clone();
        let revision = store.revision();

        store.upsert_item(Some(1), payload);
        assert_eq!(store.catalog(), &once);
        assert_eq!(store.revision(), revision);
    }

    #[test]
    fn test_upsert_new_assigns_unique_increasing_ids() {
        let mut store = store_with(vec![Item::new(u64::MAX / 2, "Big", "Bar", 1.0)], &[]);
        let a = store.upsert_item(None, Item::new(0, "A", "Bar", 1.0));
        let b = store.upsert_item(None, Item::new(0, "B", "Bar", 1.0));
        assert!(a > u64::MAX / 2);
        assert!(b > a);
        assert_eq!(store.catalog().items.last().map(|i| i.id), Some(b));

        // unknown id falls through to a fresh append
        let c = store.upsert_item(Some(42), Item::new(0, "C", "Bar", 1.0));
        assert_ne!(c, 42);
        assert_eq!(store.catalog().items.len(), 4);
    }

    #[test]
    fn test_next_id_is_time_based_when_catalog_is_small() {
        let store = store_with(vec![Item::new(3, "A", "Bar", 1.0)], &[]);
        assert_eq!(store.next_id(1_700_000_000_000), 1_700_000_000_000);
        assert_eq!(store.next_id(2), 4);
    }

    #[test]
    fn test_remove_item_is_idempotent() {
        let mut store = store_with(vec![Item::new(1, "Cola", "Bar", 2.0)], &["Bar"]);
        assert!(store.remove_item(1));
        let after_first = store.clone();
        assert!(!store.remove_item(1));
        assert_eq!(store, after_first);
    }

    #[test]
    fn test_add_category_rejects_exact_duplicates() {
        let mut store = store_with(vec![], &["Bar"]);
        assert!(!store.add_category("Bar"));
        assert!(store.add_category("bar"));
        assert_eq!(store.catalog().categories, vec!["Bar", "bar"]);
    }

    #[test]
    fn test_remove_category_does_not_cascade() {
        let mut store = store_with(vec![Item::new(1, "Cola", "Bar", 2.0)], &["Bar", "Kitchen"]);
        assert!(store.remove_category("Bar"));
        assert_eq!(store.catalog().categories, vec!["Kitchen"]);
        assert_eq!(store.catalog().items[0].category, "Bar");
        assert!(!store.remove_category("Bar"));
    }

    #[test]
    fn test_reorder_category() {
        let mut store = store_with(vec![], &["A", "B", "C"]);
        assert!(store.reorder_category("B", Direction::Up));
        assert_eq!(store.catalog().categories, vec!["B", "A", "C"]);
        assert!(store.reorder_category("A", Direction::Down));
        assert_eq!(store.catalog().categories, vec!["B", "C", "A"]);

        let revision = store.revision();
        assert!(!store.reorder_category("B", Direction::Up));
        assert!(!store.reorder_category("A", Direction::Down));
        assert!(!store.reorder_category("Z", Direction::Down));
        assert_eq!(store.catalog().categories, vec!["B", "C", "A"]);
        assert_eq!(store.revision(), revision);
    }

    #[test]
    fn test_update_config_field() {
        let mut store = CatalogStore::default();
        assert!(store.update_config_field(ConfigField::DisplayName, "  Iron Cafe "));
        assert_eq!(store.catalog().config.display_name(), "Iron Cafe");
        assert!(!store.update_config_field(ConfigField::DisplayName, "Iron Cafe"));

        assert!(store.update_config_field(ConfigField::AdminPassword, "123"));
        assert_eq!(store.catalog().config.admin_password(), "123");
        assert!(!store.update_config_field(ConfigField::AdminPassword, "123"));

        assert!(store.update_config_field(ConfigField::AdminPassword, ""));
        assert_eq!(store.catalog().config.admin_password, None);
        assert_eq!(store.catalog().config.admin_password(), DEFAULT_ADMIN_PASSWORD);
    }

    #[test]
    fn test_admin_password_keeps_surrounding_spaces() {
        let mut store = CatalogStore::default();
        assert!(store.update_config_field(ConfigField::AdminPassword, " s3cret "));
        assert_eq!(store.catalog().config.admin_password(), " s3cret ");
        assert!(store.update_config_field(ConfigField::AdminPassword, " s3cret"));
        assert_eq!(store.catalog().config.admin_password(), " s3cret");
    }
}
