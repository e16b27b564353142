//! View Projection
//!
//! Pure functions from (catalog, filters) to the items and category tabs on
//! screen. Nothing here mutates the catalog.

use crate::models::{Catalog, Category, Department, Item, ALL_CATEGORIES};

/// Active filters taken from the session
#[derive(Debug, Clone, PartialEq)]
pub struct Filters {
    /// `None` disables department filtering
    pub department: Option<Department>,
    /// `"All"` or a category name
    pub category: String,
    pub search: String,
}

impl Default for Filters {
    fn default() -> Self {
        Self {
            department: Some(Department::default()),
            category: ALL_CATEGORIES.to_string(),
            search: String::new(),
        }
    }
}

impl Filters {
    fn all_categories(&self) -> bool {
        self.category == ALL_CATEGORIES
    }

    fn matches_department(&self, item: &Item) -> bool {
        self.department
            .map_or(true, |dept| item.resolved_department() == dept)
    }

    fn matches_category(&self, item: &Item) -> bool {
        self.all_categories() || item.category == self.category
    }

    /// `needle` must already be lowercase
    fn matches_search(item: &Item, needle: &str) -> bool {
        needle.is_empty()
            || item.name.to_lowercase().contains(needle)
            || item.description.to_lowercase().contains(needle)
    }

    pub fn matches(&self, item: &Item) -> bool {
        let needle = self.search.to_lowercase();
        self.matches_department(item) && self.matches_category(item) && Self::matches_search(item, &needle)
    }
}

/// Items passing every active filter, in catalog order
pub fn project<'a>(catalog: &'a Catalog, filters: &Filters) -> Vec<&'a Item> {
    let needle = filters.search.to_lowercase();
    catalog
        .items
        .iter()
        .filter(|item| {
            filters.matches_department(item)
                && filters.matches_category(item)
                && Filters::matches_search(item, &needle)
        })
        .collect()
}

/// Featured strip: only without a category filter or search term
pub fn featured<'a>(catalog: &'a Catalog, filters: &Filters) -> Vec<&'a Item> {
    if !filters.all_categories() || !filters.search.is_empty() {
        return Vec::new();
    }
    catalog
        .items
        .iter()
        .filter(|item| item.featured())
        .collect()
}

/// Category tabs for a department
///
/// Configured categories come first in their configured order (only those
/// with at least one item in the department), then orphaned item categories
/// in first-seen order. With no department every configured category shows.
pub fn visible_categories(catalog: &Catalog, department: Option<Department>) -> Vec<Category> {
    let in_department = |item: &&Item| department.map_or(true, |d| item.resolved_department() == d);
    let used: Vec<&str> = catalog
        .items
        .iter()
        .filter(in_department)
        .map(|item| item.category.as_str())
        .filter(|c| !c.is_empty())
        .collect();

    let mut tabs: Vec<Category> = catalog
        .categories
        .iter()
        .filter(|c| department.is_none() || used.contains(&c.as_str()))
        .cloned()
        .collect();

    for category in used {
        if !tabs.iter().any(|t| t == category) {
            tabs.push(category.to_string());
        }
    }
    tabs
}
