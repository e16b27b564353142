//! Item Form
//!
//! Raw form values as typed by the admin, and their validation into an [`Item`].

use crate::error::FormError;
use crate::models::{Department, Item};

/// Unvalidated item form fields
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ItemForm {
    pub name: String,
    pub price: String,
    pub category: String,
    pub department: String,
    pub image: String,
    pub description: String,
    /// Comma separated
    pub tags: String,
    pub calories: String,
    pub is_featured: bool,
}

fn optional(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}

/// Comma separated tags, trimmed, blanks dropped
pub fn split_tags(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

impl ItemForm {
    /// Blank form, preselecting the first category
    pub fn blank(first_category: Option<&str>) -> Self {
        Self {
            category: first_category.unwrap_or_default().to_string(),
            department: Department::default().as_str().to_string(),
            ..Default::default()
        }
    }

    /// Prefill from an existing item; legacy items get their inferred department
    pub fn from_item(item: &Item) -> Self {
        Self {
            name: item.name.clone(),
            price: item.price.to_string(),
            category: item.category.clone(),
            department: item.resolved_department().as_str().to_string(),
            image: item.image.clone().unwrap_or_default(),
            description: item.description.clone(),
            tags: item.tags.join(", "),
            calories: item.calories.clone().unwrap_or_default(),
            is_featured: item.featured(),
        }
    }

    /// Validate into an item; the id is assigned by the store
    pub fn to_item(&self) -> Result<Item, FormError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(FormError::MissingField("name"));
        }
        let category = self.category.trim();
        if category.is_empty() {
            return Err(FormError::MissingField("category"));
        }
        let raw_price = self.price.trim();
        if raw_price.is_empty() {
            return Err(FormError::MissingField("price"));
        }
        let price: f64 = raw_price
            .parse()
            .map_err(|_| FormError::InvalidPrice(raw_price.to_string()))?;
        if !price.is_finite() || price < 0.0 {
            return Err(FormError::InvalidPrice(raw_price.to_string()));
        }

        Ok(Item {
            id: 0,
            name: name.to_string(),
            description: self.description.trim().to_string(),
            price,
            category: category.to_string(),
            department: Department::parse(self.department.trim()),
            image: optional(&self.image),
            tags: split_tags(&self.tags),
            calories: optional(&self.calories),
            is_featured: Some(self.is_featured),
        })
    }
}
