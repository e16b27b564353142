//! Menu Models
//!
//! Data structures persisted in the menu document (`data.json` or the cloud copy).

use serde::{Deserialize, Deserializer, Serialize};

/// Stable item identifier
pub type ItemId = u64;

/// Category name, used as both identifier and label
pub type Category = String;

/// Category filter value meaning "no category filter"
pub const ALL_CATEGORIES: &str = "All";

// ========================
// Department
// ========================

/// Coarse grouping above category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Department {
    #[default]
    Bar,
    Kitchen,
    Supplements,
}

impl Department {
    pub const ALL: [Department; 3] = [Department::Bar, Department::Kitchen, Department::Supplements];

    pub fn as_str(&self) -> &'static str {
        match self {
            Department::Bar => "Bar",
            Department::Kitchen => "Kitchen",
            Department::Supplements => "Supplements",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "Bar" => Some(Department::Bar),
            "Kitchen" => Some(Department::Kitchen),
            "Supplements" => Some(Department::Supplements),
            _ => None,
        }
    }

    /// Department for items saved before departments existed
    pub fn from_legacy_category(category: &str) -> Self {
        match category {
            "Protein Shakes" => Department::Supplements,
            _ => Department::default(),
        }
    }
}

/// Unknown department strings are read as "no department"
fn lenient_department<'de, D>(deserializer: D) -> Result<Option<Department>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.as_deref().and_then(Department::parse))
}

// ========================
// Item
// ========================

/// A purchasable menu item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    pub id: ItemId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub price: f64,
    #[serde(default)]
    pub category: Category,
    #[serde(default, deserialize_with = "lenient_department", skip_serializing_if = "Option::is_none")]
    pub department: Option<Department>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub calories: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_featured: Option<bool>,
}

impl Item {
    pub fn new(id: ItemId, name: impl Into<String>, category: impl Into<String>, price: f64) -> Self {
        Self {
            id,
            name: name.into(),
            description: String::new(),
            price,
            category: category.into(),
            department: None,
            image: None,
            tags: Vec::new(),
            calories: None,
            is_featured: None,
        }
    }

    /// Explicit department, else inferred from the category
    pub fn resolved_department(&self) -> Department {
        self.department
            .unwrap_or_else(|| Department::from_legacy_category(&self.category))
    }

    pub fn featured(&self) -> bool {
        self.is_featured.unwrap_or(false)
    }

    /// Price with exactly two decimals, e.g. `$4.50`
    pub fn price_label(&self, currency: &str) -> String {
        format!("{}{:.2}", currency, self.price)
    }
}

// ========================
// Config
// ========================

pub const DEFAULT_DISPLAY_NAME: &str = "b52 Fitness Elites";
pub const DEFAULT_PRIMARY_COLOR: &str = "#3b82f6";
pub const DEFAULT_SECONDARY_COLOR: &str = "#0f172a";
pub const DEFAULT_ACCENT_COLOR: &str = "#22c55e";
pub const DEFAULT_CURRENCY: &str = "$";
pub const DEFAULT_ADMIN_PASSWORD: &str = "admin";

/// Branding and admin settings stored with the catalog
///
/// Absent fields fall back to the defaults above when read; the defaults are
/// never written into the stored value.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardConfig {
    #[serde(default, alias = "displayName", skip_serializing_if = "Option::is_none")]
    pub gym_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primary_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secondary_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accent_color: Option<String>,
    #[serde(default, alias = "currencySymbol", skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub admin_password: Option<String>,
}

/// Editable config keys
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigField {
    DisplayName,
    PrimaryColor,
    SecondaryColor,
    AccentColor,
    CurrencySymbol,
    AdminPassword,
}

impl ConfigField {
    pub const ALL: [ConfigField; 6] = [
        ConfigField::DisplayName,
        ConfigField::PrimaryColor,
        ConfigField::SecondaryColor,
        ConfigField::AccentColor,
        ConfigField::CurrencySymbol,
        ConfigField::AdminPassword,
    ];

    pub fn label(self) -> &'static str {
        match self {
            ConfigField::DisplayName => "Display name",
            ConfigField::PrimaryColor => "Primary color",
            ConfigField::SecondaryColor => "Secondary color",
            ConfigField::AccentColor => "Accent color",
            ConfigField::CurrencySymbol => "Currency symbol",
            ConfigField::AdminPassword => "Admin password",
        }
    }

    pub fn is_color(self) -> bool {
        matches!(
            self,
            ConfigField::PrimaryColor | ConfigField::SecondaryColor | ConfigField::AccentColor
        )
    }
}

fn or_default<'a>(value: &'a Option<String>, default: &'a str) -> &'a str {
    match value.as_deref() {
        Some(v) if !v.is_empty() => v,
        _ => default,
    }
}

impl BoardConfig {
    pub fn display_name(&self) -> &str {
        or_default(&self.gym_name, DEFAULT_DISPLAY_NAME)
    }

    pub fn primary_color(&self) -> &str {
        or_default(&self.primary_color, DEFAULT_PRIMARY_COLOR)
    }

    pub fn secondary_color(&self) -> &str {
        or_default(&self.secondary_color, DEFAULT_SECONDARY_COLOR)
    }

    pub fn accent_color(&self) -> &str {
        or_default(&self.accent_color, DEFAULT_ACCENT_COLOR)
    }

    pub fn currency(&self) -> &str {
        or_default(&self.currency, DEFAULT_CURRENCY)
    }

    pub fn admin_password(&self) -> &str {
        or_default(&self.admin_password, DEFAULT_ADMIN_PASSWORD)
    }

    /// Effective value of a field (default applied)
    pub fn get(&self, field: ConfigField) -> &str {
        match field {
            ConfigField::DisplayName => self.display_name(),
            ConfigField::PrimaryColor => self.primary_color(),
            ConfigField::SecondaryColor => self.secondary_color(),
            ConfigField::AccentColor => self.accent_color(),
            ConfigField::CurrencySymbol => self.currency(),
            ConfigField::AdminPassword => self.admin_password(),
        }
    }

    /// Stored slot for a field
    pub fn slot_mut(&mut self, field: ConfigField) -> &mut Option<String> {
        match field {
            ConfigField::DisplayName => &mut self.gym_name,
            ConfigField::PrimaryColor => &mut self.primary_color,
            ConfigField::SecondaryColor => &mut self.secondary_color,
            ConfigField::AccentColor => &mut self.accent_color,
            ConfigField::CurrencySymbol => &mut self.currency,
            ConfigField::AdminPassword => &mut self.admin_password,
        }
    }
}

// ========================
// Catalog
// ========================

/// The persisted aggregate: loaded, saved, imported and exported as one document
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Catalog {
    #[serde(default)]
    pub items: Vec<Item>,
    #[serde(default)]
    pub categories: Vec<Category>,
    #[serde(default)]
    pub config: BoardConfig,
}

impl Catalog {
    pub fn item(&self, id: ItemId) -> Option<&Item> {
        self.items.iter().find(|item| item.id == id)
    }

    pub fn has_category(&self, name: &str) -> bool {
        self.categories.iter().any(|c| c == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_price_label_always_two_decimals() {
        let mut item = Item::new(1, "Cola", "Bar", 2.5);
        assert_eq!(item.price_label("$"), "$2.50");
        item.price = 3.0;
        assert_eq!(item.price_label("€"), "€3.00");
        item.price = 1.239;
        assert_eq!(item.price_label("$"), "$1.24");
    }

    #[test]
    fn test_resolved_department() {
        let mut item = Item::new(1, "Whey", "Protein Shakes", 5.0);
        assert_eq!(item.resolved_department(), Department::Supplements);

        item.category = "Coffee".to_string();
        assert_eq!(item.resolved_department(), Department::Bar);

        item.department = Some(Department::Kitchen);
        assert_eq!(item.resolved_department(), Department::Kitchen);
    }

    #[test]
    fn test_config_defaults_at_read_time() {
        let mut config = BoardConfig::default();
        assert_eq!(config.admin_password(), DEFAULT_ADMIN_PASSWORD);
        assert_eq!(config.currency(), "$");

        config.admin_password = Some(String::new());
        assert_eq!(config.admin_password(), DEFAULT_ADMIN_PASSWORD);

        config.admin_password = Some("123".to_string());
        assert_eq!(config.get(ConfigField::AdminPassword), "123");

        // defaults are not serialized
        let json = serde_json::to_string(&BoardConfig::default()).unwrap();
        assert_eq!(json, "{}");
    }

    #[test]
    fn test_every_field_has_its_own_slot() {
        let mut config = BoardConfig::default();
        for (i, field) in ConfigField::ALL.into_iter().enumerate() {
            *config.slot_mut(field) = Some(format!("v{i}"));
        }
        let values: Vec<&str> = ConfigField::ALL.iter().map(|f| config.get(*f)).collect();
        assert_eq!(values, vec!["v0", "v1", "v2", "v3", "v4", "v5"]);
        assert_eq!(ConfigField::ALL.iter().filter(|f| f.is_color()).count(), 3);
    }

    #[test]
    fn test_item_json_field_names() {
        let json = r#"{"id":7,"name":"Cola","description":"","price":2,"category":"Bar",
            "department":"Kitchen","tags":["Cold"],"isFeatured":true}"#;
        let item: Item = serde_json::from_str(json).unwrap();
        assert_eq!(item.department, Some(Department::Kitchen));
        assert!(item.featured());

        let out = serde_json::to_value(&item).unwrap();
        assert_eq!(out["isFeatured"], serde_json::json!(true));
        assert!(out.get("image").is_none());
    }

    #[test]
    fn test_unknown_department_is_absent() {
        let json = r#"{"id":1,"name":"Towel","price":1,"category":"Gear","department":"Shop"}"#;
        let item: Item = serde_json::from_str(json).unwrap();
        assert_eq!(item.department, None);
        assert_eq!(item.resolved_department(), Department::Bar);
    }

    #[test]
    fn test_config_aliases() {
        let json = r#"{"displayName":"Iron Cafe","currencySymbol":"£"}"#;
        let config: BoardConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.display_name(), "Iron Cafe");
        assert_eq!(config.currency(), "£");
    }
}
