//! UI Session State
//!
//! Ephemeral per-page state: filters, view mode, admin mode, the item being
//! edited. Created fresh on load and never persisted.

use crate::models::{Department, Item, ItemId, ALL_CATEGORIES};
use crate::projection::Filters;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewMode {
    #[default]
    Grid,
    List,
}

impl ViewMode {
    pub fn toggled(self) -> Self {
        match self {
            ViewMode::Grid => ViewMode::List,
            ViewMode::List => ViewMode::Grid,
        }
    }
}

/// Admin dashboard tabs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AdminTab {
    #[default]
    Items,
    StyleAndData,
}

/// Two-state admin machine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AdminMode {
    #[default]
    Guest,
    Admin,
}

/// Outcome of a password prompt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdminPrompt {
    Granted,
    /// Wrong password; the caller reports it
    Rejected,
    /// Prompt dismissed; nothing to report
    Cancelled,
}

impl AdminMode {
    /// Guest -> Admin on an exact password match
    pub fn authenticate(self, input: Option<&str>, password: &str) -> (AdminMode, AdminPrompt) {
        match input {
            None => (self, AdminPrompt::Cancelled),
            Some(given) if given == password => (AdminMode::Admin, AdminPrompt::Granted),
            Some(_) => (self, AdminPrompt::Rejected),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    pub filters: Filters,
    pub view_mode: ViewMode,
    pub admin: AdminMode,
    pub admin_tab: AdminTab,
    /// Snapshot of the item open in the edit form
    pub editing: Option<Item>,
}

impl Session {
    pub fn new(departments_enabled: bool) -> Self {
        let filters = Filters {
            department: departments_enabled.then(Department::default),
            ..Filters::default()
        };
        Self {
            filters,
            view_mode: ViewMode::default(),
            admin: AdminMode::default(),
            admin_tab: AdminTab::default(),
            editing: None,
        }
    }

    pub fn is_admin(&self) -> bool {
        self.admin == AdminMode::Admin
    }

    pub fn is_editing(&self) -> bool {
        self.editing.is_some()
    }

    pub fn editing_id(&self) -> Option<ItemId> {
        self.editing.as_ref().map(|item| item.id)
    }

    pub fn departments_enabled(&self) -> bool {
        self.filters.department.is_some()
    }

    /// Switching department resets the category filter
    pub fn set_department(&mut self, department: Department) {
        if self.filters.department.is_some() {
            self.filters.department = Some(department);
        }
        self.filters.category = ALL_CATEGORIES.to_string();
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new(true)
    }
}
