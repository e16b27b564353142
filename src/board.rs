//! Interaction Controller
//!
//! [`Board`] owns the catalog store and the session, and is the only place
//! user intents and inbound sync updates are applied.

use crate::catalog::{CatalogStore, Direction};
use crate::document::{self, DocumentShape};
use crate::error::{DocumentError, FormError};
use crate::form::ItemForm;
use crate::models::{Catalog, Category, ConfigField, Department, Item, ItemId, ALL_CATEGORIES};
use crate::projection;
use crate::reconcile::{reconcile, Reconciliation};
use crate::session::{AdminMode, AdminPrompt, AdminTab, Session};

/// What an import brought in
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportSummary {
    pub items: usize,
    pub categories: usize,
    pub shape: DocumentShape,
    pub categories_synthesized: bool,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Board {
    store: CatalogStore,
    session: Session,
    /// Latest inbound catalog held back by an open edit
    deferred: Option<Catalog>,
}

impl Board {
    pub fn new(session: Session) -> Self {
        Self {
            store: CatalogStore::default(),
            session,
            deferred: None,
        }
    }

    // ========================
    // Reads
    // ========================

    pub fn catalog(&self) -> &Catalog {
        self.store.catalog()
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn revision(&self) -> u64 {
        self.store.revision()
    }

    pub fn is_admin(&self) -> bool {
        self.session.is_admin()
    }

    pub fn editing(&self) -> Option<&Item> {
        self.session.editing.as_ref()
    }

    pub fn visible_items(&self) -> Vec<&Item> {
        projection::project(self.catalog(), &self.session.filters)
    }

    pub fn featured_items(&self) -> Vec<&Item> {
        projection::featured(self.catalog(), &self.session.filters)
    }

    pub fn category_tabs(&self) -> Vec<Category> {
        projection::visible_categories(self.catalog(), self.session.filters.department)
    }

    // ========================
    // Session intents
    // ========================

    pub fn set_search(&mut self, term: &str) {
        self.session.filters.search = term.to_string();
    }

    pub fn set_category(&mut self, category: &str) {
        self.session.filters.category = category.to_string();
    }

    pub fn set_department(&mut self, department: Department) {
        self.session.set_department(department);
    }

    pub fn toggle_view_mode(&mut self) {
        self.session.view_mode = self.session.view_mode.toggled();
    }

    pub fn set_admin_tab(&mut self, tab: AdminTab) {
        self.session.admin_tab = tab;
    }

    // ========================
    // Admin mode
    // ========================

    /// Password prompt result; `None` means the prompt was cancelled
    pub fn request_admin(&mut self, input: Option<&str>) -> AdminPrompt {
        let password = self.catalog().config.admin_password().to_string();
        let (mode, outcome) = self.session.admin.authenticate(input, &password);
        self.session.admin = mode;
        outcome
    }

    /// Unconditional; the caller follows up with a forced resync
    pub fn leave_admin(&mut self) {
        self.session.admin = AdminMode::Guest;
        self.close_edit();
    }

    // ========================
    // Item editing
    // ========================

    pub fn start_edit(&mut self, id: ItemId) -> bool {
        match self.catalog().item(id) {
            Some(item) => {
                self.session.editing = Some(item.clone());
                true
            }
            None => false,
        }
    }

    pub fn cancel_edit(&mut self) {
        self.close_edit();
    }

    /// Close the form, then apply whatever arrived while it was open
    fn close_edit(&mut self) {
        self.session.editing = None;
        if let Some(inbound) = self.deferred.take() {
            self.apply_inbound(inbound, false);
        }
    }

    /// Upsert the form as the edited item (or a new one) and close the form
    ///
    /// A catalog deferred during the edit lands first, so the saved item is
    /// applied on top of it.
    pub fn submit_item(&mut self, form: &ItemForm) -> Result<ItemId, FormError> {
        let item = form.to_item()?;
        let id = self.session.editing_id();
        self.close_edit();
        let id = self.store.upsert_item(id, item);
        log::info!("saved item {id}");
        Ok(id)
    }

    /// Called after the UI confirmation
    pub fn delete_item(&mut self, id: ItemId) -> bool {
        if self.session.editing_id() == Some(id) {
            self.close_edit();
        }
        self.store.remove_item(id)
    }

    // ========================
    // Categories & config
    // ========================

    pub fn add_category(&mut self, name: &str) -> Result<bool, FormError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(FormError::MissingField("category name"));
        }
        if name == ALL_CATEGORIES {
            return Err(FormError::ReservedCategory(name.to_string()));
        }
        Ok(self.store.add_category(name))
    }

    pub fn delete_category(&mut self, name: &str) -> bool {
        self.store.remove_category(name)
    }

    pub fn move_category(&mut self, name: &str, direction: Direction) -> bool {
        self.store.reorder_category(name, direction)
    }

    pub fn update_config(&mut self, field: ConfigField, value: &str) -> bool {
        self.store.update_config_field(field, value)
    }

    // ========================
    // Import / export / sync
    // ========================

    /// Replace the catalog with a document; state is untouched on error
    pub fn import_document(&mut self, text: &str) -> Result<ImportSummary, DocumentError> {
        let parsed = document::parse(text)?;
        let summary = ImportSummary {
            items: parsed.catalog.items.len(),
            categories: parsed.catalog.categories.len(),
            shape: parsed.shape,
            categories_synthesized: parsed.categories_synthesized,
        };
        self.session.editing = None;
        self.deferred = None;
        self.store.replace(parsed.catalog);
        log::info!("imported {} items, {} categories", summary.items, summary.categories);
        Ok(summary)
    }

    pub fn export_document(&self) -> Result<String, DocumentError> {
        document::to_json(self.catalog())
    }

    /// Apply an inbound catalog under the reconciliation rule
    pub fn apply_inbound(&mut self, inbound: Catalog, force: bool) -> Reconciliation {
        let outcome = reconcile(self.catalog(), &inbound, self.session.is_editing(), force);
        match outcome {
            Reconciliation::Applied => {
                self.deferred = None;
                self.store.replace(inbound);
                log::debug!("inbound catalog applied (force={force})");
            }
            Reconciliation::Deferred => {
                log::debug!("inbound catalog held until the edit closes");
                self.deferred = Some(inbound);
            }
            Reconciliation::Unchanged => self.deferred = None,
        }
        outcome
    }
}
