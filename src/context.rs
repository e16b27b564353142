//! Application Context
//!
//! [`SyncHandle`] ties the reactive store to the configured persistence
//! source. It is the one place where board mutations meet saving, so
//! components never talk to a source directly.

use std::rc::Rc;

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::board::Board;
use crate::browser;
use crate::document::DOCUMENT_FILE_NAME;
use crate::session::AdminPrompt;
use crate::store::{store_notify, AppStateStoreFields, AppStore, Notice};
use crate::sync::{CatalogSource, SourceKind, Subscription};

/// Whether a mutation that started at revision `before` must be written out
///
/// Only admin changes are saved; guests replicate read-only. An open edit
/// does not hold a save back.
pub fn should_save(before: u64, board: &Board, autosave: bool) -> bool {
    autosave && board.is_admin() && board.revision() != before
}

/// Store plus source, provided via context
#[derive(Clone, Copy)]
pub struct SyncHandle {
    store: AppStore,
    source: StoredValue<Rc<dyn CatalogSource>, LocalStorage>,
    subscription: StoredValue<Option<Subscription>, LocalStorage>,
}

pub fn use_sync() -> SyncHandle {
    use_context::<SyncHandle>().expect("SyncHandle should be provided")
}

impl SyncHandle {
    pub fn new(store: AppStore, source: Rc<dyn CatalogSource>) -> Self {
        Self {
            store,
            source: StoredValue::new_local(source),
            subscription: StoredValue::new_local(None),
        }
    }

    fn source(&self) -> Rc<dyn CatalogSource> {
        self.source.get_value()
    }

    pub fn kind(&self) -> SourceKind {
        self.source().kind()
    }

    pub fn autosaves(&self) -> bool {
        self.source().autosave()
    }

    /// Initial load (forced) followed by the change feed
    pub fn start(&self) {
        let source = self.source();
        let store = self.store;
        spawn_local(async move {
            match source.load().await {
                Ok(Some(catalog)) => {
                    log::info!("loaded {} items from {}", catalog.items.len(), source.kind().label());
                    store.board().write().apply_inbound(catalog, true);
                }
                Ok(None) => log::info!("no catalog stored in {} yet", source.kind().label()),
                Err(e) => log::warn!("load from {} failed: {e}", source.kind().label()),
            }
            *store.loading().write() = false;
        });

        let subscription = self.source().subscribe(Rc::new(move |catalog| {
            store.board().write().apply_inbound(catalog, false);
        }));
        self.subscription.set_value(Some(subscription));
    }

    /// Apply a mutation; admin changes are saved when the source autosaves
    pub fn commit<R>(&self, f: impl FnOnce(&mut Board) -> R) -> R {
        let autosave = self.autosaves();
        let (result, save) = {
            let field = self.store.board();
            let mut board = field.write();
            let before = board.revision();
            let result = f(&mut *board);
            (result, should_save(before, &board, autosave))
        };
        if save {
            self.save(false);
        }
        result
    }

    /// Write the current catalog to the source; failures always raise a notice
    pub fn save(&self, announce: bool) {
        let source = self.source();
        let store = self.store;
        let catalog = store.board().read().catalog().clone();
        spawn_local(async move {
            match source.save(&catalog).await {
                Ok(()) => {
                    log::debug!("saved {} items to {}", catalog.items.len(), source.kind().label());
                    if announce {
                        store_notify(&store, Notice::Info(format!("Saved to {}", source.kind().label())));
                    }
                }
                Err(e) => store_notify(
                    &store,
                    Notice::Error(format!("Save to {} failed: {e}", source.kind().label())),
                ),
            }
        });
    }

    /// Re-read the source and apply it regardless of editing state
    pub fn force_resync(&self) {
        if !self.kind().has_remote() {
            return;
        }
        let source = self.source();
        let store = self.store;
        spawn_local(async move {
            match source.load().await {
                Ok(Some(catalog)) => {
                    store.board().write().apply_inbound(catalog, true);
                }
                Ok(None) => {}
                Err(e) => log::warn!("resync from {} failed: {e}", source.kind().label()),
            }
        });
    }

    /// Prompt for the password, or leave admin mode if already in it
    pub fn toggle_admin(&self) {
        let is_admin = self.store.board().read().is_admin();
        if is_admin {
            self.leave_admin();
            return;
        }
        let input = browser::prompt("Enter admin password");
        match self.commit(|board| board.request_admin(input.as_deref())) {
            AdminPrompt::Granted => log::info!("admin mode entered"),
            AdminPrompt::Rejected => store_notify(&self.store, Notice::Error("Incorrect password".to_string())),
            AdminPrompt::Cancelled => {}
        }
    }

    pub fn leave_admin(&self) {
        self.commit(|board| board.leave_admin());
        log::info!("admin mode left");
        self.force_resync();
    }

    /// Download the full document as `data.json`
    pub fn export(&self) {
        // a source without autosave publishes by download already
        if !self.autosaves() {
            self.save(false);
            return;
        }
        let exported = self.store.board().read().export_document();
        let result = exported
            .map_err(|e| e.to_string())
            .and_then(|text| browser::download_text(DOCUMENT_FILE_NAME, &text));
        if let Err(e) = result {
            store_notify(&self.store, Notice::Error(format!("Export failed: {e}")));
        }
    }

    /// Replace the catalog with a user-selected document
    pub fn import(&self, file: web_sys::File) {
        let handle = *self;
        spawn_local(async move {
            let text = match browser::read_file_text(file).await {
                Ok(text) => text,
                Err(e) => {
                    store_notify(&handle.store, Notice::Error(format!("Could not read file: {e}")));
                    return;
                }
            };
            let notice = match handle.commit(|board| board.import_document(&text)) {
                Ok(summary) => {
                    let mut message = format!(
                        "Imported {} items and {} categories",
                        summary.items, summary.categories
                    );
                    if !handle.autosaves() {
                        message.push_str(". Export data.json to publish");
                    }
                    Notice::Info(message)
                }
                Err(e) => Notice::Error(format!("Import failed: {e}")),
            };
            store_notify(&handle.store, notice);
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::ItemForm;
    use crate::models::{Catalog, Item};

    fn admin_board() -> Board {
        let mut board = Board::default();
        board.apply_inbound(
            Catalog {
                items: vec![Item::new(1, "Cola", "Bar", 2.0)],
                categories: vec!["Bar".to_string()],
                ..Default::default()
            },
            true,
        );
        board.request_admin(Some("admin"));
        board
    }

    #[test]
    fn test_guest_changes_are_never_saved() {
        let mut board = Board::default();
        let before = board.revision();
        board.apply_inbound(
            Catalog {
                categories: vec!["Bar".to_string()],
                ..Default::default()
            },
            false,
        );
        assert_ne!(board.revision(), before);
        assert!(!should_save(before, &board, true));
    }

    #[test]
    fn test_admin_without_change_is_not_saved() {
        let mut board = admin_board();
        let before = board.revision();
        board.set_search("cola");
        board.toggle_view_mode();
        assert!(!should_save(before, &board, true));
    }

    #[test]
    fn test_admin_change_is_saved_when_source_autosaves() {
        let mut board = admin_board();
        let before = board.revision();
        assert_eq!(board.add_category("Kitchen"), Ok(true));
        assert!(should_save(before, &board, true));
        assert!(!should_save(before, &board, false));
    }

    #[test]
    fn test_open_edit_does_not_block_save() {
        let mut board = admin_board();
        assert!(board.start_edit(1));
        let before = board.revision();
        board.update_config(crate::models::ConfigField::DisplayName, "Iron Cafe");
        assert!(board.editing().is_some());
        assert!(should_save(before, &board, true));

        let before = board.revision();
        board
            .submit_item(&ItemForm {
                name: "Cola Light".to_string(),
                price: "2".to_string(),
                category: "Bar".to_string(),
                ..Default::default()
            })
            .unwrap();
        assert!(should_save(before, &board, true));
    }
}
