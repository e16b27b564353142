//! Global Application State Store
//!
//! Uses Leptos reactive_stores for fine-grained reactivity. The board is the
//! single source of truth; every mutation goes through `board().write()` so
//! dependent views re-render right after it.

use leptos::prelude::*;
use reactive_stores::Store;

use crate::board::Board;
use crate::session::Session;
use crate::settings::BoardSettings;

/// Transient message shown under the navbar
#[derive(Clone, Debug, PartialEq)]
pub enum Notice {
    Info(String),
    Error(String),
}

impl Notice {
    pub fn text(&self) -> &str {
        match self {
            Notice::Info(text) | Notice::Error(text) => text,
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Notice::Error(_))
    }
}

/// Global application state with field-level reactivity
#[derive(Clone, Debug, Default, Store)]
pub struct AppState {
    /// Catalog plus session state
    pub board: Board,
    /// True until the first load from the source settles
    pub loading: bool,
    pub notice: Option<Notice>,
}

impl AppState {
    pub fn new(settings: &BoardSettings) -> Self {
        Self {
            board: Board::new(Session::new(settings.departments_enabled)),
            loading: true,
            notice: None,
        }
    }
}

/// Type alias for the store
pub type AppStore = Store<AppState>;

/// Get the app store from context
pub fn use_app_store() -> AppStore {
    expect_context::<AppStore>()
}

// ========================
// Store Helper Functions
// ========================

pub fn store_notify(store: &AppStore, notice: Notice) {
    if notice.is_error() {
        log::warn!("{}", notice.text());
    }
    *store.notice().write() = Some(notice);
}

pub fn store_clear_notice(store: &AppStore) {
    *store.notice().write() = None;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state_starts_loading_with_configured_departments() {
        let settings = BoardSettings {
            departments_enabled: false,
            ..Default::default()
        };
        let state = AppState::new(&settings);
        assert!(state.loading);
        assert!(!state.board.session().departments_enabled());
        assert_eq!(state.notice, None);
    }

    #[test]
    fn test_notice_text() {
        let notice = Notice::Error("Incorrect password".to_string());
        assert!(notice.is_error());
        assert_eq!(notice.text(), "Incorrect password");
        assert!(!Notice::Info("ok".to_string()).is_error());
    }
}
