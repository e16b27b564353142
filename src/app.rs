//! Menu Board App
//!
//! Root component: wires settings, the persistence source and the store,
//! then switches between the menu and the admin dashboard.

use leptos::prelude::*;
use reactive_stores::Store;

use crate::components::{AdminPanel, MenuView, Navbar, NoticeBar};
use crate::context::SyncHandle;
use crate::settings::BoardSettings;
use crate::store::{AppState, AppStateStoreFields};
use crate::sync;

#[component]
pub fn App() -> impl IntoView {
    let settings = BoardSettings::from_env().unwrap_or_else(|e| {
        log::error!("invalid settings, using defaults: {e}");
        BoardSettings::default()
    });

    let store = Store::new(AppState::new(&settings));
    provide_context(store);

    let sync = SyncHandle::new(store, sync::connect(&settings));
    provide_context(sync);
    sync.start();

    let is_admin = move || store.board().with(|b| b.is_admin());
    let theme = move || {
        store.board().with(|b| {
            let config = &b.catalog().config;
            format!(
                "--primary: {}; --secondary: {}; --accent: {}; background-color: {};",
                config.primary_color(),
                config.secondary_color(),
                config.accent_color(),
                config.secondary_color(),
            )
        })
    };

    view! {
        <Show
            when=move || !store.loading().get()
            fallback=|| {
                view! {
                    <div class="loading-screen">
                        <div class="spinner"></div>
                        <p>"Loading menu..."</p>
                    </div>
                }
            }
        >
            <div class="menu-board" style=theme>
                <Navbar />
                <NoticeBar />
                <Show when=is_admin fallback=|| view! { <MenuView /> }>
                    <AdminPanel />
                </Show>
            </div>
        </Show>
    }
}
