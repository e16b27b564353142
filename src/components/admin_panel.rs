//! Admin Panel Component
//!
//! Tabbed dashboard shown instead of the menu while in admin mode.

use leptos::prelude::*;

use super::{BrandingForm, CategoryManager, DataPanel, ItemEditor, ItemList};
use crate::context::use_sync;
use crate::session::AdminTab;
use crate::store::{use_app_store, AppStateStoreFields};

const TABS: [(AdminTab, &str); 2] = [
    (AdminTab::Items, "Items"),
    (AdminTab::StyleAndData, "Style & Data"),
];

#[component]
pub fn AdminPanel() -> impl IntoView {
    let store = use_app_store();
    let sync = use_sync();
    let active = move || store.board().with(|b| b.session().admin_tab);

    view! {
        <main class="admin-panel">
            <nav class="admin-tabs">
                {TABS
                    .into_iter()
                    .map(|(tab, label)| {
                        view! {
                            <button
                                type="button"
                                class=move || if active() == tab { "admin-tab active" } else { "admin-tab" }
                                on:click=move |_| sync.commit(|b| b.set_admin_tab(tab))
                            >
                                {label}
                            </button>
                        }
                    })
                    .collect_view()}
            </nav>

            <Show
                when=move || active() == AdminTab::Items
                fallback=|| {
                    view! {
                        <BrandingForm />
                        <CategoryManager />
                        <DataPanel />
                    }
                }
            >
                <ItemEditor />
                <ItemList />
            </Show>
        </main>
    }
}
