//! Navbar Component
//!
//! Branding, search, view toggle and the admin switch. Five quick taps on
//! the logo also toggle admin mode.

use leptos::prelude::*;
use leptos_multitap::use_multi_tap;

use crate::context::use_sync;
use crate::session::ViewMode;
use crate::store::{use_app_store, AppStateStoreFields};

const LOGO_TAPS: u32 = 5;
const LOGO_TAP_WINDOW_MS: f64 = 2_000.0;

#[component]
pub fn Navbar() -> impl IntoView {
    let store = use_app_store();
    let sync = use_sync();
    let logo_taps = use_multi_tap(
        LOGO_TAPS,
        LOGO_TAP_WINDOW_MS,
        Callback::new(move |_| sync.toggle_admin()),
    );

    let display_name = move || store.board().with(|b| b.catalog().config.display_name().to_string());
    let is_admin = move || store.board().with(|b| b.is_admin());
    let search = move || store.board().with(|b| b.session().filters.search.clone());
    let view_mode = move || store.board().with(|b| b.session().view_mode);

    view! {
        <header class="navbar">
            <button type="button" class="logo" on:click=move |_| logo_taps.tap()>
                <span class="logo-mark">
                    {move || display_name().chars().next().unwrap_or('M').to_string()}
                </span>
                <span class="logo-name">{display_name}</span>
            </button>

            <Show when=move || !is_admin()>
                <input
                    type="search"
                    class="search-input"
                    placeholder="Search the menu..."
                    prop:value=search
                    on:input=move |ev| {
                        let term = event_target_value(&ev);
                        sync.commit(|b| b.set_search(&term));
                    }
                />
                <button
                    type="button"
                    class="view-toggle"
                    on:click=move |_| sync.commit(|b| b.toggle_view_mode())
                >
                    {move || match view_mode() {
                        ViewMode::Grid => "☰ List",
                        ViewMode::List => "▦ Grid",
                    }}
                </button>
            </Show>

            <button
                type="button"
                class=move || if is_admin() { "admin-toggle active" } else { "admin-toggle" }
                title=move || if is_admin() { "Leave admin mode" } else { "Admin" }
                on:click=move |_| sync.toggle_admin()
            >
                {move || if is_admin() { "Exit admin" } else { "🔒" }}
            </button>
        </header>
    }
}
