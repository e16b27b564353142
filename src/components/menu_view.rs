//! Menu View Component
//!
//! The guest-facing board: filters, featured strip and the filtered items.

use leptos::prelude::*;

use super::{CategoryBar, DepartmentTabs, ItemCard};
use crate::models::Item;
use crate::session::ViewMode;
use crate::store::{use_app_store, AppStateStoreFields};

#[component]
pub fn MenuView() -> impl IntoView {
    let store = use_app_store();

    let currency = move || store.board().with(|b| b.catalog().config.currency().to_string());
    let view_mode = move || store.board().with(|b| b.session().view_mode);
    let featured = move || {
        store.board().with(|b| b.featured_items().into_iter().cloned().collect::<Vec<Item>>())
    };
    let visible = move || {
        store.board().with(|b| b.visible_items().into_iter().cloned().collect::<Vec<Item>>())
    };

    view! {
        <main class="menu-view">
            <DepartmentTabs />
            <CategoryBar />

            {move || {
                let items = featured();
                (!items.is_empty()).then(|| {
                    let currency = currency();
                    view! {
                        <section class="featured-strip">
                            <h2>"Featured"</h2>
                            <div class="featured-row">
                                {items
                                    .into_iter()
                                    .map(|item| {
                                        view! {
                                            <ItemCard item=item currency=currency.clone() view_mode=ViewMode::Grid />
                                        }
                                    })
                                    .collect_view()}
                            </div>
                        </section>
                    }
                })
            }}

            {move || {
                let items = visible();
                let mode = view_mode();
                if items.is_empty() {
                    return view! {
                        <p class="empty-state">"No items match your filters."</p>
                    }
                    .into_any();
                }
                let currency = currency();
                let class = match mode {
                    ViewMode::Grid => "item-grid",
                    ViewMode::List => "item-list",
                };
                view! {
                    <section class=class>
                        {items
                            .into_iter()
                            .map(|item| view! { <ItemCard item=item currency=currency.clone() view_mode=mode /> })
                            .collect_view()}
                    </section>
                }
                .into_any()
            }}
        </main>
    }
}
