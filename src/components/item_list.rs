//! Admin Item List Component

use leptos::prelude::*;

use super::DeleteConfirmButton;
use crate::browser;
use crate::context::use_sync;
use crate::models::Item;
use crate::store::{use_app_store, AppStateStoreFields};

/// Every item with edit and delete actions
#[component]
pub fn ItemList() -> impl IntoView {
    let store = use_app_store();
    let sync = use_sync();

    let items = move || store.board().with(|b| b.catalog().items.clone());
    let currency = move || store.board().with(|b| b.catalog().config.currency().to_string());
    let editing_id = move || store.board().with(|b| b.session().editing_id());

    view! {
        <section class="admin-item-list">
            <h2>{move || format!("Items ({})", items().len())}</h2>
            <Show
                when=move || !items().is_empty()
                fallback=|| view! { <p class="empty-state">"No items yet."</p> }
            >
                <ul>
                    <For
                        each=items
                        key=|item: &Item| (item.id, item.name.clone(), item.price.to_bits(), item.category.clone())
                        let:item
                    >
                        {
                            let id = item.id;
                            let name = item.name.clone();
                            let price = item.price;
                            view! {
                                <li class=move || if editing_id() == Some(id) { "admin-item editing" } else { "admin-item" }>
                                    <span class="admin-item-name">{item.name.clone()}</span>
                                    <span class="admin-item-meta">
                                        {format!("{} · {}", item.category, item.resolved_department().as_str())}
                                    </span>
                                    <span class="admin-item-price">
                                        {move || format!("{}{:.2}", currency(), price)}
                                    </span>
                                    <button
                                        type="button"
                                        class="edit-btn"
                                        on:click=move |_| {
                                            if sync.commit(|b| b.start_edit(id)) {
                                                browser::scroll_to_top();
                                            }
                                        }
                                    >
                                        "Edit"
                                    </button>
                                    <DeleteConfirmButton
                                        button_class="delete-btn"
                                        subject=name
                                        on_confirm=move |_| {
                                            sync.commit(|b| b.delete_item(id));
                                        }
                                    />
                                </li>
                            }
                        }
                    </For>
                </ul>
            </Show>
        </section>
    }
}
