//! Category Manager Component
//!
//! Add, reorder and delete categories. Deleting a category leaves its items
//! alone; they keep the stale name until edited.

use leptos::prelude::*;

use super::DeleteConfirmButton;
use crate::catalog::Direction;
use crate::context::use_sync;
use crate::store::{store_notify, use_app_store, AppStateStoreFields, Notice};

#[component]
pub fn CategoryManager() -> impl IntoView {
    let store = use_app_store();
    let sync = use_sync();
    let (new_name, set_new_name) = signal(String::new());

    let categories = move || store.board().with(|b| b.catalog().categories.clone());

    let add_category = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let name = new_name.get_untracked();
        match sync.commit(|b| b.add_category(&name)) {
            Ok(true) => set_new_name.set(String::new()),
            Ok(false) => store_notify(
                &store,
                Notice::Error(format!("Category \"{}\" already exists", name.trim())),
            ),
            Err(e) => store_notify(&store, Notice::Error(e.to_string())),
        }
    };

    view! {
        <section class="category-manager">
            <h2>"Categories"</h2>
            <form class="category-add" on:submit=add_category>
                <input
                    type="text"
                    placeholder="New category"
                    prop:value=move || new_name.get()
                    on:input=move |ev| set_new_name.set(event_target_value(&ev))
                />
                <button type="submit">"Add"</button>
            </form>
            <ul>
                {move || {
                    let list = categories();
                    let last = list.len().saturating_sub(1);
                    list.into_iter()
                        .enumerate()
                        .map(|(index, name)| {
                            let up = name.clone();
                            let down = name.clone();
                            let removed = name.clone();
                            view! {
                                <li class="category-row">
                                    <span class="category-name">{name.clone()}</span>
                                    <button
                                        type="button"
                                        class="move-btn"
                                        disabled={index == 0}
                                        on:click=move |_| {
                                            sync.commit(|b| b.move_category(&up, Direction::Up));
                                        }
                                    >
                                        "↑"
                                    </button>
                                    <button
                                        type="button"
                                        class="move-btn"
                                        disabled={index == last}
                                        on:click=move |_| {
                                            sync.commit(|b| b.move_category(&down, Direction::Down));
                                        }
                                    >
                                        "↓"
                                    </button>
                                    <DeleteConfirmButton
                                        button_class="delete-btn"
                                        subject=name
                                        on_confirm=move |_| {
                                            sync.commit(|b| b.delete_category(&removed));
                                        }
                                    />
                                </li>
                            }
                        })
                        .collect_view()
                }}
            </ul>
        </section>
    }
}
