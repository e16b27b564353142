//! Filter Bar Components
//!
//! Department tabs and the category pills above the menu.

use leptos::prelude::*;

use crate::context::use_sync;
use crate::models::{Department, ALL_CATEGORIES};
use crate::store::{use_app_store, AppStateStoreFields};

/// Department switch; hidden when departments are disabled
#[component]
pub fn DepartmentTabs() -> impl IntoView {
    let store = use_app_store();
    let sync = use_sync();
    let active = move || store.board().with(|b| b.session().filters.department);

    view! {
        <Show when=move || active().is_some()>
            <nav class="department-tabs">
                {Department::ALL
                    .into_iter()
                    .map(|department| {
                        view! {
                            <button
                                type="button"
                                class=move || {
                                    if active() == Some(department) { "dept-tab active" } else { "dept-tab" }
                                }
                                on:click=move |_| sync.commit(|b| b.set_department(department))
                            >
                                {department.as_str()}
                            </button>
                        }
                    })
                    .collect_view()}
            </nav>
        </Show>
    }
}

/// "All" plus the categories used in the active department
#[component]
pub fn CategoryBar() -> impl IntoView {
    let store = use_app_store();
    let sync = use_sync();
    let active = move || store.board().with(|b| b.session().filters.category.clone());
    let tabs = move || {
        let mut tabs = vec![ALL_CATEGORIES.to_string()];
        tabs.extend(store.board().with(|b| b.category_tabs()));
        tabs
    };

    view! {
        <nav class="category-bar">
            <For each=tabs key=|name| name.clone() let:name>
                {
                    let label = name.clone();
                    let text = name.clone();
                    let is_active = move || active() == name;
                    view! {
                        <button
                            type="button"
                            class=move || if is_active() { "category-pill active" } else { "category-pill" }
                            on:click=move |_| sync.commit(|b| b.set_category(&label))
                        >
                            {text}
                        </button>
                    }
                }
            </For>
        </nav>
    }
}
