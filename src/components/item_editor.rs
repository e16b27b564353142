//! Item Editor Component
//!
//! Add/edit form for a single item. The form keeps its own draft; the board
//! only sees it on submit.

use leptos::prelude::*;

use crate::context::use_sync;
use crate::form::ItemForm;
use crate::models::Department;
use crate::store::{store_notify, use_app_store, AppStateStoreFields, Notice};

#[component]
pub fn ItemEditor() -> impl IntoView {
    let store = use_app_store();
    let sync = use_sync();
    let form = RwSignal::new(ItemForm::default());

    let editing_id = Memo::new(move |_| store.board().with(|b| b.session().editing_id()));
    let categories = move || store.board().with(|b| b.catalog().categories.clone());
    let blank = move || {
        store
            .board()
            .with_untracked(|b| ItemForm::blank(b.catalog().categories.first().map(String::as_str)))
    };

    // Prefill when an edit starts or ends
    Effect::new(move |_| {
        let next = match editing_id.get() {
            Some(_) => store
                .board()
                .with_untracked(|b| b.editing().map(ItemForm::from_item))
                .unwrap_or_else(blank),
            None => blank(),
        };
        form.set(next);
    });

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let values = form.get_untracked();
        match sync.commit(|b| b.submit_item(&values)) {
            Ok(_) => {
                form.set(blank());
                store_notify(&store, Notice::Info(format!("Saved \"{}\"", values.name.trim())));
            }
            Err(e) => store_notify(&store, Notice::Error(e.to_string())),
        }
    };

    let on_cancel = move |_| {
        if editing_id.get_untracked().is_some() {
            sync.commit(|b| b.cancel_edit());
        } else {
            form.set(blank());
        }
    };

    view! {
        <form class="item-form" on:submit=on_submit>
            <h2>{move || if editing_id.get().is_some() { "Edit item" } else { "Add item" }}</h2>

            <label>
                "Name"
                <input
                    type="text"
                    prop:value=move || form.with(|f| f.name.clone())
                    on:input=move |ev| form.update(|f| f.name = event_target_value(&ev))
                />
            </label>

            <label>
                "Price"
                <input
                    type="number"
                    step="0.01"
                    min="0"
                    prop:value=move || form.with(|f| f.price.clone())
                    on:input=move |ev| form.update(|f| f.price = event_target_value(&ev))
                />
            </label>

            <label>
                "Category"
                <select on:change=move |ev| form.update(|f| f.category = event_target_value(&ev))>
                    <option value="" selected=move || form.with(|f| f.category.is_empty())>
                        "Choose a category"
                    </option>
                    {move || {
                        categories()
                            .into_iter()
                            .map(|name| {
                                let current = name.clone();
                                let value = name.clone();
                                view! {
                                    <option
                                        value=value
                                        selected=move || form.with(|f| f.category == current)
                                    >
                                        {name}
                                    </option>
                                }
                            })
                            .collect_view()
                    }}
                </select>
            </label>

            <label>
                "Department"
                <select on:change=move |ev| form.update(|f| f.department = event_target_value(&ev))>
                    {Department::ALL
                        .into_iter()
                        .map(|department| {
                            view! {
                                <option
                                    value=department.as_str()
                                    selected=move || form.with(|f| f.department == department.as_str())
                                >
                                    {department.as_str()}
                                </option>
                            }
                        })
                        .collect_view()}
                </select>
            </label>

            <label>
                "Description"
                <textarea
                    rows="2"
                    prop:value=move || form.with(|f| f.description.clone())
                    on:input=move |ev| form.update(|f| f.description = event_target_value(&ev))
                ></textarea>
            </label>

            <label>
                "Image URL"
                <input
                    type="url"
                    prop:value=move || form.with(|f| f.image.clone())
                    on:input=move |ev| form.update(|f| f.image = event_target_value(&ev))
                />
            </label>

            <label>
                "Tags (comma separated)"
                <input
                    type="text"
                    placeholder="Vegan, High Protein"
                    prop:value=move || form.with(|f| f.tags.clone())
                    on:input=move |ev| form.update(|f| f.tags = event_target_value(&ev))
                />
            </label>

            <label>
                "Calories"
                <input
                    type="text"
                    placeholder="250 kcal"
                    prop:value=move || form.with(|f| f.calories.clone())
                    on:input=move |ev| form.update(|f| f.calories = event_target_value(&ev))
                />
            </label>

            <label class="checkbox">
                <input
                    type="checkbox"
                    prop:checked=move || form.with(|f| f.is_featured)
                    on:change=move |ev| form.update(|f| f.is_featured = event_target_checked(&ev))
                />
                "Featured"
            </label>

            <div class="form-actions">
                <button type="submit" class="primary-btn">
                    {move || if editing_id.get().is_some() { "Save changes" } else { "Add item" }}
                </button>
                <button type="button" class="secondary-btn" on:click=on_cancel>
                    {move || if editing_id.get().is_some() { "Cancel" } else { "Clear" }}
                </button>
            </div>
        </form>
    }
}
