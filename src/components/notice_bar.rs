//! Notice Bar Component

use leptos::prelude::*;

use crate::store::{store_clear_notice, use_app_store, AppStateStoreFields};

/// Shows the current notice until dismissed
#[component]
pub fn NoticeBar() -> impl IntoView {
    let store = use_app_store();

    move || {
        store.notice().get().map(|notice| {
            let class = if notice.is_error() { "notice error" } else { "notice info" };
            view! {
                <div class=class role="status">
                    <span>{notice.text().to_string()}</span>
                    <button type="button" class="notice-close" on:click=move |_| store_clear_notice(&store)>
                        "×"
                    </button>
                </div>
            }
        })
    }
}
