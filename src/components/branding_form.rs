//! Branding Form Component

use leptos::prelude::*;

use crate::context::use_sync;
use crate::models::ConfigField;
use crate::store::{use_app_store, AppStateStoreFields};

/// One input per config field; changes are committed on blur
#[component]
pub fn BrandingForm() -> impl IntoView {
    let store = use_app_store();
    let sync = use_sync();

    view! {
        <section class="branding-form">
            <h2>"Style"</h2>
            {ConfigField::ALL
                .into_iter()
                .map(|field| {
                    let input_type = match field {
                        f if f.is_color() => "color",
                        ConfigField::AdminPassword => "password",
                        _ => "text",
                    };
                    view! {
                        <label class="config-field">
                            {field.label()}
                            <input
                                type=input_type
                                prop:value=move || {
                                    store.board().with(|b| b.catalog().config.get(field).to_string())
                                }
                                on:change=move |ev| {
                                    let value = event_target_value(&ev);
                                    if sync.commit(|b| b.update_config(field, &value)) {
                                        log::info!("{} updated", field.label());
                                    }
                                }
                            />
                        </label>
                    }
                })
                .collect_view()}
        </section>
    }
}
