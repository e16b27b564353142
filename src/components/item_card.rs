//! Item Card Component
//!
//! One menu item, as a grid card or a compact list row.

use leptos::prelude::*;

use crate::models::Item;
use crate::session::ViewMode;

#[component]
pub fn ItemCard(item: Item, #[prop(into)] currency: String, view_mode: ViewMode) -> impl IntoView {
    let price = item.price_label(&currency);
    let class = match view_mode {
        ViewMode::Grid => "item-card",
        ViewMode::List => "item-row",
    };
    let featured = item.featured();
    let image = item.image.clone().filter(|_| view_mode == ViewMode::Grid);
    let alt = item.name.clone();
    let calories = item.calories.clone();
    let tags = item.tags.clone();
    let description = item.description.clone();

    view! {
        <article class=class class:featured=featured>
            {image.map(|src| view! { <img class="item-image" src=src alt=alt loading="lazy" /> })}
            <div class="item-body">
                <div class="item-heading">
                    <h3 class="item-name">{item.name.clone()}</h3>
                    <span class="item-price">{price}</span>
                </div>
                {(!description.is_empty())
                    .then(|| view! { <p class="item-description">{description}</p> })}
                <div class="item-meta">
                    {calories.map(|cal| view! { <span class="item-calories">{cal}</span> })}
                    {tags
                        .into_iter()
                        .map(|tag| view! { <span class="item-tag">{tag}</span> })
                        .collect_view()}
                </div>
            </div>
        </article>
    }
}
