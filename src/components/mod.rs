//! UI Components
//!
//! Reusable Leptos components.

mod admin_panel;
mod branding_form;
mod category_manager;
mod data_panel;
mod delete_confirm_button;
mod filter_bar;
mod item_card;
mod item_editor;
mod item_list;
mod menu_view;
mod navbar;
mod notice_bar;

pub use admin_panel::AdminPanel;
pub use branding_form::BrandingForm;
pub use category_manager::CategoryManager;
pub use data_panel::DataPanel;
pub use delete_confirm_button::DeleteConfirmButton;
pub use filter_bar::{CategoryBar, DepartmentTabs};
pub use item_card::ItemCard;
pub use item_editor::ItemEditor;
pub use item_list::ItemList;
pub use menu_view::MenuView;
pub use navbar::Navbar;
pub use notice_bar::NoticeBar;
