//! Menu Board Frontend Entry Point

mod app;
mod board;
mod browser;
mod catalog;
mod components;
mod context;
mod document;
mod error;
mod form;
mod models;
mod projection;
mod reconcile;
mod session;
mod settings;
mod store;
mod sync;

use app::App;
use leptos::prelude::*;

fn main() {
    console_error_panic_hook::set_once();
    if let Err(e) = board_logger::init_logger(log::LevelFilter::Debug, board_logger::DEFAULT_CAPACITY) {
        web_sys::console::error_1(&format!("logger already installed: {e}").into());
    }
    mount_to_body(App);
}
