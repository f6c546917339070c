//! Vacancy Report Dashboard Frontend Entry Point

mod api;
mod app;
mod components;
mod config;
mod context;
mod dom;
mod editor;
mod filters;
mod models;
mod poller;

use app::App;
use leptos::prelude::*;

fn main() {
    console_error_panic_hook::set_once();
    let level = if cfg!(debug_assertions) { log::Level::Debug } else { log::Level::Info };
    if let Err(e) = console_log::init_with_level(level) {
        web_sys::console::error_1(&format!("logger init failed: {}", e).into());
    }
    mount_to_body(App);
}
