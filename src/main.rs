#![allow(warnings)]
//! Media Admin Frontend Entry Point

mod api;
mod app;
mod browser;
mod components;
mod config;
mod context;
mod models;
mod storage;
mod store;

use app::App;
use leptos::prelude::*;

fn main() {
    console_error_panic_hook::set_once();
    wasm_logger::init(wasm_logger::Config::new(log::Level::Debug));
    log::info!("media admin starting");
    mount_to_body(App);
}
