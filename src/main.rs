//! Task Board Frontend Entry Point

mod app;
mod board;
mod components;
mod config;
mod context;
mod controller;
mod error;
mod gateway;
mod logging;
mod models;
mod store;

use app::App;
use config::AppConfig;
use leptos::prelude::*;
use tracing::warn;

fn main() {
    console_error_panic_hook::set_once();

    let config = AppConfig::from_build_env();
    if let Err(err) = logging::init_logging(config.log_level) {
        web_sys::console::error_1(&err.into());
    }
    for rejected in &config.rejected {
        warn!(setting = %rejected, "ignoring malformed build setting, using default");
    }

    let gateway = config.gateway;
    mount_to_body(move || view! { <App gateway=gateway /> });
}
