//! Lab UI Entry Point

mod api;
mod app;
mod components;
mod config;
mod context;
mod list;
mod logging;
mod models;
mod pages;
mod store;

use app::App;
use config::AppConfig;
use leptos::prelude::*;

fn main() {
    console_error_panic_hook::set_once();
    let config = AppConfig::load();
    logging::init(config.log_level);
    log::info!("lab ui starting against {}", config.api_base_url);
    mount_to_body(move || view! { <App config=config /> });
}
