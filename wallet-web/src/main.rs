//! Wallet Connect widget
//!
//! Connects to the injected browser wallet, shows the connected account,
//! network and balance, and checks the balance of any address.

use leptos::prelude::*;
use std::str::FromStr;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::HtmlElement;

mod app;
mod components;
mod pages;
mod services;
mod state;
mod utils;

use app::App;
use lib_core::config::widget_config;

const LOADING_ELEMENT_ID: &str = "wallet-loading";

#[wasm_bindgen(start)]
pub fn main() {
    // Set up panic hook for better error messages in WASM
    console_error_panic_hook::set_once();

    // Config first, the log level comes from it
    let config_result = utils::config::load_config();
    let level = log::Level::from_str(&widget_config().log_level).unwrap_or(log::Level::Info);
    wasm_logger::init(wasm_logger::Config::new(level));
    if let Err(err) = config_result {
        log::warn!("Using default widget config: {}", err);
    }
    log::info!("Wallet Connect starting...");

    hide_loading_screen();

    leptos::mount::mount_to_body(|| view! { <App/> });
}

/// Hide the static loading placeholder.
fn hide_loading_screen() {
    let Some(document) = web_sys::window().and_then(|w| w.document()) else {
        log::error!("No document available");
        return;
    };

    let Some(loading_element) = document.get_element_by_id(LOADING_ELEMENT_ID) else {
        log::debug!("Loading element '{}' not found", LOADING_ELEMENT_ID);
        return;
    };

    if let Some(html_element) = loading_element.dyn_ref::<HtmlElement>() {
        if let Err(e) = html_element.class_list().add_1("hidden") {
            log::warn!("Failed to add 'hidden' class: {:?}", e);
        }
    }

    // Also set display:none as backup
    if let Err(e) = loading_element.set_attribute("style", "display: none !important;") {
        log::warn!("Failed to hide loading element: {:?}", e);
    }
}
