//! Widget configuration embedded in the page
//!
//! ```html
//! <script id="wallet-config" type="application/json">
//!   { "currency_symbol": "ETH", "log_level": "debug" }
//! </script>
//! ```

use lib_core::config::init_config;

pub const CONFIG_ELEMENT_ID: &str = "wallet-config";

/// Initialize the global widget config from the page, if it embeds one.
///
/// Without an embedded config the defaults apply and this returns `Ok`.
pub fn load_config() -> Result<(), String> {
    match embedded_config() {
        Some(json) => init_config(&json),
        None => Ok(()),
    }
}

fn embedded_config() -> Option<String> {
    let document = web_sys::window()?.document()?;
    let element = document.get_element_by_id(CONFIG_ELEMENT_ID)?;
    element.text_content().filter(|text| !text.trim().is_empty())
}
