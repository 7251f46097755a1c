//! # Network Label
//!
//! Human-readable name for the provider's current chain.

use lib_utils::parse_chain_id;

use crate::config::WidgetConfig;

pub const UNKNOWN_NETWORK: &str = "Unknown Network";

/// Label shown in the network panel.
///
/// Friendly names come from the configured chain registry and need a
/// provider; everything else falls back to `"Chain ID: <decimal>"`.
pub fn network_label(chain_id: Option<&str>, provider_present: bool, config: &WidgetConfig) -> String {
    let Some(raw) = chain_id else {
        return UNKNOWN_NETWORK.to_string();
    };

    let Ok(id) = parse_chain_id(raw) else {
        tracing::warn!("Unparseable chain id {:?}", raw);
        return format!("Chain ID: {}", raw);
    };

    if provider_present && config.resolve_network_names {
        if let Some(name) = config.chain_name(id) {
            return name.to_string();
        }
    }

    format!("Chain ID: {}", id)
}
