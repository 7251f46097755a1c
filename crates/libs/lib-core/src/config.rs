//! # Widget Configuration
//!
//! Display settings for the wallet widget. The browser entrypoint reads an
//! optional JSON document embedded in the page and falls back to
//! [`WidgetConfig::default`] when none is present.
//!
//! ## Global Config Access
//!
//! ```rust
//! use lib_core::config::{init_config, widget_config};
//!
//! init_config(r#"{ "currency_symbol": "ETH" }"#).unwrap();
//! assert_eq!(widget_config().currency_symbol, "ETH");
//! ```
//!
//! Unlike a server, the widget must keep working without configuration, so
//! [`widget_config()`] returns the defaults when [`init_config()`] was never
//! called.

use serde::Deserialize;
use std::collections::HashSet;
use std::sync::OnceLock;

/// Well-known chain used by the network label.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct ChainEntry {
    pub id: u64,
    pub name: String,
}

impl ChainEntry {
    fn new(id: u64, name: &str) -> Self {
        Self {
            id,
            name: name.to_string(),
        }
    }
}

/// Widget configuration.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct WidgetConfig {
    /// Symbol shown after a fetched balance.
    pub currency_symbol: String,

    /// Resolve chain ids to friendly names through [`chains`](Self::chains).
    ///
    /// When disabled the network label is always `"Chain ID: <n>"`.
    pub resolve_network_names: bool,

    /// Chain registry used for network names.
    pub chains: Vec<ChainEntry>,

    /// Browser console log level (`error`, `warn`, `info`, `debug`, `trace`).
    pub log_level: String,
}

impl Default for WidgetConfig {
    fn default() -> Self {
        Self {
            currency_symbol: "ETH".to_string(),
            resolve_network_names: true,
            chains: default_chains(),
            log_level: "info".to_string(),
        }
    }
}

fn default_chains() -> Vec<ChainEntry> {
    vec![
        ChainEntry::new(1, "Ethereum Mainnet"),
        ChainEntry::new(10, "OP Mainnet"),
        ChainEntry::new(56, "BNB Smart Chain"),
        ChainEntry::new(137, "Polygon"),
        ChainEntry::new(8453, "Base"),
        ChainEntry::new(17000, "Holesky"),
        ChainEntry::new(42161, "Arbitrum One"),
        ChainEntry::new(43114, "Avalanche C-Chain"),
        ChainEntry::new(59144, "Linea"),
        ChainEntry::new(11155111, "Sepolia"),
    ]
}

const LOG_LEVELS: &[&str] = &["error", "warn", "info", "debug", "trace"];

impl WidgetConfig {
    /// Parse configuration from JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, String> {
        serde_json::from_str(json).map_err(|e| format!("Invalid widget config: {}", e))
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), String> {
        if self.currency_symbol.trim().is_empty() {
            return Err("currency_symbol cannot be empty".to_string());
        }

        let mut seen = HashSet::new();
        for chain in &self.chains {
            if !seen.insert(chain.id) {
                return Err(format!("Duplicate chain id {} in chains", chain.id));
            }
            if chain.name.trim().is_empty() {
                return Err(format!("Chain {} has an empty name", chain.id));
            }
        }

        if !LOG_LEVELS.contains(&self.log_level.as_str()) {
            return Err(format!(
                "log_level must be one of {}, got {:?}",
                LOG_LEVELS.join(", "),
                self.log_level
            ));
        }

        Ok(())
    }

    /// Friendly name of a chain, if registered.
    pub fn chain_name(&self, id: u64) -> Option<&str> {
        self.chains
            .iter()
            .find(|chain| chain.id == id)
            .map(|chain| chain.name.as_str())
    }
}

/// Global configuration instance (initialized once at startup).
static CONFIG: OnceLock<WidgetConfig> = OnceLock::new();

/// Initialize the global configuration from JSON.
///
/// # Errors
///
/// Returns an error if the JSON is malformed, validation fails, or the config
/// has already been initialized.
pub fn init_config(json: &str) -> Result<(), String> {
    let config = WidgetConfig::from_json(json)?;
    config.validate()?;

    CONFIG
        .set(config)
        .map_err(|_| "Config has already been initialized".to_string())
}

/// Get the global configuration, or the defaults if none was initialized.
pub fn widget_config() -> &'static WidgetConfig {
    CONFIG.get_or_init(WidgetConfig::default)
}
