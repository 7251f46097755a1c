//! # Formatting Utilities for the Wallet View

/// Balance with its currency symbol (e.g. `"1.5 ETH"`).
pub fn format_balance(balance: &str, currency_symbol: &str) -> String {
    format!("{} {}", balance, currency_symbol)
}

/// Label of the main wallet button.
pub fn wallet_button_label(is_connected: bool) -> &'static str {
    if is_connected {
        "Disconnect Wallet"
    } else {
        "Connect Wallet"
    }
}
