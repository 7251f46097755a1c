//! Wallet Connect Page
//!
//! Error banner, then either the "no wallet" placeholder or the connected
//! account, network, balance form and balance, then the connect/disconnect
//! button.

use leptos::prelude::*;

use lib_core::config::widget_config;
use lib_core::wallet::network_label;

use crate::components::{ErrorPanel, InfoPanel};
use crate::state::wallet::use_wallet_context;
use crate::utils::format::{format_balance, wallet_button_label};

#[component]
pub fn WalletConnectPage() -> impl IntoView {
    let wallet = use_wallet_context();
    let config = widget_config();

    // Recomputed only when the chain id itself changes
    let chain_id = Memo::new(move |_| wallet.chain_id());
    let network = Memo::new(move |_| {
        chain_id.with(|chain_id| network_label(chain_id.as_deref(), wallet.has_provider(), config))
    });

    let on_main_button = move |_| {
        if wallet.is_connected() {
            wallet.disconnect();
        } else {
            wallet.connect();
        }
    };

    view! {
        <div class="wallet-page">
            <div class="wallet-card">
                <h2 class="wallet-title">"Wallet Connect"</h2>

                {move || wallet.error_message().map(|message| view! { <ErrorPanel message=message/> })}

                <div class="wallet-body">
                    <Show
                        when=move || wallet.is_connected()
                        fallback=|| view! { <p class="wallet-empty">"No wallet connected"</p> }
                    >
                        <InfoPanel label="Connected Account" tone="panel-account">
                            <p class="mono">{move || wallet.account().unwrap_or_default()}</p>
                        </InfoPanel>

                        <InfoPanel label="Network" tone="panel-network">
                            <p class="strong">{move || network.get()}</p>
                        </InfoPanel>

                        <BalanceForm/>

                        {move || wallet.balance().map(|balance| view! {
                            <InfoPanel label="Balance" tone="panel-balance">
                                <p class="strong">{format_balance(&balance, &config.currency_symbol)}</p>
                            </InfoPanel>
                        })}
                    </Show>
                </div>

                <button
                    class=move || if wallet.is_connected() { "btn btn-wide btn-danger" } else { "btn btn-wide btn-primary" }
                    on:click=on_main_button
                >
                    {move || wallet_button_label(wallet.is_connected())}
                </button>
            </div>
        </div>
    }
}

/// Address field and "Check" button.
#[component]
fn BalanceForm() -> impl IntoView {
    let wallet = use_wallet_context();

    view! {
        <div class="balance-form">
            <label for="address" class="form-label">"Check Balance"</label>
            <div class="form-row">
                <input
                    type="text"
                    id="address"
                    class="form-input"
                    placeholder="Enter Ethereum address"
                    prop:value=move || wallet.address_input()
                    on:input=move |ev| wallet.set_address_input(event_target_value(&ev))
                />
                <button class="btn btn-primary" on:click=move |_| wallet.check_balance()>
                    "Check"
                </button>
            </div>
        </div>
    }
}
