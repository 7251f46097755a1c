//! # Connection State
//!
//! Plain data mirrored from the provider. The transition methods here keep
//! the invariants (chain-scoped balance, address input seeding, error vs.
//! result exclusivity); [`ConnectionManager`](super::ConnectionManager) only
//! decides which transition to apply.

use crate::error::WalletError;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConnectionState {
    /// Currently authorized account.
    pub account: Option<String>,
    /// Hex chain id reported by the provider.
    pub chain_id: Option<String>,
    /// Last failure, cleared by the next successful operation.
    pub error: Option<WalletError>,
    /// Address field of the balance form.
    pub address_input: String,
    /// Last fetched balance in ether, as a decimal string.
    pub balance: Option<String>,
}

impl ConnectionState {
    pub fn is_connected(&self) -> bool {
        self.account.is_some()
    }

    pub fn error_message(&self) -> Option<String> {
        self.error.as_ref().map(|e| e.to_string())
    }

    /// Replace the account, seeding the address input when a new account
    /// appears.
    pub fn set_account(&mut self, account: Option<String>) {
        if let Some(new) = &account {
            if self.account.as_ref() != Some(new) {
                self.address_input = new.clone();
            }
        }
        self.account = account;
    }

    /// Replace the chain id. A different chain invalidates the balance.
    pub fn set_chain_id(&mut self, chain_id: Option<String>) {
        if self.chain_id != chain_id {
            self.balance = None;
        }
        self.chain_id = chain_id;
    }

    /// Result of a successful connect handshake.
    pub fn apply_connected(&mut self, account: Option<String>, chain_id: String) {
        self.set_account(account);
        self.set_chain_id(Some(chain_id));
        self.error = None;
    }

    /// `accountsChanged`: first entry becomes the account, an empty list
    /// means access was revoked.
    pub fn apply_accounts_changed(&mut self, accounts: &[String]) {
        match accounts.first() {
            Some(first) => {
                self.set_account(Some(first.clone()));
                self.error = None;
            }
            None => {
                self.set_account(None);
                self.error = Some(WalletError::AccountRevoked);
            }
        }
    }

    /// `chainChanged`: always drops the balance.
    pub fn apply_chain_changed(&mut self, chain_id: String) {
        self.chain_id = Some(chain_id);
        self.balance = None;
    }

    pub fn set_balance(&mut self, balance: String) {
        self.balance = Some(balance);
        self.error = None;
    }

    pub fn fail(&mut self, error: WalletError) {
        self.error = Some(error);
    }

    /// Record a failed balance lookup; a stale balance is never shown next to
    /// the error.
    pub fn fail_balance(&mut self, error: WalletError) {
        self.error = Some(error);
        self.balance = None;
    }

    /// Local disconnect. The address input is left as typed.
    pub fn reset(&mut self) {
        self.account = None;
        self.chain_id = None;
        self.error = None;
        self.balance = None;
    }
}
