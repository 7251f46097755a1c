//! Wallet Connect App - Leptos Frontend

use leptos::prelude::*;
use leptos_router::{
    components::{A, Route, Router, Routes},
    path,
};

use crate::components::Navbar;
use crate::pages::WalletConnectPage;
use crate::state::wallet::provide_wallet_context;

#[component]
pub fn App() -> impl IntoView {
    provide_wallet_context();

    view! {
        <Router>
            <div class="app-container">
                <Navbar/>
                <Routes fallback=|| view! { <NotFound/> }>
                    <Route path=path!("/") view=WalletConnectPage/>
                </Routes>
            </div>
        </Router>
    }
}

#[component]
fn NotFound() -> impl IntoView {
    view! {
        <div class="wallet-page">
            <div class="wallet-card" style="text-align: center;">
                <h1 class="wallet-title">"404 - Page Not Found"</h1>
                <p class="wallet-empty">"The page you're looking for doesn't exist."</p>
                <A href="/">
                    <span class="btn btn-primary" style="margin-top: 20px; display: inline-block;">
                        "Go to Wallet"
                    </span>
                </A>
            </div>
        </div>
    }
}
