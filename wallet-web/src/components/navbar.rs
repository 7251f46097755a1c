//! Navigation Bar Component

use leptos::prelude::*;
use leptos_router::components::A;

#[component]
pub fn Navbar() -> impl IntoView {
    view! {
        <nav>
            <div style="max-width: 1200px; margin: 0 auto; padding: 0 24px; display: flex; justify-content: flex-start; align-items: center;">
                <A href="/" attr:class="nav-link-clean">
                    <span class="nav-title">"Wallet Connect"</span>
                </A>
            </div>
        </nav>
    }
}
