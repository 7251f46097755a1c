//! Card panels used by the wallet view

use leptos::prelude::*;

/// Error banner shown above the rest of the card.
#[component]
pub fn ErrorPanel(message: String) -> impl IntoView {
    view! {
        <div class="panel panel-error" role="alert">
            <p class="panel-title">"Error"</p>
            <p>{message}</p>
        </div>
    }
}

/// Labelled read-only panel.
#[component]
pub fn InfoPanel(label: &'static str, #[prop(optional)] tone: &'static str, children: Children) -> impl IntoView {
    view! {
        <div class=format!("panel panel-info {}", tone)>
            <p class="panel-label">{label}</p>
            {children()}
        </div>
    }
}
