//! Neutral full-page placeholder shown while the session settles.

use leptos::prelude::*;

#[component]
pub fn PageLoader() -> impl IntoView {
    view! {
        <div class="page-loader" role="status" aria-live="polite">
            <div class="page-loader__spinner" aria-hidden="true"></div>
            <h2 class="page-loader__label">"LOADING"</h2>
        </div>
    }
}
