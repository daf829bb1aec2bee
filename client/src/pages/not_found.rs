//! Fallback for unknown routes.

use leptos::prelude::*;

#[component]
pub fn NotFoundPage() -> impl IntoView {
    view! {
        <div class="not-found-page">
            <h1 class="not-found-page__code">"404"</h1>
            <h2>"Lost in Space?"</h2>
            <p>"The page you're looking for doesn't exist or has been moved."</p>
            <a href="/" class="not-found-page__home">"Return Home"</a>
        </div>
    }
}
