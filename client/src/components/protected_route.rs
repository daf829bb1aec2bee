//! Route guard component.
//!
//! Renders the page loader until the session settles, replaces the route with
//! `/login` when it settles anonymous, and only then mounts its children.

use leptos::prelude::*;
use leptos_router::hooks::use_navigate;
use session::{GuardDecision, guard};

use crate::components::page_loader::PageLoader;
use crate::state::auth::AuthHandle;
use crate::util::auth::install_unauth_redirect;

#[component]
pub fn ProtectedRoute(children: ChildrenFn) -> impl IntoView {
    let auth = expect_context::<AuthHandle>();
    install_unauth_redirect(auth.state, use_navigate());

    move || match guard(&auth.state.get()) {
        GuardDecision::Pending => view! { <PageLoader/> }.into_any(),
        GuardDecision::Redirect(_) => ().into_any(),
        GuardDecision::Render => children().into_any(),
    }
}
