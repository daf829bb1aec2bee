//! Root application component with routing and context providers.

use leptos::prelude::*;
use leptos_meta::{MetaTags, Stylesheet, Title, provide_meta_context};
use leptos_router::{
    StaticSegment,
    components::{Route, Router, Routes},
};

use crate::components::navbar::Navbar;
use crate::components::protected_route::ProtectedRoute;
use crate::pages::{
    buildings::{BUILDINGS_PATH, BuildingsPage},
    home::HomePage,
    login::LoginPage,
    not_found::NotFoundPage,
    register::RegisterPage,
};
use crate::state::auth::AuthHandle;

/// Paths matched by the router below; anything else renders `NotFoundPage`.
pub const ROUTED_PATHS: [&str; 4] = ["/", "/login", "/register", BUILDINGS_PATH];

/// HTML shell rendered on the server for SSR + hydration.
pub fn shell(options: LeptosOptions) -> impl IntoView {
    view! {
        <!DOCTYPE html>
        <html lang="en">
            <head>
                <meta charset="utf-8"/>
                <meta name="viewport" content="width=device-width, initial-scale=1"/>
                <AutoReload options=options.clone()/>
                <HydrationScripts options/>
                <MetaTags/>
            </head>
            <body>
                <App/>
            </body>
        </html>
    }
}

/// Root application component.
///
/// Owns the single session manager for the page lifetime, exposes it to
/// every route through context, and kicks off the restore from storage.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let auth = AuthHandle::new();
    provide_context(auth.clone());
    auth.start();

    view! {
        <Stylesheet id="leptos" href="/pkg/bms-console.css"/>
        <Title text="BMS Console"/>

        <Router>
            <Navbar/>
            <main>
                <Routes fallback=|| view! { <NotFoundPage/> }>
                    <Route path=StaticSegment("login") view=LoginPage/>
                    <Route path=StaticSegment("register") view=RegisterPage/>
                    <Route
                        path=StaticSegment("")
                        view=|| view! { <ProtectedRoute><HomePage/></ProtectedRoute> }
                    />
                    <Route
                        path=(StaticSegment("features"), StaticSegment("buildings"))
                        view=|| view! { <ProtectedRoute><BuildingsPage/></ProtectedRoute> }
                    />
                </Routes>
            </main>
        </Router>
    }
}
