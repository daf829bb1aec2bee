//! Top navigation bar with role-aware links and logout.
//!
//! SYSTEM CONTEXT
//! ==============
//! Hidden entirely while no access token is held. Link visibility follows the
//! role decoded from the access token; the building inventory is limited to
//! super admins and managers.

#[cfg(test)]
#[path = "navbar_test.rs"]
mod navbar_test;

use leptos::prelude::*;
use leptos_router::hooks::use_location;
use session::Role;

use crate::pages::buildings::BUILDINGS_PATH;
use crate::state::auth::{AuthHandle, current_role};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NavLink {
    pub name: &'static str,
    pub href: &'static str,
}

const HOME_HREF: &str = "/";

pub const NAV_LINKS: [NavLink; 2] = [
    NavLink { name: "Buildings", href: BUILDINGS_PATH },
    NavLink { name: "Profile", href: HOME_HREF },
];

/// Links the given role may see.
pub fn visible_links(role: Option<Role>) -> Vec<NavLink> {
    NAV_LINKS
        .into_iter()
        .filter(|link| link.href != BUILDINGS_PATH || role.is_some_and(Role::can_manage_buildings))
        .collect()
}

pub fn is_active(pathname: &str, href: &str) -> bool {
    pathname == href
}

#[component]
pub fn Navbar() -> impl IntoView {
    let auth = expect_context::<AuthHandle>();
    let state = auth.state;
    let pathname = use_location().pathname;
    let menu_open = RwSignal::new(false);

    let link_class = move |href: &'static str, base: &'static str| {
        if is_active(&pathname.get(), href) { format!("{base} {base}--active") } else { base.to_owned() }
    };

    let on_logout = move |_| {
        auth.logout();
        menu_open.set(false);
        #[cfg(feature = "hydrate")]
        {
            if let Some(w) = web_sys::window() {
                let _ = w.location().set_href(session::LOGIN_PATH);
            }
        }
    };

    view! {
        <Show when=move || state.get().access_token.is_some()>
            <header class="navbar">
                <a href=HOME_HREF class="navbar__brand">"BMS"</a>
                <nav class="navbar__links">
                    {move || {
                        visible_links(current_role(&state.get()))
                            .into_iter()
                            .map(|link| {
                                view! {
                                    <a href=link.href class=move || link_class(link.href, "navbar__link")>
                                        {link.name}
                                    </a>
                                }
                            })
                            .collect_view()
                    }}
                    <button class="navbar__logout" on:click=on_logout.clone()>"Logout"</button>
                </nav>
                <button
                    class="navbar__menu-toggle"
                    aria-label="Toggle menu"
                    on:click=move |_| menu_open.update(|open| *open = !*open)
                >
                    {move || if menu_open.get() { "\u{2715}" } else { "\u{2630}" }}
                </button>
                <Show when=move || menu_open.get() clone:on_logout>
                    <div class="navbar__mobile">
                        {move || {
                            visible_links(current_role(&state.get()))
                                .into_iter()
                                .map(|link| {
                                    view! {
                                        <a
                                            href=link.href
                                            class=move || link_class(link.href, "navbar__mobile-link")
                                            on:click=move |_| menu_open.set(false)
                                        >
                                            {link.name}
                                        </a>
                                    }
                                })
                                .collect_view()
                        }}
                        <button class="navbar__logout navbar__logout--wide" on:click=on_logout.clone()>
                            "Logout"
                        </button>
                    </div>
                </Show>
            </header>
        </Show>
    }
}
