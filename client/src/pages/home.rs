//! Signed-in landing page showing the current user's profile.
//!
//! Mounted only behind `ProtectedRoute`, so a token is held on entry. The
//! profile request goes through `valid_access_token` so an expired token is
//! refreshed first; any failure sends the viewer back to the login page.

use leptos::prelude::*;
#[cfg(feature = "hydrate")]
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_navigate;

use crate::net::types::ProfileField;
use crate::state::auth::AuthHandle;

#[component]
pub fn HomePage() -> impl IntoView {
    let auth = expect_context::<AuthHandle>();
    let navigate = use_navigate();
    let profile = RwSignal::new(None::<Vec<ProfileField>>);

    #[cfg(feature = "hydrate")]
    leptos::task::spawn_local(async move {
        let leave = || navigate(session::LOGIN_PATH, NavigateOptions { replace: true, ..NavigateOptions::default() });
        let Some(token) = auth.valid_access_token().await else {
            leave();
            return;
        };
        match crate::net::api::fetch_me(&token).await {
            Ok(me) => profile.set(Some(crate::net::types::profile_fields(&me))),
            Err(e) => {
                log::warn!("profile fetch failed: {e}");
                leave();
            }
        }
    });
    #[cfg(not(feature = "hydrate"))]
    let _ = (auth, navigate);

    view! {
        <section class="home-page">
            <h1 class="home-page__title">"Your profile"</h1>
            <Show
                when=move || profile.get().is_some()
                fallback=|| view! { <p class="home-page__status">"Loading profile..."</p> }
            >
                <dl class="home-page__fields">
                    {move || {
                        profile
                            .get()
                            .unwrap_or_default()
                            .into_iter()
                            .map(|field| {
                                view! {
                                    <dt>{field.label}</dt>
                                    <dd>{field.value}</dd>
                                }
                            })
                            .collect_view()
                    }}
                </dl>
            </Show>
        </section>
    }
}
