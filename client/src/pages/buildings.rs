//! Building inventory list with a name/address search.
//!
//! Mounted behind `ProtectedRoute`. The list request uses a token from
//! `valid_access_token`; a missing token sends the viewer to the login page,
//! while a failed request stays on the page and shows the error.

use leptos::prelude::*;
#[cfg(feature = "hydrate")]
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_navigate;

use crate::net::types::{Building, filter_buildings};
use crate::state::auth::AuthHandle;

pub const BUILDINGS_PATH: &str = "/features/buildings";

#[component]
pub fn BuildingsPage() -> impl IntoView {
    let auth = expect_context::<AuthHandle>();
    let navigate = use_navigate();
    let buildings = RwSignal::new(None::<Result<Vec<Building>, String>>);
    let search = RwSignal::new(String::new());

    #[cfg(feature = "hydrate")]
    leptos::task::spawn_local(async move {
        let Some(token) = auth.valid_access_token().await else {
            navigate(session::LOGIN_PATH, NavigateOptions { replace: true, ..NavigateOptions::default() });
            return;
        };
        let result = crate::net::api::fetch_buildings(&token).await.map(|body| body.buildings);
        if let Err(e) = &result {
            log::warn!("buildings fetch failed: {e}");
        }
        buildings.set(Some(result));
    });
    #[cfg(not(feature = "hydrate"))]
    let _ = (auth, navigate);

    let rows = move || match buildings.get() {
        None => view! { <p class="buildings-page__status">"Loading buildings..."</p> }.into_any(),
        Some(Err(e)) => view! { <p class="buildings-page__error">{e}</p> }.into_any(),
        Some(Ok(all)) => {
            let term = search.get();
            let shown: Vec<Building> = filter_buildings(&all, &term).into_iter().cloned().collect();
            if shown.is_empty() {
                return view! { <p class="buildings-page__status">"No buildings found."</p> }.into_any();
            }
            view! {
                <ul class="buildings-page__list">
                    {shown
                        .into_iter()
                        .map(|b| {
                            view! {
                                <li class="buildings-page__item">
                                    <span class="buildings-page__name">{b.name}</span>
                                    <span class="buildings-page__address">{b.address}</span>
                                </li>
                            }
                        })
                        .collect_view()}
                </ul>
            }
            .into_any()
        }
    };

    view! {
        <section class="buildings-page">
            <h1 class="buildings-page__title">"Buildings"</h1>
            <input
                class="login-input"
                type="search"
                placeholder="Search by name or address"
                prop:value=move || search.get()
                on:input=move |ev| search.set(event_target_value(&ev))
            />
            {rows}
        </section>
    }
}
