//! Account registration page.

#[cfg(test)]
#[path = "register_test.rs"]
mod register_test;

use leptos::prelude::*;
#[cfg(feature = "hydrate")]
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_navigate;
use session::{LOGIN_PATH, Role};

pub const MIN_PASSWORD_LEN: usize = 8;

/// Validated registration form values.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Registration {
    pub email: String,
    pub password: String,
    pub role: Role,
}

/// Check the form before it is sent.
pub fn validate_register_input(email: &str, password: &str, role: &str) -> Result<Registration, &'static str> {
    let email = email.trim();
    if email.is_empty() {
        return Err("Enter an email address.");
    }
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err("Password must be at least 8 characters.");
    }
    let role = role.parse::<Role>().map_err(|_| "Choose a role.")?;
    Ok(Registration { email: email.to_owned(), password: password.to_owned(), role })
}

#[component]
pub fn RegisterPage() -> impl IntoView {
    let navigate = use_navigate();
    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let role = RwSignal::new(Role::Resident.as_str().to_owned());
    let error = RwSignal::new(String::new());
    let busy = RwSignal::new(false);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get() {
            return;
        }
        let form = match validate_register_input(&email.get(), &password.get(), &role.get()) {
            Ok(form) => form,
            Err(msg) => {
                error.set(msg.to_owned());
                return;
            }
        };
        busy.set(true);
        error.set(String::new());

        #[cfg(feature = "hydrate")]
        {
            let navigate = navigate.clone();
            leptos::task::spawn_local(async move {
                let result = crate::net::api::register(&form.email, &form.password, form.role).await;
                busy.set(false);
                match result {
                    Ok(()) => navigate(LOGIN_PATH, NavigateOptions::default()),
                    Err(e) => {
                        log::warn!("registration failed: {e}");
                        error.set(e);
                    }
                }
            });
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (&navigate, form);
        }
    };

    view! {
        <div class="login-page">
            <div class="login-card">
                <h1>"Create Account"</h1>
                <p class="login-card__subtitle">"Register to access the platform"</p>
                <Show when=move || !error.get().is_empty()>
                    <p class="login-message login-message--error">{move || error.get()}</p>
                </Show>
                <form class="login-form" on:submit=on_submit>
                    <label class="login-label">"Email"</label>
                    <input
                        class="login-input"
                        type="email"
                        name="email"
                        required
                        placeholder="user@example.com"
                        prop:value=move || email.get()
                        on:input=move |ev| email.set(event_target_value(&ev))
                    />
                    <label class="login-label">"Password"</label>
                    <input
                        class="login-input"
                        type="password"
                        name="password"
                        required
                        minlength=MIN_PASSWORD_LEN.to_string()
                        prop:value=move || password.get()
                        on:input=move |ev| password.set(event_target_value(&ev))
                    />
                    <label class="login-label">"Role"</label>
                    <select
                        class="login-input"
                        name="role"
                        prop:value=move || role.get()
                        on:change=move |ev| role.set(event_target_value(&ev))
                    >
                        {Role::ALL
                            .into_iter()
                            .map(|r| view! { <option value=r.as_str()>{r.label()}</option> })
                            .collect_view()}
                    </select>
                    <button class="login-button" type="submit" disabled=move || busy.get()>
                        {move || if busy.get() { "Loading" } else { "Register" }}
                    </button>
                </form>
                <p class="login-card__footer">
                    "Already have an account? "
                    <a href=LOGIN_PATH>"Login"</a>
                </p>
            </div>
        </div>
    }
}
