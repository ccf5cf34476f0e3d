//! Login page: email + password against the session-cookie API.

use leptos::prelude::*;
#[cfg(feature = "hydrate")]
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_navigate;

use crate::app::PortalClient;
use crate::state::login::{DEV_EMAIL, DEV_PASSWORD, LoginState};

#[component]
pub fn LoginPage() -> impl IntoView {
    let client = expect_context::<PortalClient>();
    let form = RwSignal::new(LoginState::default());
    let navigate = use_navigate();

    let submit_client = client.clone();
    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let Some(credentials) = form.try_update(LoginState::begin_submit).flatten() else {
            return;
        };

        #[cfg(feature = "hydrate")]
        {
            let client = submit_client.clone();
            let navigate = navigate.clone();
            leptos::task::spawn_local(async move {
                let outcome = crate::util::auth::run_login(&client, &credentials).await;
                // Dropped if the page unmounted while the request was in flight.
                if let Some(route) = form.try_update(|f| f.finish(outcome)).flatten() {
                    navigate(route.path(), NavigateOptions::default());
                }
            });
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (&submit_client, &navigate, credentials);
        }
    };

    let on_clear_cookies = move |_| {
        let cleared = client.clear_cookies();
        log::debug!("debug action cleared {cleared} cookie(s)");
        #[cfg(feature = "hydrate")]
        {
            if let Some(window) = web_sys::window() {
                let _ = window.alert_with_message("Cookies cleared");
            }
        }
    };

    view! {
        <div class="login-page">
            <div class="login-card">
                <h1>"Sign in"</h1>
                <p class="login-card__subtitle">
                    {format!("User: {DEV_EMAIL} / Password: {DEV_PASSWORD}")}
                </p>
                <button class="login-debug" type="button" on:click=on_clear_cookies>
                    "Clear cookies (debug)"
                </button>
                <form class="login-form" on:submit=on_submit>
                    <input
                        id="email"
                        name="email"
                        class="login-input"
                        type="email"
                        required
                        placeholder=DEV_EMAIL
                        prop:value=move || form.with(|f| f.email.clone())
                        on:input=move |ev| form.update(|f| f.email = event_target_value(&ev))
                    />
                    <input
                        id="password"
                        name="password"
                        class="login-input"
                        type="password"
                        required
                        placeholder=DEV_PASSWORD
                        prop:value=move || form.with(|f| f.password.clone())
                        on:input=move |ev| form.update(|f| f.password = event_target_value(&ev))
                    />
                    <Show when=move || form.with(|f| f.error().is_some())>
                        <p class="login-message login-message--error">
                            {move || form.with(|f| f.error().unwrap_or_default().to_owned())}
                        </p>
                    </Show>
                    <button
                        class="login-button"
                        type="submit"
                        disabled=move || form.with(LoginState::is_submitting)
                    >
                        {move || form.with(LoginState::submit_label)}
                    </button>
                </form>
            </div>
        </div>
    }
}
