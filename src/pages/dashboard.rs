//! Dashboard page showing the signed-in user's identity record.
//!
//! SYSTEM CONTEXT
//! ==============
//! This is the authenticated landing route. It issues one identity query per
//! mount; a 401 sends the user back to `/login`, other failures keep the page
//! and show a connection error.

use leptos::prelude::*;
#[cfg(feature = "hydrate")]
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_navigate;

use crate::app::PortalClient;
use crate::state::auth::AuthState;

/// Dashboard page: greeting, sign-out button and the raw identity record.
#[component]
pub fn DashboardPage() -> impl IntoView {
    let client = expect_context::<PortalClient>();
    let session = RwSignal::new(AuthState::loading());
    let navigate = use_navigate();

    #[cfg(feature = "hydrate")]
    {
        let client = client.clone();
        let navigate = navigate.clone();
        leptos::task::spawn_local(async move {
            let check = crate::util::auth::check_session(&client).await;
            // Dropped if the page unmounted while the request was in flight.
            if let Some(route) = session.try_update(|s| s.apply(check)).flatten() {
                navigate(route.path(), NavigateOptions::default());
            }
        });
    }

    let on_logout = move |_| {
        #[cfg(feature = "hydrate")]
        {
            let client = client.clone();
            let navigate = navigate.clone();
            leptos::task::spawn_local(async move {
                let route = crate::util::auth::sign_out(&client).await;
                navigate(route.path(), NavigateOptions::default());
            });
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (&client, &navigate);
        }
    };

    let greeting = move || {
        session.with(|s| {
            let name = s.user.as_ref().map(|u| u.display_name()).unwrap_or_default();
            format!("Welcome, {name}!")
        })
    };
    let record = move || session.with(|s| s.user.as_ref().map(|u| u.to_pretty_json()).unwrap_or_default());

    view! {
        <Show
            when=move || session.with(AuthState::is_signed_in)
            fallback=move || {
                view! {
                    <div class="dashboard-page dashboard-page--status">
                        {move || {
                            session
                                .with(|s| match &s.error {
                                    Some(message) => {
                                        view! { <p class="dashboard-page__error">{message.clone()}</p> }
                                            .into_any()
                                    }
                                    None => view! { <p>"Loading..."</p> }.into_any(),
                                })
                        }}
                    </div>
                }
            }
        >
            <div class="dashboard-page">
                <header class="dashboard-page__header">
                    <h1>"Dashboard"</h1>
                    <button class="btn btn--danger" on:click=on_logout.clone()>
                        "Sign out"
                    </button>
                </header>
                <main class="dashboard-page__body">
                    <h2>{greeting}</h2>
                    <p>
                        "This page is protected. You are signed in through an HTTP-only session cookie."
                    </p>
                    <pre class="dashboard-page__record">{record}</pre>
                </main>
            </div>
        </Show>
    }
}
