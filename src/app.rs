//! Root application component with routing and context providers.

use leptos::prelude::*;
use leptos_meta::{MetaTags, Stylesheet, Title, provide_meta_context};
use leptos_router::{
    StaticSegment,
    components::{Redirect, Route, Router, Routes},
};

use crate::config::ClientConfig;
use crate::net::api::AuthClient;
use crate::net::browser::BrowserTransport;
use crate::pages::{dashboard::DashboardPage, login::LoginPage};

/// The auth client every page talks through.
pub type PortalClient = AuthClient<BrowserTransport>;

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
/// Builds the one [`PortalClient`] for the app's lifetime and provides it to
/// every route.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let client = PortalClient::new(ClientConfig::from_build_env().shared(), BrowserTransport);
    provide_context(client);

    view! {
        <Stylesheet id="leptos" href="/pkg/portal.css"/>
        <Title text="Portal"/>

        <Router>
            <Routes fallback=|| "Page not found.".into_view()>
                <Route path=StaticSegment("login") view=LoginPage/>
                <Route path=StaticSegment("dashboard") view=DashboardPage/>
                <Route path=StaticSegment("") view=|| view! { <Redirect path="/login"/> }/>
            </Routes>
        </Router>
    }
}
