//! End-to-end auth flows against an in-process mock of the session API.
//!
//! The mock mirrors the cookie contract the front end depends on: the
//! bootstrap sets a URL-encoded `XSRF-TOKEN` cookie, state-changing requests
//! must echo it in `X-XSRF-TOKEN`, and login sets an HTTP-only session cookie.

use axum::extract::State;
use axum::http::header::SET_COOKIE;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Json, Response};
use axum::routing::{get, post};
use axum::Router;
use axum_extra::extract::cookie::CookieJar;
use serde::Deserialize;
use serde_json::json;
use tokio::net::TcpListener;

use portal::config::ClientConfig;
use portal::net::api::AuthClient;
use portal::net::native::ReqwestTransport;
use portal::net::transport::Transport;
use portal::net::types::Credentials;
use portal::route::AppRoute;
use portal::state::auth::AuthState;
use portal::state::login::LoginState;
use portal::util::cookies;
use portal::util::auth::{CONNECTION_ERROR_MESSAGE, LoginOutcome, SessionCheck, check_session, run_login, sign_out};

const TOKEN: &str = "tok=en/1";
const SESSION: &str = "session-abc";
const SESSION_COOKIE: &str = "laravel_session";

// =============================================================================
// MOCK API
// =============================================================================

#[derive(Clone)]
struct MockApi {
    logout_status: StatusCode,
}

#[derive(Deserialize)]
struct LoginBody {
    email: String,
    password: String,
}

fn xsrf_valid(jar: &CookieJar, headers: &HeaderMap) -> bool {
    let cookie = jar
        .get("XSRF-TOKEN")
        .and_then(|c| urlencoding::decode(c.value()).ok().map(|v| v.into_owned()));
    let header = headers.get("x-xsrf-token").and_then(|v| v.to_str().ok());
    cookie.as_deref() == Some(TOKEN) && header == Some(TOKEN)
}

fn has_session(jar: &CookieJar) -> bool {
    jar.get(SESSION_COOKIE).is_some_and(|c| c.value() == SESSION)
}

fn message(status: StatusCode, text: &str) -> Response {
    (status, Json(json!({ "message": text }))).into_response()
}

fn csrf_mismatch() -> Response {
    message(StatusCode::from_u16(419).unwrap(), "CSRF token mismatch.")
}

async fn csrf_cookie() -> Response {
    let cookie = format!("XSRF-TOKEN={}; Path=/", urlencoding::encode(TOKEN));
    (StatusCode::NO_CONTENT, [(SET_COOKIE, cookie)]).into_response()
}

async fn login(jar: CookieJar, headers: HeaderMap, Json(body): Json<LoginBody>) -> Response {
    if !xsrf_valid(&jar, &headers) {
        return csrf_mismatch();
    }
    if body.email != "test@example.com" || body.password != "password" {
        return message(StatusCode::UNAUTHORIZED, "Invalid credentials");
    }
    let cookie = format!("{SESSION_COOKIE}={SESSION}; Path=/; HttpOnly");
    (StatusCode::OK, [(SET_COOKIE, cookie)], Json(json!({ "two_factor": false }))).into_response()
}

async fn user(jar: CookieJar) -> Response {
    if !has_session(&jar) {
        return message(StatusCode::UNAUTHORIZED, "Unauthenticated.");
    }
    Json(json!({
        "id": 1,
        "name": "Test User",
        "email": "test@example.com",
        "email_verified_at": null
    }))
    .into_response()
}

async fn logout(State(api): State<MockApi>, jar: CookieJar, headers: HeaderMap) -> Response {
    if !xsrf_valid(&jar, &headers) {
        return csrf_mismatch();
    }
    if !api.logout_status.is_success() {
        return message(api.logout_status, "Server Error");
    }
    let cookie = format!("{SESSION_COOKIE}=; Max-Age=0; Path=/");
    (api.logout_status, [(SET_COOKIE, cookie)]).into_response()
}

async fn spawn_api(logout_status: StatusCode) -> String {
    let app = Router::new()
        .route("/sanctum/csrf-cookie", get(csrf_cookie))
        .route("/login", post(login))
        .route("/api/user", get(user))
        .route("/logout", post(logout))
        .with_state(MockApi { logout_status });
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

fn client(base_url: &str) -> AuthClient<ReqwestTransport> {
    let config = ClientConfig::with_base_url(base_url);
    let transport = ReqwestTransport::new(&config).unwrap();
    AuthClient::new(config.shared(), transport)
}

fn dev_credentials() -> Credentials {
    LoginState::default().begin_submit().unwrap()
}

// =============================================================================
// LOGIN
// =============================================================================

#[tokio::test]
async fn login_then_dashboard_renders_identity() {
    let client = client(&spawn_api(StatusCode::NO_CONTENT).await);
    let mut form = LoginState::default();
    let credentials = form.begin_submit().unwrap();

    let outcome = run_login(&client, &credentials).await;
    assert_eq!(outcome, LoginOutcome::Authenticated);
    assert_eq!(form.finish(outcome), Some(AppRoute::Dashboard));

    let mut session = AuthState::loading();
    assert_eq!(session.apply(check_session(&client).await), None);
    let user = session.user.expect("identity record");
    assert_eq!(user.display_name(), "Test User");
    assert!(user.to_pretty_json().contains("email_verified_at"));
}

#[tokio::test]
async fn login_echoes_decoded_token() {
    let client = client(&spawn_api(StatusCode::NO_CONTENT).await);

    client.csrf_cookie().await.unwrap();
    assert_eq!(client.xsrf_token().as_deref(), Some(TOKEN));
}

#[tokio::test]
async fn wrong_password_shows_server_message_and_stays() {
    let client = client(&spawn_api(StatusCode::NO_CONTENT).await);
    let mut form = LoginState { password: "wrong".to_owned(), ..LoginState::default() };
    let credentials = form.begin_submit().unwrap();

    let outcome = run_login(&client, &credentials).await;
    assert_eq!(form.finish(outcome), None);
    assert_eq!(form.error(), Some("Invalid credentials"));
    assert!(!form.is_submitting());
}

// =============================================================================
// SESSION CHECK
// =============================================================================

#[tokio::test]
async fn dashboard_without_session_redirects_to_login() {
    let client = client(&spawn_api(StatusCode::NO_CONTENT).await);

    let mut session = AuthState::loading();
    assert_eq!(session.apply(check_session(&client).await), Some(AppRoute::Login));
}

#[tokio::test]
async fn dashboard_with_unreachable_api_stays_with_connection_error() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    let client = client(&format!("http://{addr}"));

    let check = check_session(&client).await;
    assert_eq!(check, SessionCheck::Unavailable(CONNECTION_ERROR_MESSAGE.to_owned()));

    let mut session = AuthState::loading();
    assert_eq!(session.apply(check), None);
    assert_eq!(session.error.as_deref(), Some(CONNECTION_ERROR_MESSAGE));
}

// =============================================================================
// SIGN-OUT
// =============================================================================

#[tokio::test]
async fn logout_ends_session() {
    let client = client(&spawn_api(StatusCode::NO_CONTENT).await);
    client.login(&dev_credentials()).await.unwrap();

    assert_eq!(sign_out(&client).await, AppRoute::Login);
    assert_eq!(check_session(&client).await, SessionCheck::Unauthenticated);
}

#[tokio::test]
async fn logout_failure_still_redirects_to_login() {
    let client = client(&spawn_api(StatusCode::INTERNAL_SERVER_ERROR).await);
    client.login(&dev_credentials()).await.unwrap();

    assert!(client.logout().await.is_err());
    assert_eq!(sign_out(&client).await, AppRoute::Login);
}

// =============================================================================
// DEBUG COOKIE CLEAR
// =============================================================================

#[tokio::test]
async fn clear_cookies_leaves_nothing_behind() {
    let client = client(&spawn_api(StatusCode::NO_CONTENT).await);
    client.transport().write_cookie("a=1; path=/");
    client.transport().write_cookie("b=2; path=/");
    let mut names = cookies::names(&client.transport().document_cookies().unwrap_or_default());
    names.sort();
    assert_eq!(names, vec!["a".to_owned(), "b".to_owned()]);

    assert_eq!(client.clear_cookies(), 2);
    assert_eq!(client.transport().document_cookies(), None);
}

#[tokio::test]
async fn clear_cookies_keeps_http_only_session() {
    let client = client(&spawn_api(StatusCode::NO_CONTENT).await);
    client.login(&dev_credentials()).await.unwrap();

    let visible = client.transport().document_cookies().unwrap_or_default();
    assert_eq!(cookies::names(&visible), vec!["XSRF-TOKEN".to_owned()]);

    assert_eq!(client.clear_cookies(), 1);
    assert_eq!(client.xsrf_token(), None);
    assert!(matches!(check_session(&client).await, SessionCheck::Authenticated(_)));
}
