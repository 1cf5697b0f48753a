use crate::router::{router, API_PREFIX};
use crate::state::State;
use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use axum::Router;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde_json::json;
use std::sync::Arc;
use tower::ServiceExt;
use useradm::jwt::{JwtHandler, JwtHandlerRs256};
use useradm::store::MemoryStore;
use useradm::{Scope, Token, UserAdmConfig};

//--------------------------------------------------------------------------------------------------
// Helpers
//--------------------------------------------------------------------------------------------------

const PRIVATE_KEY: &[u8] = include_bytes!("../../useradm/testdata/private.pem");
const PUBLIC_KEY: &[u8] = include_bytes!("../../useradm/testdata/public.pem");

fn jwt_handler() -> JwtHandlerRs256 {
    JwtHandlerRs256::from_pem(Some(PRIVATE_KEY), Some(PUBLIC_KEY)).unwrap()
}

fn app() -> Router {
    let config = UserAdmConfig {
        issuer: "Mender".to_string(),
        expiration_time: 60,
    };
    let state = State::new(Arc::new(jwt_handler()), Arc::new(MemoryStore::new()), config);
    router(state.into())
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, String) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, String::from_utf8(body.to_vec()).unwrap())
}

fn login(credentials: Option<(&str, &str)>) -> Request<Body> {
    let mut request = Request::post(format!("{API_PREFIX}/auth/login"));
    if let Some((email, password)) = credentials {
        let basic = STANDARD.encode(format!("{email}:{password}"));
        request = request.header(header::AUTHORIZATION, format!("Basic {basic}"));
    }
    request.body(Body::empty()).unwrap()
}

fn create(path: &str, token: Option<&str>, email: &str, password: &str) -> Request<Body> {
    let mut request = Request::post(format!("{API_PREFIX}{path}"))
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(token) = token {
        request = request.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    let body = json!({ "email": email, "password": password }).to_string();
    request.body(Body::from(body)).unwrap()
}

fn decode(signed: &str) -> Token {
    jwt_handler().from_jwt(signed).unwrap()
}

/// Logs in against the empty store and creates the initial user with the bootstrap token.
async fn bootstrapped_app() -> Router {
    let app = app();
    let (status, token) = send(&app, login(None)).await;
    assert_eq!(status, StatusCode::OK);

    let request = create("/users/initial", Some(&token), "admin@bar.com", "secret");
    let (status, _) = send(&app, request).await;
    assert_eq!(status, StatusCode::CREATED);

    app
}

//--------------------------------------------------------------------------------------------------
// Login
//--------------------------------------------------------------------------------------------------

#[tokio::test]
async fn login_on_empty_store_returns_initial_token() {
    let app = app();

    let response = app.clone().oneshot(login(None)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get(header::CONTENT_TYPE).unwrap(),
        "application/jwt"
    );

    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let token = decode(std::str::from_utf8(&body).unwrap());
    assert_eq!(token.claims.scope(), Scope::InitialUserCreate);
    assert_eq!(token.claims.subject, "initial");
    assert_eq!(token.claims.issuer, "Mender");
}

#[tokio::test]
async fn login_with_credentials_after_bootstrap() {
    let app = bootstrapped_app().await;

    let (status, token) = send(&app, login(Some(("admin@bar.com", "secret")))).await;
    assert_eq!(status, StatusCode::OK);

    let token = decode(&token);
    assert_eq!(token.claims.scope(), Scope::All);
    assert_eq!(token.claims.issuer, "Mender");
    assert_ne!(token.claims.subject, "initial");
    assert!(!token.claims.id.is_empty());
}

#[tokio::test]
async fn login_is_refused_after_bootstrap() {
    let app = bootstrapped_app().await;

    for credentials in [
        None,
        Some(("admin@bar.com", "wrong")),
        Some(("nobody@bar.com", "secret")),
    ] {
        let (status, _) = send(&app, login(credentials)).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED, "{credentials:?}");
    }
}

//--------------------------------------------------------------------------------------------------
// Users
//--------------------------------------------------------------------------------------------------

#[tokio::test]
async fn initial_user_needs_a_token() {
    let app = app();

    let (status, _) = send(&app, create("/users/initial", None, "a@b.com", "pw")).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let request = create("/users/initial", Some("not-a-token"), "a@b.com", "pw");
    let (status, _) = send(&app, request).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn initial_token_cannot_create_regular_users() {
    let app = app();
    let (_, token) = send(&app, login(None)).await;

    let (status, body) = send(&app, create("/users", Some(&token), "a@b.com", "pw")).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert!(body.contains("forbidden"));
}

#[tokio::test]
async fn initial_user_is_created_once() {
    let app = app();
    let (_, token) = send(&app, login(None)).await;

    let (status, _) = send(&app, create("/users/initial", Some(&token), "a@b.com", "pw")).await;
    assert_eq!(status, StatusCode::CREATED);

    // The token is still valid, but the window has closed
    let (status, body) = send(&app, create("/users/initial", Some(&token), "c@d.com", "pw")).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert!(body.contains("user_not_initial"));
}

#[tokio::test]
async fn full_token_creates_users() {
    let app = bootstrapped_app().await;
    let (_, token) = send(&app, login(Some(("admin@bar.com", "secret")))).await;

    let (status, _) = send(&app, create("/users", Some(&token), "a@b.com", "pw")).await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = send(&app, create("/users", Some(&token), "a@b.com", "pw2")).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body.contains("duplicate_email"));

    let (status, _) = send(&app, login(Some(("a@b.com", "pw")))).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn bearer_scheme_is_matched_case_insensitively() {
    let app = app();
    let (_, token) = send(&app, login(None)).await;

    let body = json!({ "email": "a@b.com", "password": "pw" }).to_string();
    let request = Request::post(format!("{API_PREFIX}/users/initial"))
        .header(header::CONTENT_TYPE, "application/json")
        .header(header::AUTHORIZATION, format!("bearer {token}"))
        .body(Body::from(body))
        .unwrap();
    let (status, _) = send(&app, request).await;
    assert_eq!(status, StatusCode::CREATED);
}

#[tokio::test]
async fn empty_email_is_rejected() {
    let app = app();
    let (_, token) = send(&app, login(None)).await;

    let (status, body) = send(&app, create("/users/initial", Some(&token), "", "pw")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body.contains("invalid_request"));
}

//--------------------------------------------------------------------------------------------------
