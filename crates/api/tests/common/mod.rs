//! Shared helpers for the HTTP integration tests.
//!
//! The router is driven in-process through `tower::ServiceExt::oneshot`,
//! behind the same middleware stack as the binary. Tokens are HS256 and
//! minted here with the shared test secret.

#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{Method, Request, Response};
use axum::Router;
use castlist_core::auth::Claims;
use castlist_core::scopes;
use castlist_db::repositories::TokenStore;
use http_body_util::BodyExt;
use jsonwebtoken::{encode, EncodingKey, Header};
use serde_json::Value;
use sqlx::SqlitePool;
use tower::ServiceExt;

use castlist_api::app::build_app;
use castlist_api::auth::jwt::HmacVerifier;
use castlist_api::config::{AuthConfig, ServerConfig};
use castlist_api::state::AppState;

pub const TEST_SECRET: &str = "castlist-integration-test-secret";

/// Every scope the service knows about.
pub const ALL_SCOPES: &[&str] = &[
    scopes::GET_TALENTS,
    scopes::POST_TALENTS,
    scopes::PATCH_TALENTS,
    scopes::DELETE_TALENTS,
    scopes::GET_WORKS,
    scopes::POST_WORKS,
    scopes::PATCH_WORKS,
    scopes::DELETE_WORKS,
];

/// Build a test `ServerConfig` that verifies tokens with [`TEST_SECRET`].
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        database_url: "sqlite::memory:".to_string(),
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        token_retention_secs: 36_000,
        auth: AuthConfig {
            jwt_secret: Some(TEST_SECRET.to_string()),
            ..AuthConfig::default()
        },
    }
}

/// Build the full application router over `pool` with the default test config.
pub fn build_test_app(pool: SqlitePool) -> Router {
    build_test_app_with(pool, test_config())
}

pub fn build_test_app_with(pool: SqlitePool, config: ServerConfig) -> Router {
    let retention = chrono::Duration::seconds(config.token_retention_secs);
    let state = AppState {
        token_store: Arc::new(TokenStore::new(pool.clone(), retention)),
        pool,
        config: Arc::new(config),
        verifier: Arc::new(HmacVerifier::new(TEST_SECRET, None, None)),
    };
    build_app(state)
}

/// Mint a token granting `permissions`, valid for one hour.
pub fn token_with(permissions: &[&str]) -> String {
    sign_claims(&Claims {
        sub: Some("auth0|integration".into()),
        exp: chrono::Utc::now().timestamp() + 3600,
        permissions: permissions.iter().map(|p| p.to_string()).collect(),
        ..Claims::default()
    })
}

/// A token carrying every scope.
pub fn admin_token() -> String {
    token_with(ALL_SCOPES)
}

pub fn sign_claims(claims: &Claims) -> String {
    encode(
        &Header::default(),
        claims,
        &EncodingKey::from_secret(TEST_SECRET.as_bytes()),
    )
    .unwrap()
}

/// Send a request with an optional bearer token and optional JSON body.
pub async fn send(
    app: Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> Response<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(AUTHORIZATION, format!("Bearer {token}"));
    }
    let body = match body {
        Some(json) => {
            builder = builder.header(CONTENT_TYPE, "application/json");
            Body::from(serde_json::to_vec(&json).unwrap())
        }
        None => Body::empty(),
    };
    app.oneshot(builder.body(body).unwrap()).await.unwrap()
}

pub async fn get(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(app, Method::GET, uri, Some(token), None).await
}

pub async fn post_json(app: Router, uri: &str, token: &str, body: Value) -> Response<Body> {
    send(app, Method::POST, uri, Some(token), Some(body)).await
}

pub async fn patch_json(app: Router, uri: &str, token: &str, body: Value) -> Response<Body> {
    send(app, Method::PATCH, uri, Some(token), Some(body)).await
}

pub async fn put(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(app, Method::PUT, uri, Some(token), None).await
}

pub async fn delete(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(app, Method::DELETE, uri, Some(token), None).await
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// Create a talent through the API and return its id.
pub async fn seed_talent(pool: &SqlitePool, first: &str, second: &str) -> i64 {
    let response = post_json(
        build_test_app(pool.clone()),
        "/talents",
        &admin_token(),
        serde_json::json!({
            "first_name": first,
            "second_name": second,
            "gender": "female",
            "age": 30,
        }),
    )
    .await;
    body_json(response).await["id"].as_i64().unwrap()
}

/// Create a work through the API and return its id.
pub async fn seed_work(pool: &SqlitePool, title: &str, release_date: &str) -> i64 {
    let response = post_json(
        build_test_app(pool.clone()),
        "/works",
        &admin_token(),
        serde_json::json!({ "title": title, "release_date": release_date }),
    )
    .await;
    body_json(response).await["id"].as_i64().unwrap()
}
