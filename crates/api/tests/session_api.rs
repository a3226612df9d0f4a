//! Integration tests for `/session-token`.

mod common;

use axum::http::{Method, StatusCode};
use castlist_core::scopes;
use common::{body_json, get, send, token_with};
use sqlx::SqlitePool;

#[sqlx::test(migrations = "../../db/migrations")]
async fn stored_token_is_read_back(pool: SqlitePool) {
    let app = common::build_test_app(pool.clone());
    let response = send(app, Method::POST, "/session-token?token=abc.def.ghi", None, None).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json, serde_json::json!({"success": true}));

    let app = common::build_test_app(pool);
    let response = get(app, "/session-token", &token_with(&[scopes::GET_TALENTS])).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["success"], true);
    assert_eq!(json["token"], "abc.def.ghi");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn last_write_wins(pool: SqlitePool) {
    for token in ["first", "second"] {
        let app = common::build_test_app(pool.clone());
        send(app, Method::POST, &format!("/session-token?token={token}"), None, None).await;
    }

    let app = common::build_test_app(pool.clone());
    let json = body_json(get(app, "/session-token", &token_with(&[scopes::GET_TALENTS])).await).await;
    assert_eq!(json["token"], "second");

    let rows: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM session_tokens")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(rows, 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn missing_or_empty_token_is_422(pool: SqlitePool) {
    for uri in ["/session-token", "/session-token?token="] {
        let app = common::build_test_app(pool.clone());
        let response = send(app, Method::POST, uri, None, None).await;
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY, "{uri}");
    }
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn nothing_stored_is_403(pool: SqlitePool) {
    let app = common::build_test_app(pool);
    let response = get(app, "/session-token", &token_with(&[scopes::GET_TALENTS])).await;

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    let json = body_json(response).await;
    assert_eq!(json["success"], false);
    assert_eq!(json["message"], "forbidden");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn expired_token_is_not_returned(pool: SqlitePool) {
    let stale = chrono::Utc::now() - chrono::Duration::hours(11);
    sqlx::query("INSERT INTO session_tokens (token, stored_at) VALUES (?1, ?2)")
        .bind("stale")
        .bind(stale)
        .execute(&pool)
        .await
        .unwrap();

    let app = common::build_test_app(pool);
    let response = get(app, "/session-token", &token_with(&[scopes::GET_TALENTS])).await;

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn reading_requires_talent_read_scope(pool: SqlitePool) {
    let app = common::build_test_app(pool);
    let response = get(app, "/session-token", &token_with(&[scopes::GET_WORKS])).await;

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    let json = body_json(response).await;
    assert_eq!(json["message"]["code"], "forbidden_access");
}
