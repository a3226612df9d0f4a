//! HTTP-level integration tests for the `/works` endpoints and cast links.

mod common;

use axum::http::StatusCode;
use castlist_core::scopes;
use common::{admin_token, body_json, delete, get, patch_json, post_json, put, token_with};
use serde_json::json;
use sqlx::SqlitePool;

#[sqlx::test(migrations = "../../db/migrations")]
async fn create_work_returns_201(pool: SqlitePool) {
    let app = common::build_test_app(pool);
    let response = post_json(
        app,
        "/works",
        &token_with(&[scopes::POST_WORKS]),
        json!({"title": "the godfather", "release_date": "1972-03-24"}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["success"], true);
    assert_eq!(json["title"], "The Godfather");
    assert_eq!(json["release_date"], "1972-03-24");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn duplicate_title_is_422(pool: SqlitePool) {
    common::seed_work(&pool, "Heat", "1995-12-15").await;

    let app = common::build_test_app(pool);
    let response = post_json(
        app,
        "/works",
        &admin_token(),
        json!({"title": "HEAT", "release_date": "2001-01-01"}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let json = body_json(response).await;
    assert_eq!(json["message"], "unprocessable");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn unparsable_date_is_422(pool: SqlitePool) {
    let app = common::build_test_app(pool);
    let response = post_json(
        app,
        "/works",
        &admin_token(),
        json!({"title": "Heat", "release_date": "15/12/1995"}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn malformed_json_is_422(pool: SqlitePool) {
    let app = common::build_test_app(pool);
    let request = axum::http::Request::builder()
        .method(axum::http::Method::POST)
        .uri("/works")
        .header("authorization", format!("Bearer {}", admin_token()))
        .header("content-type", "application/json")
        .body(axum::body::Body::from("{\"title\": "))
        .unwrap();
    let response = tower::ServiceExt::oneshot(app, request).await.unwrap();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn list_works_returns_full_records(pool: SqlitePool) {
    common::seed_work(&pool, "heat", "1995-12-15").await;
    common::seed_work(&pool, "ronin", "1998-09-25").await;

    let app = common::build_test_app(pool);
    let response = get(app, "/works?page=1", &admin_token()).await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["total_works"], 2);
    assert_eq!(json["works"][0]["title"], "Heat");
    assert_eq!(json["works"][1]["title"], "Ronin");
    assert_eq!(json["works"][1]["release_date"], "1998-09-25");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn page_past_end_is_404(pool: SqlitePool) {
    for i in 0..5 {
        common::seed_work(&pool, &format!("film {i}"), "2000-01-01").await;
    }

    let app = common::build_test_app(pool);
    let response = get(app, "/works?page=2", &admin_token()).await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn work_detail_lists_cast_by_full_name(pool: SqlitePool) {
    let work = common::seed_work(&pool, "heat", "1995-12-15").await;
    let al = common::seed_talent(&pool, "al", "pacino").await;
    let bob = common::seed_talent(&pool, "robert", "de niro").await;
    for talent in [al, bob] {
        let app = common::build_test_app(pool.clone());
        put(app, &format!("/works/{work}/talents/{talent}"), &admin_token()).await;
    }

    let app = common::build_test_app(pool);
    let response = get(app, &format!("/works/{work}"), &admin_token()).await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["work_details"]["title"], "Heat");
    assert_eq!(json["talent_count"], 2);
    assert_eq!(json["talents"][0]["talent_id"], al);
    assert_eq!(json["talents"][0]["talent_name"], "Al Pacino");
    assert_eq!(json["talents"][1]["talent_name"], "Robert De Niro");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn get_missing_work_is_404(pool: SqlitePool) {
    let app = common::build_test_app(pool);
    let response = get(app, "/works/42", &admin_token()).await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn patch_release_date_keeps_title(pool: SqlitePool) {
    let id = common::seed_work(&pool, "heat", "1995-12-15").await;

    let app = common::build_test_app(pool);
    let response = patch_json(
        app,
        &format!("/works/{id}"),
        &admin_token(),
        json!({"release_date": "1995-12-08"}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["title"], "Heat");
    assert_eq!(json["release_date"], "1995-12-08");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn patch_with_bad_date_is_422_and_leaves_row(pool: SqlitePool) {
    let id = common::seed_work(&pool, "heat", "1995-12-15").await;

    let app = common::build_test_app(pool.clone());
    let response = patch_json(
        app,
        &format!("/works/{id}"),
        &admin_token(),
        json!({"title": "heat 2", "release_date": "soon"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let app = common::build_test_app(pool);
    let json = body_json(get(app, &format!("/works/{id}"), &admin_token()).await).await;
    assert_eq!(json["work_details"]["title"], "Heat");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn patch_missing_work_is_422(pool: SqlitePool) {
    let app = common::build_test_app(pool);
    let response = patch_json(app, "/works/42", &admin_token(), json!({"title": "x"})).await;

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn delete_work_returns_snapshot(pool: SqlitePool) {
    let id = common::seed_work(&pool, "heat", "1995-12-15").await;

    let app = common::build_test_app(pool.clone());
    let response = delete(app, &format!("/works/{id}"), &token_with(&[scopes::DELETE_WORKS])).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["id"], id);
    assert_eq!(json["title"], "Heat");

    let app = common::build_test_app(pool);
    let response = delete(app, &format!("/works/{id}"), &admin_token()).await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn link_is_idempotent(pool: SqlitePool) {
    let work = common::seed_work(&pool, "heat", "1995-12-15").await;
    let talent = common::seed_talent(&pool, "al", "pacino").await;

    for _ in 0..2 {
        let app = common::build_test_app(pool.clone());
        let response = put(app, &format!("/works/{work}/talents/{talent}"), &admin_token()).await;
        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["success"], true);
        assert_eq!(json["work_id"], work);
        assert_eq!(json["talent_id"], talent);
    }

    let app = common::build_test_app(pool);
    let json = body_json(get(app, &format!("/works/{work}"), &admin_token()).await).await;
    assert_eq!(json["talent_count"], 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn link_to_missing_talent_is_422(pool: SqlitePool) {
    let work = common::seed_work(&pool, "heat", "1995-12-15").await;

    let app = common::build_test_app(pool);
    let response = put(app, &format!("/works/{work}/talents/999"), &admin_token()).await;

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn link_requires_patch_scope(pool: SqlitePool) {
    let work = common::seed_work(&pool, "heat", "1995-12-15").await;
    let talent = common::seed_talent(&pool, "al", "pacino").await;

    let app = common::build_test_app(pool);
    let response = put(
        app,
        &format!("/works/{work}/talents/{talent}"),
        &token_with(&[scopes::POST_WORKS, scopes::PATCH_TALENTS]),
    )
    .await;

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn unlink_removes_cast_member_once(pool: SqlitePool) {
    let work = common::seed_work(&pool, "heat", "1995-12-15").await;
    let talent = common::seed_talent(&pool, "al", "pacino").await;
    let uri = format!("/works/{work}/talents/{talent}");
    put(common::build_test_app(pool.clone()), &uri, &admin_token()).await;

    let response = delete(common::build_test_app(pool.clone()), &uri, &admin_token()).await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = delete(common::build_test_app(pool), &uri, &admin_token()).await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn patch_with_null_field_is_422(pool: SqlitePool) {
    let id = common::seed_work(&pool, "heat", "1995-12-15").await;

    let app = common::build_test_app(pool.clone());
    let response = patch_json(
        app,
        &format!("/works/{id}"),
        &admin_token(),
        json!({"title": null}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let app = common::build_test_app(pool);
    let json = body_json(get(app, &format!("/works/{id}"), &admin_token()).await).await;
    assert_eq!(json["work_details"]["title"], "Heat");
}
