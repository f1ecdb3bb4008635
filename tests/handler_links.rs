mod common;

use serde_json::{Value, json};
use sqlx::PgPool;

#[sqlx::test]
async fn test_api_requires_session(pool: PgPool) {
    let (server, _state, _rx) = common::test_server(pool);

    let response = server.get("/api/links").await;

    assert_eq!(response.status_code(), 401);
    assert_eq!(response.header("www-authenticate"), "Bearer");
    let body: Value = response.json();
    assert_eq!(body["error"]["code"], "unauthorized");
}

#[sqlx::test]
async fn test_api_rejects_expired_token(pool: PgPool) {
    let (server, _state, _rx) = common::test_server(pool);

    let response = server
        .get("/api/me")
        .add_header("Authorization", format!("Bearer {}", common::expired_token("user_1")))
        .await;

    assert_eq!(response.status_code(), 401);
}

#[sqlx::test]
async fn test_me_with_bearer(pool: PgPool) {
    let (server, _state, _rx) = common::test_server(pool);

    let response = server
        .get("/api/me")
        .add_header("Authorization", common::bearer("user_1"))
        .await;

    assert_eq!(response.status_code(), 200);
    let body: Value = response.json();
    assert_eq!(body["id"], "user_1");
    assert_eq!(body["email"], "ada@example.com");
}

#[sqlx::test]
async fn test_me_with_session_cookie(pool: PgPool) {
    let (server, _state, _rx) = common::test_server(pool);

    let response = server
        .get("/api/me")
        .add_header("Cookie", common::session_cookie("user_1"))
        .await;

    assert_eq!(response.status_code(), 200);
    let body: Value = response.json();
    assert_eq!(body["id"], "user_1");
}

#[sqlx::test]
async fn test_create_link_with_generated_code(pool: PgPool) {
    let (server, _state, _rx) = common::test_server(pool);

    let response = server
        .post("/api/links")
        .add_header("Authorization", common::bearer("user_1"))
        .json(&json!({ "url": "https://example.com/some/path" }))
        .await;

    assert_eq!(response.status_code(), 201);
    let body: Value = response.json();
    let code = body["code"].as_str().unwrap();
    assert_eq!(code.len(), 8);
    assert_eq!(body["url"], "https://example.com/some/path");
    assert_eq!(body["short_url"], format!("{}/{}", common::BASE_URL, code));
    assert_eq!(body["clicks"], 0);
}

#[sqlx::test]
async fn test_create_link_with_custom_code(pool: PgPool) {
    let (server, _state, _rx) = common::test_server(pool.clone());

    let response = server
        .post("/api/links")
        .add_header("Authorization", common::bearer("user_1"))
        .json(&json!({ "url": "https://example.com", "code": "my-link" }))
        .await;

    assert_eq!(response.status_code(), 201);
    let body: Value = response.json();
    assert_eq!(body["code"], "my-link");

    let owner: String = sqlx::query_scalar("SELECT owner_id FROM links WHERE code = 'my-link'")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(owner, "user_1");
}

#[sqlx::test]
async fn test_create_link_duplicate_code(pool: PgPool) {
    let (server, _state, _rx) = common::test_server(pool.clone());
    common::create_test_link(&pool, "taken", "https://example.com", "user_2").await;

    let response = server
        .post("/api/links")
        .add_header("Authorization", common::bearer("user_1"))
        .json(&json!({ "url": "https://example.org", "code": "taken" }))
        .await;

    assert_eq!(response.status_code(), 409);
    let body: Value = response.json();
    assert_eq!(body["error"]["code"], "conflict");
}

#[sqlx::test]
async fn test_create_link_invalid_url(pool: PgPool) {
    let (server, _state, _rx) = common::test_server(pool);

    let response = server
        .post("/api/links")
        .add_header("Authorization", common::bearer("user_1"))
        .json(&json!({ "url": "ftp://example.com/file" }))
        .await;

    assert_eq!(response.status_code(), 400);
    let body: Value = response.json();
    assert_eq!(body["error"]["code"], "validation_error");
}

#[sqlx::test]
async fn test_create_link_invalid_custom_code(pool: PgPool) {
    let (server, _state, _rx) = common::test_server(pool);

    let response = server
        .post("/api/links")
        .add_header("Authorization", common::bearer("user_1"))
        .json(&json!({ "url": "https://example.com", "code": "Bad_Code" }))
        .await;

    assert_eq!(response.status_code(), 400);
}

#[sqlx::test]
async fn test_create_link_reserved_code(pool: PgPool) {
    let (server, _state, _rx) = common::test_server(pool);

    let response = server
        .post("/api/links")
        .add_header("Authorization", common::bearer("user_1"))
        .json(&json!({ "url": "https://example.com", "code": "dashboard" }))
        .await;

    assert_eq!(response.status_code(), 400);
}

#[sqlx::test]
async fn test_list_links_only_own(pool: PgPool) {
    let (server, _state, _rx) = common::test_server(pool.clone());
    common::create_test_link(&pool, "mine1", "https://example.com/1", "user_1").await;
    common::create_test_link(&pool, "mine2", "https://example.com/2", "user_1").await;
    common::create_test_link(&pool, "theirs", "https://example.com/3", "user_2").await;

    let response = server
        .get("/api/links")
        .add_header("Authorization", common::bearer("user_1"))
        .await;

    assert_eq!(response.status_code(), 200);
    let body: Value = response.json();
    assert_eq!(body["pagination"]["total"], 2);
    let codes: Vec<&str> = body["items"]
        .as_array()
        .unwrap()
        .iter()
        .map(|item| item["code"].as_str().unwrap())
        .collect();
    assert!(codes.contains(&"mine1"));
    assert!(codes.contains(&"mine2"));
    assert!(!codes.contains(&"theirs"));
}

#[sqlx::test]
async fn test_list_links_pagination(pool: PgPool) {
    let (server, _state, _rx) = common::test_server(pool.clone());
    for i in 0..5 {
        common::create_test_link(&pool, &format!("page{i}"), "https://example.com", "user_1").await;
    }

    let response = server
        .get("/api/links?page=2&page_size=2")
        .add_header("Authorization", common::bearer("user_1"))
        .await;

    assert_eq!(response.status_code(), 200);
    let body: Value = response.json();
    assert_eq!(body["pagination"]["page"], 2);
    assert_eq!(body["pagination"]["page_size"], 2);
    assert_eq!(body["pagination"]["total"], 5);
    assert_eq!(body["items"].as_array().unwrap().len(), 2);
}

#[sqlx::test]
async fn test_list_links_invalid_page(pool: PgPool) {
    let (server, _state, _rx) = common::test_server(pool);

    let response = server
        .get("/api/links?page=0")
        .add_header("Authorization", common::bearer("user_1"))
        .await;

    assert_eq!(response.status_code(), 400);
}

#[sqlx::test]
async fn test_get_link_of_other_owner_is_not_found(pool: PgPool) {
    let (server, _state, _rx) = common::test_server(pool.clone());
    let id = common::create_test_link(&pool, "private", "https://example.com", "user_2").await;

    let response = server
        .get(&format!("/api/links/{id}"))
        .add_header("Authorization", common::bearer("user_1"))
        .await;

    assert_eq!(response.status_code(), 404);
}

#[sqlx::test]
async fn test_update_link_url(pool: PgPool) {
    let (server, _state, _rx) = common::test_server(pool.clone());
    let id = common::create_test_link(&pool, "editme", "https://example.com/old", "user_1").await;

    let response = server
        .patch(&format!("/api/links/{id}"))
        .add_header("Authorization", common::bearer("user_1"))
        .json(&json!({ "url": "https://example.com/new" }))
        .await;

    assert_eq!(response.status_code(), 200);
    let body: Value = response.json();
    assert_eq!(body["url"], "https://example.com/new");
    assert_eq!(body["code"], "editme");

    let redirect = server.get("/editme").await;
    assert_eq!(redirect.header("location"), "https://example.com/new");
}

#[sqlx::test]
async fn test_update_link_of_other_owner(pool: PgPool) {
    let (server, _state, _rx) = common::test_server(pool.clone());
    let id = common::create_test_link(&pool, "notyours", "https://example.com/old", "user_2").await;

    let response = server
        .patch(&format!("/api/links/{id}"))
        .add_header("Authorization", common::bearer("user_1"))
        .json(&json!({ "url": "https://evil.example.com" }))
        .await;

    assert_eq!(response.status_code(), 404);

    let url: String = sqlx::query_scalar("SELECT url FROM links WHERE id = $1")
        .bind(id)
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(url, "https://example.com/old");
}

#[sqlx::test]
async fn test_delete_link(pool: PgPool) {
    let (server, _state, _rx) = common::test_server(pool.clone());
    let id = common::create_test_link(&pool, "deleteme", "https://example.com", "user_1").await;
    common::create_test_click(&pool, id, "10.0.0.1").await;

    let response = server
        .delete(&format!("/api/links/{id}"))
        .add_header("Authorization", common::bearer("user_1"))
        .await;

    assert_eq!(response.status_code(), 204);

    let redirect = server.get("/deleteme").await;
    assert_eq!(redirect.status_code(), 404);

    let clicks: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM link_clicks WHERE link_id = $1")
        .bind(id)
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(clicks, 0);
}

#[sqlx::test]
async fn test_delete_link_of_other_owner(pool: PgPool) {
    let (server, _state, _rx) = common::test_server(pool.clone());
    let id = common::create_test_link(&pool, "keepme", "https://example.com", "user_2").await;

    let response = server
        .delete(&format!("/api/links/{id}"))
        .add_header("Authorization", common::bearer("user_1"))
        .await;

    assert_eq!(response.status_code(), 404);
    assert_eq!(server.get("/keepme").await.status_code(), 307);
}

#[sqlx::test]
async fn test_link_clicks(pool: PgPool) {
    let (server, _state, _rx) = common::test_server(pool.clone());
    let id = common::create_test_link(&pool, "clicked", "https://example.com", "user_1").await;
    for i in 0..3 {
        common::create_test_click(&pool, id, &format!("10.0.0.{i}")).await;
    }

    let response = server
        .get(&format!("/api/links/{id}/clicks?limit=2"))
        .add_header("Authorization", common::bearer("user_1"))
        .await;

    assert_eq!(response.status_code(), 200);
    let body: Value = response.json();
    assert_eq!(body["link_id"], id);
    assert_eq!(body["items"].as_array().unwrap().len(), 2);
}

#[sqlx::test]
async fn test_link_clicks_of_other_owner(pool: PgPool) {
    let (server, _state, _rx) = common::test_server(pool.clone());
    let id = common::create_test_link(&pool, "spyon", "https://example.com", "user_2").await;

    let response = server
        .get(&format!("/api/links/{id}/clicks"))
        .add_header("Authorization", common::bearer("user_1"))
        .await;

    assert_eq!(response.status_code(), 404);
}
