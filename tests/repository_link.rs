mod common;

use shortlink::domain::entities::NewLink;
use shortlink::domain::repositories::LinkRepository;
use shortlink::error::AppError;
use shortlink::infrastructure::persistence::PgLinkRepository;
use sqlx::PgPool;
use std::sync::Arc;

fn new_link(code: &str, owner_id: &str) -> NewLink {
    NewLink {
        code: code.to_string(),
        url: "https://example.com/".to_string(),
        owner_id: owner_id.to_string(),
    }
}

#[sqlx::test]
async fn test_create_link(pool: PgPool) {
    let repo = PgLinkRepository::new(Arc::new(pool));

    let link = repo.create(new_link("test123", "user_1")).await.unwrap();

    assert_eq!(link.code, "test123");
    assert_eq!(link.url, "https://example.com/");
    assert_eq!(link.owner_id, "user_1");
    assert_eq!(link.clicks, 0);
}

#[sqlx::test]
async fn test_create_duplicate_code(pool: PgPool) {
    let repo = PgLinkRepository::new(Arc::new(pool));
    repo.create(new_link("dup1", "user_1")).await.unwrap();

    let result = repo.create(new_link("dup1", "user_2")).await;

    assert!(matches!(result, Err(AppError::Conflict { .. })));
}

#[sqlx::test]
async fn test_find_by_code(pool: PgPool) {
    common::create_test_link(&pool, "abc123", "https://example.com", "user_1").await;
    let repo = PgLinkRepository::new(Arc::new(pool));

    let link = repo.find_by_code("abc123").await.unwrap();

    assert_eq!(link.unwrap().code, "abc123");
}

#[sqlx::test]
async fn test_find_by_code_not_found(pool: PgPool) {
    let repo = PgLinkRepository::new(Arc::new(pool));

    let result = repo.find_by_code("notfound").await.unwrap();

    assert!(result.is_none());
}

#[sqlx::test]
async fn test_find_for_owner(pool: PgPool) {
    let id = common::create_test_link(&pool, "owned1", "https://example.com", "user_1").await;
    let repo = PgLinkRepository::new(Arc::new(pool));

    assert!(repo.find_for_owner(id, "user_1").await.unwrap().is_some());
    assert!(repo.find_for_owner(id, "user_2").await.unwrap().is_none());
}

#[sqlx::test]
async fn test_list_and_count_by_owner(pool: PgPool) {
    for i in 0..3 {
        common::create_test_link(&pool, &format!("list{i}"), "https://example.com", "user_1").await;
    }
    common::create_test_link(&pool, "other1", "https://example.com", "user_2").await;
    let repo = PgLinkRepository::new(Arc::new(pool));

    let links = repo.list_by_owner("user_1", 2, 0).await.unwrap();
    assert_eq!(links.len(), 2);
    assert_eq!(links[0].code, "list2");
    assert_eq!(links[1].code, "list1");

    let rest = repo.list_by_owner("user_1", 2, 2).await.unwrap();
    assert_eq!(rest.len(), 1);
    assert_eq!(rest[0].code, "list0");

    assert_eq!(repo.count_by_owner("user_1").await.unwrap(), 3);
    assert_eq!(repo.count_by_owner("nobody").await.unwrap(), 0);
}

#[sqlx::test]
async fn test_update_url(pool: PgPool) {
    let id = common::create_test_link(&pool, "upd1", "https://example.com/old", "user_1").await;
    let repo = PgLinkRepository::new(Arc::new(pool));

    let foreign = repo
        .update_url(id, "user_2", "https://evil.example.com/")
        .await
        .unwrap();
    assert!(foreign.is_none());

    let updated = repo
        .update_url(id, "user_1", "https://example.com/new")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(updated.url, "https://example.com/new");
    assert_eq!(updated.code, "upd1");
}

#[sqlx::test]
async fn test_delete(pool: PgPool) {
    let id = common::create_test_link(&pool, "del1", "https://example.com", "user_1").await;
    common::create_test_click(&pool, id, "10.0.0.1").await;
    let repo = PgLinkRepository::new(Arc::new(pool.clone()));

    assert!(!repo.delete(id, "user_2").await.unwrap());
    assert!(repo.delete(id, "user_1").await.unwrap());
    assert!(!repo.delete(id, "user_1").await.unwrap());

    let clicks: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM link_clicks")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(clicks, 0);
}

#[sqlx::test]
async fn test_resolve_and_count(pool: PgPool) {
    common::create_test_link(&pool, "res1", "https://example.com", "user_1").await;
    let repo = PgLinkRepository::new(Arc::new(pool));

    let first = repo.resolve_and_count("res1").await.unwrap().unwrap();
    let second = repo.resolve_and_count("res1").await.unwrap().unwrap();

    assert_eq!(first.clicks, 1);
    assert_eq!(second.clicks, 2);
    assert!(repo.resolve_and_count("missing").await.unwrap().is_none());
}

#[sqlx::test]
async fn test_resolve_and_count_concurrent(pool: PgPool) {
    common::create_test_link(&pool, "hot1", "https://example.com", "user_1").await;
    let repo = Arc::new(PgLinkRepository::new(Arc::new(pool.clone())));

    let handles: Vec<_> = (0..20)
        .map(|_| {
            let repo = repo.clone();
            tokio::spawn(async move { repo.resolve_and_count("hot1").await })
        })
        .collect();

    for handle in handles {
        assert!(handle.await.unwrap().unwrap().is_some());
    }

    assert_eq!(common::click_count(&pool, "hot1").await, 20);
}

#[sqlx::test]
async fn test_ping(pool: PgPool) {
    let repo = PgLinkRepository::new(Arc::new(pool));

    assert!(repo.ping().await.is_ok());
}
