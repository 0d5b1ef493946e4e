//! Admin API integration tests
//!
//! Full HTTP-level tests of the create/list/get/delete endpoints and the
//! health check, against a throwaway SQLite database.

use std::sync::Arc;

use actix_web::http::StatusCode;
use actix_web::test::{self, TestRequest};
use actix_web::{App, web};
use tempfile::TempDir;

use tinylink::services::configure_routes;
use tinylink::storage::backend::SeaOrmRepository;
use tinylink::storage::{Link, Repository};

async fn new_repository() -> (TempDir, Arc<dyn Repository>) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let db_path = temp_dir.path().join("admin_test.db");
    let db_url = format!("sqlite://{}?mode=rwc", db_path.display());

    let repository = SeaOrmRepository::new(&db_url, "sqlite")
        .await
        .expect("Failed to create repository");
    (temp_dir, Arc::new(repository))
}

macro_rules! test_app {
    ($repo:expr) => {
        test::init_service(
            App::new()
                .app_data(web::Data::new(Arc::clone(&$repo)))
                .configure(configure_routes),
        )
        .await
    };
}

#[actix_web::test]
async fn test_healthz() {
    let (_dir, repo) = new_repository().await;
    let app = test_app!(repo);

    let resp = TestRequest::get().uri("/healthz").send_request(&app).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["ok"], true);
    assert!(body["version"].is_string());
}

#[actix_web::test]
async fn test_create_with_explicit_code() {
    let (_dir, repo) = new_repository().await;
    let app = test_app!(repo);

    let resp = TestRequest::post()
        .uri("/api/links")
        .set_json(serde_json::json!({
            "target_url": "https://example.com",
            "code": "abc123",
        }))
        .send_request(&app)
        .await;
    assert_eq!(resp.status(), StatusCode::CREATED);

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["code"], "abc123");
    assert_eq!(body["target_url"], "https://example.com");
    assert_eq!(body["clicks"], 0);
    assert!(body["last_clicked"].is_null());
    assert!(body["created_at"].is_string());
}

#[actix_web::test]
async fn test_create_generates_distinct_codes() {
    let (_dir, repo) = new_repository().await;
    let app = test_app!(repo);

    let mut codes = Vec::new();
    for _ in 0..2 {
        let resp = TestRequest::post()
            .uri("/api/links")
            .set_json(serde_json::json!({ "target_url": "https://example.com" }))
            .send_request(&app)
            .await;
        assert_eq!(resp.status(), StatusCode::CREATED);

        let body: serde_json::Value = test::read_body_json(resp).await;
        let code = body["code"].as_str().unwrap().to_string();
        assert_eq!(code.len(), 7);
        assert!(code.bytes().all(|b| b.is_ascii_alphanumeric()));
        codes.push(code);
    }
    assert_ne!(codes[0], codes[1]);
}

#[actix_web::test]
async fn test_create_rejects_bad_url() {
    let (_dir, repo) = new_repository().await;
    let app = test_app!(repo);

    for target in ["", "not a url", "ftp://example.com", "javascript:alert(1)"] {
        let resp = TestRequest::post()
            .uri("/api/links")
            .set_json(serde_json::json!({ "target_url": target }))
            .send_request(&app)
            .await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST, "target: {target}");

        let body: serde_json::Value = test::read_body_json(resp).await;
        assert!(body["error"].is_string());
    }

    assert!(repo.list().await.unwrap().is_empty());
}

#[actix_web::test]
async fn test_create_rejects_bad_code_shape() {
    let (_dir, repo) = new_repository().await;
    let app = test_app!(repo);

    for code in ["abc", "toolongcode1", "bad-12", "with space"] {
        let resp = TestRequest::post()
            .uri("/api/links")
            .set_json(serde_json::json!({
                "target_url": "https://example.com",
                "code": code,
            }))
            .send_request(&app)
            .await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST, "code: {code}");
    }
}

#[actix_web::test]
async fn test_create_duplicate_returns_conflict() {
    let (_dir, repo) = new_repository().await;
    let app = test_app!(repo);

    repo.insert("taken123", "https://example.com/original")
        .await
        .unwrap();

    let resp = TestRequest::post()
        .uri("/api/links")
        .set_json(serde_json::json!({
            "target_url": "https://example.com/other",
            "code": "taken123",
        }))
        .send_request(&app)
        .await;
    assert_eq!(resp.status(), StatusCode::CONFLICT);

    // 已有记录不受影响
    let existing = repo.get("taken123").await.unwrap();
    assert_eq!(existing.target_url, "https://example.com/original");
}

#[actix_web::test]
async fn test_list_newest_first() {
    let (_dir, repo) = new_repository().await;
    let app = test_app!(repo);

    repo.insert("first001", "https://example.com/1").await.unwrap();
    tokio::time::sleep(std::time::Duration::from_millis(5)).await;
    repo.insert("second01", "https://example.com/2").await.unwrap();

    let resp = TestRequest::get().uri("/api/links").send_request(&app).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Vec<Link> = test::read_body_json(resp).await;
    assert_eq!(body.len(), 2);
    assert_eq!(body[0].code, "second01");
    assert_eq!(body[1].code, "first001");
}

#[actix_web::test]
async fn test_get_link() {
    let (_dir, repo) = new_repository().await;
    let app = test_app!(repo);

    repo.insert("fetchme1", "https://example.com").await.unwrap();

    let resp = TestRequest::get()
        .uri("/api/links/fetchme1")
        .send_request(&app)
        .await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Link = test::read_body_json(resp).await;
    assert_eq!(body.code, "fetchme1");
    assert_eq!(body.clicks, 0);
}

#[actix_web::test]
async fn test_get_missing_link() {
    let (_dir, repo) = new_repository().await;
    let app = test_app!(repo);

    let resp = TestRequest::get()
        .uri("/api/links/nothere1")
        .send_request(&app)
        .await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "Not found");
}

#[actix_web::test]
async fn test_delete_link() {
    let (_dir, repo) = new_repository().await;
    let app = test_app!(repo);

    repo.insert("dropme01", "https://example.com").await.unwrap();

    let resp = TestRequest::delete()
        .uri("/api/links/dropme01")
        .send_request(&app)
        .await;
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);
    let body = test::read_body(resp).await;
    assert!(body.is_empty());

    let resp = TestRequest::get()
        .uri("/api/links/dropme01")
        .send_request(&app)
        .await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn test_delete_missing_link() {
    let (_dir, repo) = new_repository().await;
    let app = test_app!(repo);

    repo.insert("keeper01", "https://example.com").await.unwrap();

    let resp = TestRequest::delete()
        .uri("/api/links/nothere1")
        .send_request(&app)
        .await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    assert_eq!(repo.list().await.unwrap().len(), 1);
}

#[actix_web::test]
async fn test_unmatched_route_returns_json_404() {
    let (_dir, repo) = new_repository().await;
    let app = test_app!(repo);

    let resp = TestRequest::post()
        .uri("/some/unknown/path")
        .send_request(&app)
        .await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "Not found");
}

#[actix_web::test]
async fn test_create_redirect_then_get_scenario() {
    let (_dir, repo) = new_repository().await;
    let app = test_app!(repo);

    // 创建
    let resp = TestRequest::post()
        .uri("/api/links")
        .set_json(serde_json::json!({
            "target_url": "https://example.com",
            "code": "abc123",
        }))
        .send_request(&app)
        .await;
    assert_eq!(resp.status(), StatusCode::CREATED);

    // 跳转
    let resp = TestRequest::get().uri("/abc123").send_request(&app).await;
    assert_eq!(resp.status(), StatusCode::FOUND);
    assert_eq!(
        resp.headers().get("Location").unwrap(),
        "https://example.com"
    );

    // 统计已更新
    let resp = TestRequest::get()
        .uri("/api/links/abc123")
        .send_request(&app)
        .await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Link = test::read_body_json(resp).await;
    assert_eq!(body.clicks, 1);
    assert!(body.last_clicked.is_some());
}
