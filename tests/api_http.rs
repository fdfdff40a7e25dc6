// tests/api_http.rs
//
// HTTP-level tests for the public router without opening sockets.
// We exercise the router directly via tower::ServiceExt::oneshot.

use std::sync::Arc;

use axum::{
    body::{self, Body},
    http::{Request, StatusCode},
    Router,
};
use serde_json::{json, Value as Json};
use serial_test::serial;
use tower::ServiceExt as _; // for `oneshot`

use content_credibility::{router, AppState, ContentVerifier, InMemoryStore};

const BODY_LIMIT: usize = 1024 * 1024;

fn test_router() -> Router {
    let verifier = ContentVerifier::builtin().expect("builtin verifier");
    router(AppState::new(Arc::new(verifier), Arc::new(InMemoryStore::new())))
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Json>) -> (StatusCode, Json) {
    let req = Request::builder().method(method).uri(uri);
    let req = match body {
        Some(b) => req
            .header("content-type", "application/json")
            .body(Body::from(b.to_string())),
        None => req.body(Body::empty()),
    }
    .expect("build request");

    let resp = app.clone().oneshot(req).await.expect("oneshot");
    let status = resp.status();
    let bytes = body::to_bytes(resp.into_body(), BODY_LIMIT)
        .await
        .expect("read body");
    let json = if bytes.is_empty() {
        Json::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or_else(|_| Json::String(String::from_utf8_lossy(&bytes).into()))
    };
    (status, json)
}

fn good_draft() -> Json {
    json!({
        "title": "Como configurar TLS no servidor",
        "content": "Este guia mostra como configurar TLS 1.3 com certificados renovados automaticamente em 2024. \
                    Cobrimos a criptografia moderna e a proteção das chaves privadas.\n\n\
                    Na segunda parte mostramos como validar a segurança da configuração com ferramentas abertas \
                    e como monitorar a expiração dos certificados.",
        "category": "ciberseguranca",
        "tagsText": "tls, https",
        "sourcesText": "https://www.ieee.org/tls\nhttps://sans.org/reading-room",
        "author": "Ana",
        "authorEmail": "ana@example.com"
    })
}

fn sensational_draft() -> Json {
    json!({
        "title": "BOMBA: CHOCANTE: URGENTE: governo esconde a verdade oculta!!!!!!",
        "content": "fake news",
        "category": "noticias",
        "author": "X",
        "authorEmail": "x@example.com"
    })
}

#[tokio::test]
async fn health_returns_ok() {
    let app = test_router();
    let req = Request::builder()
        .uri("/health")
        .body(Body::empty())
        .expect("build GET /health");
    let resp = app.oneshot(req).await.expect("oneshot /health");
    assert_eq!(resp.status(), StatusCode::OK);
    let bytes = body::to_bytes(resp.into_body(), BODY_LIMIT).await.unwrap();
    assert_eq!(&bytes[..], b"OK");
}

#[tokio::test]
async fn verify_returns_the_result_shape() {
    let app = test_router();
    let (status, v) = send(
        &app,
        "POST",
        "/verify",
        Some(json!({
            "title": "Guia",
            "content": "curto",
            "sourcesText": "https://arxiv.org/abs/1\n\nexample-blog.net"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    for key in ["isVerified", "score", "warnings", "sources", "recommendation"] {
        assert!(v.get(key).is_some(), "missing {key}: {v}");
    }
    assert_eq!(v["sources"].as_array().unwrap().len(), 2);
    assert_eq!(v["sources"][0]["type"], "academic");
    assert_eq!(v["sources"][0]["credibilityScore"], 95);
}

#[tokio::test]
async fn verify_requires_title_and_content() {
    let app = test_router();
    let (status, _) = send(&app, "POST", "/verify", Some(json!({ "title": "t" }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn approved_post_is_listed_and_counts_views() {
    let app = test_router();
    let (status, post) = send(&app, "POST", "/posts", Some(good_draft())).await;
    assert_eq!(status, StatusCode::CREATED, "{post}");
    assert_eq!(post["status"], "published");
    assert!(post["publishedAt"].is_string());
    assert_eq!(post["tags"], json!(["tls", "https"]));
    assert_eq!(post["views"], 0);
    let id = post["id"].as_u64().unwrap();

    let (_, list) = send(&app, "GET", "/posts?category=ciberseguranca", None).await;
    assert_eq!(list.as_array().unwrap().len(), 1);

    send(&app, "GET", &format!("/posts/{id}"), None).await;
    let (status, read) = send(&app, "GET", &format!("/posts/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(read["views"], 2);
}

#[tokio::test]
async fn rejected_post_returns_422_with_warnings() {
    let app = test_router();
    let (status, body) = send(&app, "POST", "/posts", Some(sensational_draft())).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY, "{body}");
    assert!(body["score"].as_u64().unwrap() < 60);
    assert!(!body["warnings"].as_array().unwrap().is_empty());

    let (_, list) = send(&app, "GET", "/posts?status=rejected", None).await;
    assert!(list.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn missing_author_is_a_bad_request() {
    let app = test_router();
    let mut draft = good_draft();
    draft["author"] = json!("");
    let (status, body) = send(&app, "POST", "/posts", Some(draft)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("author"));
}

#[tokio::test]
async fn unknown_post_is_404_and_bad_filters_are_400() {
    let app = test_router();
    let (status, _) = send(&app, "GET", "/posts/999", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status, _) = send(&app, "POST", "/posts/999/like", Some(json!({ "liked": true }))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status, _) = send(&app, "GET", "/posts?category=memes", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let (status, _) = send(&app, "GET", "/posts?sort=random", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn likes_never_go_negative() {
    let app = test_router();
    let (_, post) = send(&app, "POST", "/posts", Some(good_draft())).await;
    let id = post["id"].as_u64().unwrap();
    let uri = format!("/posts/{id}/like");

    let (_, p) = send(&app, "POST", &uri, Some(json!({ "liked": false }))).await;
    assert_eq!(p["likes"], 0);
    let (_, p) = send(&app, "POST", &uri, Some(json!({ "liked": true }))).await;
    assert_eq!(p["likes"], 1);
}

#[tokio::test]
async fn listing_supports_search_and_sort() {
    let app = test_router();
    let (_, first) = send(&app, "POST", "/posts", Some(good_draft())).await;
    let mut other = good_draft();
    other["title"] = json!("Auditoria de certificados no servidor");
    other["tagsText"] = json!("pki");
    let (status, second) = send(&app, "POST", "/posts", Some(other)).await;
    assert_eq!(status, StatusCode::CREATED, "{second}");

    let (_, list) = send(&app, "GET", "/posts", None).await;
    assert_eq!(list[0]["id"], second["id"]);
    assert_eq!(list[1]["id"], first["id"]);

    let (_, list) = send(&app, "GET", "/posts?sort=title", None).await;
    assert_eq!(list[0]["title"], "Como configurar TLS no servidor");

    let (_, list) = send(&app, "GET", "/posts?search=PKI", None).await;
    assert_eq!(list.as_array().unwrap().len(), 1);
    assert_eq!(list[0]["id"], second["id"]);
    let (_, list) = send(&app, "GET", "/posts?q=https", None).await;
    assert_eq!(list.as_array().unwrap().len(), 1);
    assert_eq!(list[0]["id"], first["id"]);
}

#[tokio::test]
#[serial]
async fn debug_breakdown_is_gated() {
    std::env::remove_var("DEBUG_ROUTES");
    let app = test_router();
    let (status, _) = send(&app, "GET", "/debug/breakdown?title=a&content=b", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    std::env::set_var("DEBUG_ROUTES", "1");
    let app = test_router();
    std::env::remove_var("DEBUG_ROUTES");
    let (status, v) = send(&app, "GET", "/debug/breakdown?title=a&content=b", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(v["sub_scores"]["sources"], 50.0);
    assert_eq!(v["thresholds"]["approve"], 80);
    // 20 + 15 + 20 + 9.75 + 10.5
    assert_eq!(v["result"]["score"], 75);
    assert_eq!(v["result"]["recommendation"], "review");
}
