use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use np_client::{ClientConfig, HttpNewsApi};
use np_core::{ArticleFilter, Error, NewsApi};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

#[derive(Default)]
struct Backend {
    searches: AtomicUsize,
    last_query: std::sync::Mutex<Option<HashMap<String, String>>>,
}

fn documents() -> Value {
    json!([
        {"_id": {"$oid": "a1"}, "title": "AI breakthrough", "category": "tech",
         "publication_date": {"$date": "2024-01-01T00:00:00Z"}},
        {"_id": "b2", "title": "Матч года", "category": "sports", "source": "news",
         "publication_date": "2023-12-31"},
    ])
}

async fn articles(State(backend): State<Arc<Backend>>, Query(params): Query<HashMap<String, String>>) -> impl IntoResponse {
    *backend.last_query.lock().unwrap() = Some(params);
    Json(json!({"articles": documents(), "total": 12}))
}

async fn article(Path(id): Path<String>) -> impl IntoResponse {
    match id.as_str() {
        "a1" => (StatusCode::OK, Json(documents()[0].clone())).into_response(),
        "boom" => (StatusCode::INTERNAL_SERVER_ERROR, "database down").into_response(),
        _ => (StatusCode::NOT_FOUND, "Статья не найдена").into_response(),
    }
}

async fn search(State(backend): State<Arc<Backend>>, Query(params): Query<HashMap<String, String>>) -> impl IntoResponse {
    backend.searches.fetch_add(1, Ordering::SeqCst);
    let query = params.get("query").cloned().unwrap_or_default();
    let hits: Vec<Value> = documents()
        .as_array()
        .unwrap()
        .iter()
        .filter(|d| d["title"].as_str().unwrap().to_lowercase().contains(&query.to_lowercase()))
        .cloned()
        .collect();
    Json(Value::Array(hits))
}

async fn category(Path(name): Path<String>) -> impl IntoResponse {
    match name.as_str() {
        "garbled" => (StatusCode::OK, "[{\"_id\": ").into_response(),
        "tech" => Json(json!([documents()[0].clone()])).into_response(),
        _ => Json(json!([])).into_response(),
    }
}

async fn source(Path(name): Path<String>) -> impl IntoResponse {
    match name.as_str() {
        "missing" => StatusCode::NOT_FOUND.into_response(),
        _ => Json(json!([documents()[1].clone()])).into_response(),
    }
}

async fn spawn_backend() -> (String, Arc<Backend>) {
    let backend = Arc::new(Backend::default());
    let router = Router::new()
        .route("/api/articles", get(articles))
        .route("/api/article/:id", get(article))
        .route("/api/search", get(search))
        .route("/api/category/:name", get(category))
        .route("/api/source/:name", get(source))
        .route("/api/top-articles", get(|| async { Json(documents()) }))
        .route("/api/latest-news", get(|| async { Json(documents()) }))
        .route("/api/categories", get(|| async { Json(json!(["tech", "sports"])) }))
        .route("/api/sources", get(|| async { Json(json!(["news"])) }))
        .route("/api/config", get(|| async { Json(json!({"SITE_HOST": "127.0.0.1:1"})) }))
        .with_state(backend.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    (format!("http://{}", addr), backend)
}

async fn client() -> (HttpNewsApi, Arc<Backend>, String) {
    let (url, backend) = spawn_backend().await;
    let api = HttpNewsApi::new(ClientConfig::new(&url).unwrap()).unwrap();
    (api, backend, url)
}

#[tokio::test]
async fn test_fetch_articles_sends_filter_and_reads_total() {
    let (api, backend, _) = client().await;
    let filter = ArticleFilter::page(5, 10).with_category("tech").with_source("news");
    let page = api.fetch_articles(&filter).await.unwrap();

    assert_eq!(page.total, Some(12));
    assert_eq!(page.articles[0].id, "a1");
    assert_eq!(page.articles[1].id, "b2");

    let sent = backend.last_query.lock().unwrap().clone().unwrap();
    assert_eq!(sent.get("limit").map(String::as_str), Some("5"));
    assert_eq!(sent.get("offset").map(String::as_str), Some("10"));
    assert_eq!(sent.get("category").map(String::as_str), Some("tech"));
    assert_eq!(sent.get("source").map(String::as_str), Some("news"));
}

#[tokio::test]
async fn test_fetch_article_by_id() {
    let (api, _, _) = client().await;
    let article = api.fetch_article_by_id("a1").await.unwrap();
    assert_eq!(article.title, "AI breakthrough");
    assert!(article.publication_date.is_some());

    assert!(matches!(api.fetch_article_by_id("zzz").await, Err(Error::NotFound(_))));
    match api.fetch_article_by_id("boom").await {
        Err(Error::Network(message)) => assert!(message.contains("500")),
        other => panic!("expected network error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_list_404_is_a_network_error() {
    let (api, _, _) = client().await;
    assert!(matches!(api.fetch_source("missing").await, Err(Error::Network(_))));
    assert_eq!(api.fetch_source("news").await.unwrap()[0].id, "b2");
}

#[tokio::test]
async fn test_malformed_json_is_a_parse_error() {
    let (api, _, _) = client().await;
    assert!(matches!(api.fetch_category("garbled").await, Err(Error::Parse(_))));
    assert_eq!(api.fetch_category("tech").await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_search_validates_before_requesting() {
    let (api, backend, _) = client().await;
    assert!(matches!(api.search_articles("   ").await, Err(Error::InvalidQuery)));
    assert_eq!(backend.searches.load(Ordering::SeqCst), 0);

    let hits = api.search_articles("матч").await.unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].source.as_deref(), Some("news"));
    assert_eq!(backend.searches.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_digest_and_menu_endpoints() {
    let (api, _, _) = client().await;
    assert_eq!(api.fetch_top_articles().await.unwrap().len(), 2);
    assert_eq!(api.fetch_latest_news().await.unwrap().len(), 2);
    assert_eq!(api.fetch_categories().await.unwrap(), ["tech", "sports"]);
    assert_eq!(api.fetch_sources().await.unwrap(), ["news"]);
}

#[tokio::test]
async fn test_unreachable_backend_is_a_network_error() {
    let api = HttpNewsApi::new(ClientConfig::new("http://127.0.0.1:9").unwrap()).unwrap();
    assert!(matches!(api.fetch_top_articles().await, Err(Error::Network(_))));
}

#[tokio::test]
async fn test_discover_config() {
    let (_, _, url) = client().await;
    let config = ClientConfig::discover(&url).await.unwrap();
    assert_eq!(config.base_url.as_str(), "http://127.0.0.1:1/");
}
