//! Content API Router Tests
//!
//! Each test builds the full axum Router over an in-process store and sends
//! requests through it with `tower::ServiceExt::oneshot`.
//!
//! Test Categories:
//! 1. Parameter validation
//! 2. Lookup outcomes
//! 3. Response shape and headers
//! 4. Operational endpoints

use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

use content_by_concept::content::{
    ContentItem, ContentLookup, InMemoryContentStore, LookupRequest, StoreError, StoreResult,
    DEFAULT_LIMIT,
};
use content_by_concept::http_server::{HttpServer, HttpServerConfig};

const CONCEPT_UUID: &str = "5d1510f8-2779-4b74-adab-0a5eb138fca6";
const CONTENT_UUID: &str = "3fc9fe3e-af8c-4f7f-961a-e5065392bb31";
const MISSING_CONCEPT: &str =
    "Missing or empty query parameter isAnnotatedBy. Expecting valid absolute concept URI.";

// =============================================================================
// Helpers
// =============================================================================

fn config() -> HttpServerConfig {
    HttpServerConfig {
        cache_duration: Duration::from_secs(360),
        ..Default::default()
    }
}

fn router(lookup: Arc<dyn ContentLookup>) -> Router {
    HttpServer::new(config(), lookup).router()
}

fn seeded_store() -> Arc<InMemoryContentStore> {
    let store = InMemoryContentStore::new("prod");
    // 2016-03-01
    store.annotate(CONCEPT_UUID, CONTENT_UUID, &["Thing", "Content", "Article"], 1456790400);
    Arc::new(store)
}

fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

fn content_uri(query: &str) -> String {
    format!("/content?{}", query)
}

fn annotated_by(uuid: &str) -> String {
    format!("isAnnotatedBy=http://api.ft.com/things/{}", uuid)
}

async fn send(router: Router, request: Request<Body>) -> (StatusCode, axum::http::HeaderMap, String) {
    let response = router.oneshot(request).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, headers, String::from_utf8(bytes.to_vec()).unwrap())
}

fn message(body: &str) -> String {
    let value: Value = serde_json::from_str(body).unwrap();
    value["message"].as_str().unwrap().to_string()
}

/// Store that always fails with a fixed error
struct FailingStore;

#[async_trait]
impl ContentLookup for FailingStore {
    async fn lookup(&self, _request: &LookupRequest) -> StoreResult<Option<Vec<ContentItem>>> {
        Err(StoreError::Connection("TEST failing to READ".to_string()))
    }

    async fn check_connectivity(&self) -> StoreResult<()> {
        Err(StoreError::Connection("TEST failing to CONNECT".to_string()))
    }
}

/// Store that records the last request it saw and returns one item
#[derive(Default)]
struct RecordingStore {
    last: Mutex<Option<LookupRequest>>,
}

impl RecordingStore {
    fn last(&self) -> LookupRequest {
        self.last.lock().unwrap().clone().expect("store was not called")
    }
}

#[async_trait]
impl ContentLookup for RecordingStore {
    async fn lookup(&self, request: &LookupRequest) -> StoreResult<Option<Vec<ContentItem>>> {
        *self.last.lock().unwrap() = Some(request.clone());
        Ok(Some(vec![ContentItem::new(
            "http://api.ft.com/things/recorded",
            "http://api.ft.com/content/recorded",
            vec![],
        )]))
    }

    async fn check_connectivity(&self) -> StoreResult<()> {
        Ok(())
    }
}

// =============================================================================
// 1. PARAMETER VALIDATION
// =============================================================================

#[tokio::test]
async fn test_no_query_string_is_bad_request() {
    let (status, headers, body) = send(router(seeded_store()), get("/content")).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(message(&body), MISSING_CONCEPT);
    assert_eq!(
        headers.get(header::CONTENT_TYPE).unwrap(),
        "application/json; charset=UTF-8"
    );
    assert!(headers.get(header::CACHE_CONTROL).is_none());
}

#[tokio::test]
async fn test_empty_concept_is_bad_request() {
    let (status, _, body) =
        send(router(seeded_store()), get(&content_uri("isAnnotatedBy="))).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(message(&body), MISSING_CONCEPT);
}

#[tokio::test]
async fn test_other_params_without_concept_is_bad_request() {
    let (status, _, body) =
        send(router(seeded_store()), get(&content_uri("limit=abc&fromDate=2016-01-01"))).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(message(&body), MISSING_CONCEPT);
}

#[tokio::test]
async fn test_multiple_concepts_is_bad_request() {
    let query = format!("{}&{}", annotated_by(CONCEPT_UUID), annotated_by("other"));
    let (status, _, body) = send(router(seeded_store()), get(&content_uri(&query))).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(message(&body), "Only one concept uri should be provided");
}

#[tokio::test]
async fn test_non_numeric_limit_is_bad_request() {
    for raw in ["abc", "ten", "1e3"] {
        let query = format!("{}&limit={}", annotated_by(CONCEPT_UUID), raw);
        let (status, _, body) = send(router(seeded_store()), get(&content_uri(&query))).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(message(&body), format!("Error limit is not a number: {}.", raw));
    }
}

#[tokio::test]
async fn test_unparseable_dates_do_not_fail_request() {
    let store = Arc::new(RecordingStore::default());
    let query = format!(
        "{}&fromDate=not-a-date&toDate=2016-02-30",
        annotated_by(CONCEPT_UUID)
    );

    let (status, _, _) = send(router(store.clone()), get(&content_uri(&query))).await;

    assert_eq!(status, StatusCode::OK);
    let seen = store.last();
    assert_eq!(seen.from_date_epoch, 0);
    assert_eq!(seen.to_date_epoch, 0);
}

#[tokio::test]
async fn test_request_translated_for_store() {
    let store = Arc::new(RecordingStore::default());
    let query = format!(
        "{}&limit=-3&fromDate=2016-01-01&toDate=2016-01-31",
        annotated_by(CONCEPT_UUID)
    );

    send(router(store.clone()), get(&content_uri(&query))).await;

    assert_eq!(
        store.last(),
        LookupRequest {
            concept_id: CONCEPT_UUID.to_string(),
            limit: -3,
            from_date_epoch: 1451606400,
            to_date_epoch: 1454198400,
        }
    );
}

#[tokio::test]
async fn test_default_limit_applied() {
    let store = Arc::new(RecordingStore::default());

    send(router(store.clone()), get(&content_uri(&annotated_by(CONCEPT_UUID)))).await;

    assert_eq!(store.last().limit, DEFAULT_LIMIT);
}

#[tokio::test]
async fn test_unprefixed_concept_passed_through() {
    let store = Arc::new(RecordingStore::default());

    send(router(store.clone()), get(&content_uri("isAnnotatedBy=plain-id"))).await;

    assert_eq!(store.last().concept_id, "plain-id");
}

// =============================================================================
// 2. LOOKUP OUTCOMES
// =============================================================================

#[tokio::test]
async fn test_found_content_is_returned() {
    let (status, headers, body) = send(
        router(seeded_store()),
        get(&content_uri(&annotated_by(CONCEPT_UUID))),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(headers.get(header::CACHE_CONTROL).unwrap(), "max-age=360, public");

    let items: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(
        items,
        json!([{
            "id": format!("http://api.ft.com/things/{}", CONTENT_UUID),
            "apiUrl": format!("http://api.ft.com/content/{}", CONTENT_UUID),
            "types": [
                "http://www.ft.com/ontology/core/Thing",
                "http://www.ft.com/ontology/content/Content",
                "http://www.ft.com/ontology/content/Article"
            ]
        }])
    );
}

#[tokio::test]
async fn test_unknown_concept_is_not_found() {
    let (status, headers, body) = send(
        router(seeded_store()),
        get(&content_uri(&annotated_by("99999"))),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(message(&body), "No content found for concept with uuid 99999.");
    assert!(headers.get(header::CACHE_CONTROL).is_none());
}

#[tokio::test]
async fn test_store_failure_is_service_unavailable() {
    let (status, _, body) = send(
        router(Arc::new(FailingStore)),
        get(&content_uri(&annotated_by(CONCEPT_UUID))),
    )
    .await;

    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    let msg = message(&body);
    assert!(msg.starts_with(&format!(
        "Error getting content for concept with uuid {}, err=",
        CONCEPT_UUID
    )));
    assert!(msg.contains("TEST failing to READ"));
}

#[tokio::test]
async fn test_found_but_filtered_out_is_empty_array() {
    let query = format!("{}&fromDate=2017-01-01", annotated_by(CONCEPT_UUID));
    let (status, headers, body) = send(router(seeded_store()), get(&content_uri(&query))).await;

    assert_eq!(status, StatusCode::OK);
    assert!(headers.get(header::CACHE_CONTROL).is_some());
    assert_eq!(body, "[]");
}

#[tokio::test]
async fn test_date_window_includes_content() {
    let query = format!(
        "{}&fromDate=2016-03-01&toDate=2016-03-01",
        annotated_by(CONCEPT_UUID)
    );
    let (status, _, body) = send(router(seeded_store()), get(&content_uri(&query))).await;

    assert_eq!(status, StatusCode::OK);
    let items: Vec<ContentItem> = serde_json::from_str(&body).unwrap();
    assert_eq!(items.len(), 1);
}

#[tokio::test]
async fn test_repeated_request_is_identical() {
    let router = router(seeded_store());
    let uri = content_uri(&annotated_by(CONCEPT_UUID));

    let (_, _, first) = send(router.clone(), get(&uri)).await;
    let (_, _, second) = send(router, get(&uri)).await;

    assert_eq!(first, second);
}

// =============================================================================
// 3. RESPONSE SHAPE AND HEADERS
// =============================================================================

#[tokio::test]
async fn test_items_round_trip_through_response() {
    let (_, _, body) = send(
        router(seeded_store()),
        get(&content_uri(&annotated_by(CONCEPT_UUID))),
    )
    .await;

    let items: Vec<ContentItem> = serde_json::from_str(&body).unwrap();
    assert_eq!(serde_json::to_string(&items).unwrap(), body);
}

#[tokio::test]
async fn test_post_is_method_not_allowed() {
    let request = Request::builder()
        .method(Method::POST)
        .uri(content_uri(&annotated_by(CONCEPT_UUID)))
        .body(Body::empty())
        .unwrap();

    let (status, _, body) = send(router(seeded_store()), request).await;

    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
    assert!(body.is_empty());
}

#[tokio::test]
async fn test_other_methods_are_not_allowed() {
    for method in [Method::HEAD, Method::PUT, Method::DELETE, Method::OPTIONS] {
        let store = Arc::new(RecordingStore::default());
        let request = Request::builder()
            .method(method.clone())
            .uri(content_uri(&annotated_by(CONCEPT_UUID)))
            .body(Body::empty())
            .unwrap();

        let (status, headers, body) = send(router(store.clone()), request).await;

        assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED, "{}", method);
        assert!(headers.get(header::CACHE_CONTROL).is_none());
        assert!(body.is_empty());
        assert!(store.last.lock().unwrap().is_none(), "{} reached the store", method);
    }
}

#[tokio::test]
async fn test_transaction_id_echoed() {
    let request = Request::builder()
        .uri(content_uri(&annotated_by(CONCEPT_UUID)))
        .header("x-request-id", "tid_test123")
        .body(Body::empty())
        .unwrap();

    let (_, headers, _) = send(router(seeded_store()), request).await;
    assert_eq!(headers.get("x-request-id").unwrap(), "tid_test123");
}

#[tokio::test]
async fn test_transaction_id_generated() {
    let (_, headers, _) = send(router(seeded_store()), get("/content")).await;

    let tid = headers.get("x-request-id").unwrap().to_str().unwrap();
    assert!(tid.starts_with("tid_"));
}

// =============================================================================
// 4. OPERATIONAL ENDPOINTS
// =============================================================================

#[tokio::test]
async fn test_gtg_follows_store_connectivity() {
    let store = seeded_store();

    let (status, _, body) = send(router(store.clone()), get("/__gtg")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "OK");

    store.set_reachable(false);
    let (status, _, body) = send(router(store), get("/__gtg")).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert!(body.contains("unreachable"));
}

#[tokio::test]
async fn test_health_reports_failing_check() {
    let (status, _, body) = send(router(Arc::new(FailingStore)), get("/__health")).await;

    assert_eq!(status, StatusCode::OK);
    let health: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(health["ok"], false);
    assert_eq!(health["checks"][0]["id"], "neo4j-check");
    assert_eq!(health["checks"][0]["ok"], false);
    assert!(health["checks"][0]["checkOutput"]
        .as_str()
        .unwrap()
        .contains("TEST failing to CONNECT"));
}

#[tokio::test]
async fn test_ping_and_build_info() {
    for path in ["/__ping", "/ping"] {
        let (status, _, body) = send(router(seeded_store()), get(path)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "pong");
    }

    for path in ["/__build-info", "/build-info"] {
        let (status, _, body) = send(router(seeded_store()), get(path)).await;
        assert_eq!(status, StatusCode::OK);
        let info: Value = serde_json::from_str(&body).unwrap();
        assert_eq!(info["name"], "content-by-concept");
    }
}

#[tokio::test]
async fn test_metrics_count_content_requests() {
    let router = router(seeded_store());

    let (status, _, _) = send(
        router.clone(),
        get(&content_uri(&annotated_by(CONCEPT_UUID))),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let (status, _, _) = send(router.clone(), get("/content")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _, body) = send(router, get("/__metrics")).await;
    assert_eq!(status, StatusCode::OK);

    let metrics: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(metrics["requests"], 2);
    assert_eq!(metrics["statusClasses"][1]["class"], "2xx");
    assert_eq!(metrics["statusClasses"][1]["requests"], 1);
    assert_eq!(metrics["statusClasses"][3]["class"], "4xx");
    assert_eq!(metrics["statusClasses"][3]["requests"], 1);
}
