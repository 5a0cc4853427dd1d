//! Tests for the HTTP API using in-process requests.

mod test_utils;

use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, StatusCode, header},
};
use serde_json::{Value, json};
use std::sync::Arc;
use test_utils::{MODEL, PARIS_ITINERARY, ScriptedProvider, pool_of, quota_exceeded, unauthorized};
use tower::ServiceExt;
use wayfarer_planner::{Planner, REPHRASE_MESSAGE};
use wayfarer_server::create_router;

fn app(provider: ScriptedProvider, keys: usize) -> Router {
    create_router(Arc::new(Planner::new(provider, pool_of(keys))))
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

fn paris_trip() -> Value {
    json!({
        "destination": "Paris",
        "dateRange": {"start": "2025-05-01", "end": "2025-05-04"},
        "travelers": {"adults": 2},
        "budget": "€2,000",
        "travelStyle": "moderate",
        "interests": ["art", "food"],
        "specialRequests": "anniversary"
    })
}

#[tokio::test]
async fn test_health_check() {
    let request = Request::builder().uri("/health").body(Body::empty()).unwrap();

    let (status, body) = send(app(ScriptedProvider::new(vec![]), 1), request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"status": "healthy"}));
}

#[tokio::test]
async fn test_generate_returns_annotated_itinerary() {
    for uri in ["/ai-planner", "/itinerary/generate"] {
        let app = app(ScriptedProvider::replying(PARIS_ITINERARY), 1);

        let (status, body) = send(app, post_json(uri, paris_trip())).await;

        assert_eq!(status, StatusCode::OK, "{}", uri);
        assert_eq!(body["destination"], "Paris");
        assert_eq!(body["model"], MODEL);
        assert!(body["generatedAt"].as_str().is_some_and(|at| !at.is_empty()));
        assert_eq!(body["input"]["travelStyle"], "moderate");
        assert!(body["input"].get("specialRequests").is_none());
    }
}

#[tokio::test]
async fn test_initial_text_answer_carries_metadata() {
    let raw = r#"{"isTextResponse": true, "message": "Cannot plan that.", "hint": "pick a city"}"#;
    let app = app(ScriptedProvider::replying(raw), 1);

    let (status, body) = send(app, post_json("/ai-planner", paris_trip())).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["isTextResponse"], true);
    assert_eq!(body["message"], "Cannot plan that.");
    assert_eq!(body["hint"], "pick a city");
    assert_eq!(body["model"], MODEL);
    assert!(body["generatedAt"].as_str().is_some_and(|at| !at.is_empty()));
    assert_eq!(body["input"]["destination"], "Paris");
}

#[tokio::test]
async fn test_validation_error_is_bad_request() {
    let mut trip = paris_trip();
    trip["travelStyle"] = json!("premium");
    let provider = Arc::new(ScriptedProvider::new(vec![]));
    let app = create_router(Arc::new(Planner::new(Arc::clone(&provider), pool_of(1))));

    let (status, body) = send(app, post_json("/ai-planner", trip)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("premium"));
    assert!(provider.calls().is_empty());
}

#[tokio::test]
async fn test_invalid_json_is_bad_request() {
    let request = Request::builder()
        .method("POST")
        .uri("/ai-planner")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .unwrap();

    let (status, body) = send(app(ScriptedProvider::new(vec![]), 1), request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn test_exhausted_keys_are_service_unavailable() {
    let provider = ScriptedProvider::new(vec![Err(quota_exceeded()), Err(quota_exceeded())]);

    let (status, body) = send(app(provider, 2), post_json("/ai-planner", paris_trip())).await;

    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    let message = body["error"].as_str().unwrap();
    assert!(message.contains("try again later"));
    assert!(!message.contains("key-1"));
}

#[tokio::test]
async fn test_fatal_provider_error_is_service_unavailable() {
    let provider = ScriptedProvider::new(vec![Err(unauthorized())]);

    let (status, _) = send(app(provider, 3), post_json("/ai-planner", paris_trip())).await;

    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn test_malformed_output_is_bad_gateway() {
    let provider = ScriptedProvider::replying("Sorry, I cannot plan that trip.");

    let (status, body) = send(app(provider, 1), post_json("/ai-planner", paris_trip())).await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn test_modification_parse_failure_is_a_text_answer() {
    let mut input = paris_trip();
    input["currentItinerary"] = json!({"summary": "Three days in Paris"});
    input["userSaid"] = json!("Swap the Louvre for Orsay");
    let provider = ScriptedProvider::replying("Sorry, I got confused.");

    let (status, body) = send(app(provider, 1), post_json("/ai-planner", input)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"isTextResponse": true, "message": REPHRASE_MESSAGE}));
}
