//! Router tests for studiod, driven through tower's `oneshot` with a fake provider.

use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use axum::Router;
use std::sync::Arc;
use studio_common::{FakeLlmClient, LlmError, PanelState, Studio, FAILURE_MESSAGE};
use studiod::routes::GenerateResponse;
use studiod::server::{router, AppState};
use tower::ServiceExt;

fn app(fake: &Arc<FakeLlmClient>) -> Router {
    let state = AppState::new(Studio::new(fake.clone()), "gpt-4o-mini");
    router(state, 64 * 1024)
}

async fn body_string(response: axum::response::Response) -> String {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

fn json_request(body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/v1/generate")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

#[tokio::test]
async fn test_index_shows_placeholder() {
    let fake = Arc::new(FakeLlmClient::always("unused"));
    let response = app(&fake)
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let html = body_string(response).await;
    assert!(html.contains("Your result will appear here after you click Generate."));
    assert!(html.contains("Mode: <strong>Rewrite</strong>"));
    assert_eq!(fake.call_count(), 0);
}

#[tokio::test]
async fn test_form_submit_renders_filled_panel() {
    let fake = Arc::new(FakeLlmClient::always("Thank you for your time — it means a lot."));
    let response = app(&fake)
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/")
                .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
                .body(Body::from(
                    "mode=Rewrite&text=Thanks+for+your+time.&tone=Confident&length=Medium",
                ))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let html = body_string(response).await;
    assert!(html.contains("panel-output-filled"));
    assert!(html.contains("Thank you for your time, it means a lot."));
    assert!(html.contains(">Thanks for your time.</textarea>"));
    assert_eq!(fake.call_count(), 1);
}

#[tokio::test]
async fn test_form_submit_blank_text_asks_for_text() {
    let fake = Arc::new(FakeLlmClient::always("unused"));
    let response = app(&fake)
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/")
                .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
                .body(Body::from("mode=Summarize&text=+++&length=Short"))
                .unwrap(),
        )
        .await
        .unwrap();

    let html = body_string(response).await;
    assert!(html.contains("Please add some text first."));
    assert!(html.contains("Length: Short"));
    assert_eq!(fake.call_count(), 0);
}

#[tokio::test]
async fn test_json_generate_success() {
    let fake = Arc::new(FakeLlmClient::always("A  short , summary"));
    let response = app(&fake)
        .oneshot(json_request(serde_json::json!({
            "mode": "Summarize",
            "text": "Some long text to summarize.",
            "length": "Short"
        })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json: serde_json::Value = serde_json::from_str(&body_string(response).await).unwrap();
    assert_eq!(json["state"], "filled");
    assert_eq!(json["text"], "A short, summary");
    assert_eq!(json["mode"], "Summarize");
    assert_eq!(json["parameter"], "Length: Short");
    assert!(json.get("message").is_none());

    let calls = fake.calls();
    assert_eq!(calls[0].temperature, 0.5);
}

#[tokio::test]
async fn test_json_generate_blank_is_unprocessable() {
    let fake = Arc::new(FakeLlmClient::always("unused"));
    let response = app(&fake)
        .oneshot(json_request(serde_json::json!({"mode": "Rewrite", "text": ""})))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let json: serde_json::Value = serde_json::from_str(&body_string(response).await).unwrap();
    assert_eq!(json["state"], "error");
    assert_eq!(json["message"], "Please add some text first.");
    assert_eq!(fake.call_count(), 0);
}

#[tokio::test]
async fn test_json_generate_provider_failure() {
    let fake = Arc::new(FakeLlmClient::always_error(LlmError::Unauthorized(401)));
    let app = app(&fake);

    let response = app
        .clone()
        .oneshot(json_request(serde_json::json!({"text": "hello"})))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    let json: serde_json::Value = serde_json::from_str(&body_string(response).await).unwrap();
    assert_eq!(json["state"], "error");
    assert_eq!(json["message"], FAILURE_MESSAGE);
    assert!(json["diagnostic"].as_str().unwrap().contains("401"));

    // the server keeps serving after a failure
    let response = app
        .oneshot(Request::builder().uri("/v1/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_health() {
    let fake = Arc::new(FakeLlmClient::always("unused"));
    let response = app(&fake)
        .oneshot(Request::builder().uri("/v1/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    let json: serde_json::Value = serde_json::from_str(&body_string(response).await).unwrap();
    assert_eq!(json["status"], "ok");
    assert_eq!(json["model"], "gpt-4o-mini");
}

#[tokio::test]
async fn test_oversized_body_rejected() {
    let fake = Arc::new(FakeLlmClient::always("unused"));
    let text = "a".repeat(128 * 1024);
    let response = app(&fake)
        .oneshot(json_request(serde_json::json!({"text": text})))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
    assert_eq!(fake.call_count(), 0);
}

#[tokio::test]
async fn test_json_generate_state_matches_panel() {
    let fake = Arc::new(FakeLlmClient::always(""));
    let response = app(&fake)
        .oneshot(json_request(serde_json::json!({"text": "hello"})))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let reply: GenerateResponse = serde_json::from_str(&body_string(response).await).unwrap();
    assert_eq!(reply.state, PanelState::Placeholder);
    assert!(reply.panel_html.contains("output-placeholder"));
}
