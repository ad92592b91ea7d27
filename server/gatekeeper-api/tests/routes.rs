//! Route tests for the gatekeeper API (no network: requests go straight to the router).

use axum::{
  body::{to_bytes, Body},
  http::{header, Request, StatusCode},
  Router,
};
use gatekeeper_api::{router, AppState, API_KEY_HEADER};
use gatekeeper_engine::Engine;
use std::sync::Arc;
use tower::ServiceExt;

fn app(api_key: Option<&str>) -> Router {
  let state = AppState::new(Engine::rule_based(), api_key.map(str::to_string));
  router(Arc::new(state))
}

fn analyze_request(body: &str, key: Option<&str>) -> Request<Body> {
  let mut builder = Request::builder()
    .method("POST")
    .uri("/api/analyze")
    .header(header::CONTENT_TYPE, "application/json");
  if let Some(k) = key {
    builder = builder.header(API_KEY_HEADER, k);
  }
  builder.body(Body::from(body.to_string())).unwrap()
}

async fn json_body(resp: axum::response::Response) -> serde_json::Value {
  let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
  serde_json::from_slice(&bytes).unwrap()
}

const BODY: &str = r#"{
  "prNumber": "77",
  "author": "hal",
  "changedFiles": ["src/main/java/com/acme/LoginService.java"],
  "diff": "+ if (user == null) return;\n"
}"#;

#[tokio::test]
async fn health_is_ok() {
  let resp = app(None)
    .oneshot(Request::get("/health").body(Body::empty()).unwrap())
    .await
    .unwrap();
  assert_eq!(resp.status(), StatusCode::OK);
  let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
  assert_eq!(&bytes[..], b"ok");
}

#[tokio::test]
async fn open_endpoint_analyzes_without_key() {
  let resp = app(None).oneshot(analyze_request(BODY, None)).await.unwrap();
  assert_eq!(resp.status(), StatusCode::OK);

  let json = json_body(resp).await;
  assert_eq!(json["prNumber"], "77");
  assert_eq!(json["decision"], "ALLOW");
  assert_eq!(json["suggestionCode"], "ALLOW_LOW_RISK_SAFE");
  assert!(json["groqSuggestion"].is_null());
  assert!(json["spellingSuggestions"].as_array().unwrap().is_empty());
  assert_eq!(
    json["missingTests"][0],
    "Test files are missing for modified source code"
  );
}

#[tokio::test]
async fn configured_secret_must_match() {
  let missing = app(Some("s3cret"))
    .oneshot(analyze_request(BODY, None))
    .await
    .unwrap();
  assert_eq!(missing.status(), StatusCode::UNAUTHORIZED);

  let wrong = app(Some("s3cret"))
    .oneshot(analyze_request(BODY, Some("S3CRET")))
    .await
    .unwrap();
  assert_eq!(wrong.status(), StatusCode::UNAUTHORIZED);

  let right = app(Some("s3cret"))
    .oneshot(analyze_request(BODY, Some("s3cret")))
    .await
    .unwrap();
  assert_eq!(right.status(), StatusCode::OK);
}

#[tokio::test]
async fn blank_secret_leaves_endpoint_open() {
  let resp = app(Some("  ")).oneshot(analyze_request(BODY, None)).await.unwrap();
  assert_eq!(resp.status(), StatusCode::OK);
}

#[tokio::test]
async fn null_fields_are_zero_risk() {
  let resp = app(None)
    .oneshot(analyze_request(
      r#"{"prNumber": null, "changedFiles": null, "diff": null}"#,
      None,
    ))
    .await
    .unwrap();
  assert_eq!(resp.status(), StatusCode::OK);
  let json = json_body(resp).await;
  assert_eq!(json["riskScore"], 0.0);
  assert_eq!(json["riskLevel"], "MINIMAL");
  assert_eq!(json["prStatus"], "✅ APPROVED - Safe to merge");
  assert_eq!(
    json["summary"],
    "PR #unknown by unknown. Changed files: 0. Analysis completed by Gatekeeper."
  );
}

#[tokio::test]
async fn catalog_lists_every_code() {
  let resp = app(Some("s3cret"))
    .oneshot(
      Request::get("/api/suggestion-codes")
        .body(Body::empty())
        .unwrap(),
    )
    .await
    .unwrap();
  assert_eq!(resp.status(), StatusCode::OK);
  let json = json_body(resp).await;
  let entries = json.as_array().unwrap();
  assert_eq!(entries.len(), 12);
  assert!(entries.iter().any(|e| e["code"] == "WARN_SPELLING_ERRORS" && e["decision"] == "WARN"));
}
