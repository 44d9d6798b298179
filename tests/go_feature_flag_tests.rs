/* tests/go_feature_flag_tests.rs */

#![cfg(feature = "go-feature-flag")]

use std::time::Duration;

use axum::extract::Path;
use axum::http::StatusCode;
use axum::routing::post;
use axum::{Json, Router};
use flagstore::evaluation::ErrorCode;
use flagstore::{ConfigurationStore, GetRequest, Metadata, OpenFeatureStore, StoreError};
use serde_json::{Value, json};

async fn eval(Path(flag): Path<String>, Json(body): Json<Value>) -> (StatusCode, Json<Value>) {
	match flag.as_str() {
		"banner" => (
			StatusCode::OK,
			Json(json!({
				"value": format!("hello {}", body["user"]["custom"]["name"].as_str().unwrap_or("?")),
				"variationType": "custom",
				"reason": "TARGETING_MATCH",
				"errorCode": "",
				"failed": false,
				"trackEvents": true,
			})),
		),
		"echo-default" => (
			StatusCode::OK,
			Json(json!({
				"value": body["defaultValue"],
				"variationType": "SdkDefault",
				"reason": "DEFAULT",
				"failed": false,
			})),
		),
		"broken" => (
			StatusCode::OK,
			Json(json!({
				"value": null,
				"variationType": "SdkDefault",
				"reason": "ERROR",
				"errorCode": "TYPE_MISMATCH",
				"failed": true,
			})),
		),
		"slow" => {
			tokio::time::sleep(Duration::from_secs(3)).await;
			(StatusCode::OK, Json(json!({"value": true})))
		}
		_ => (StatusCode::NOT_FOUND, Json(json!({}))),
	}
}

async fn spawn_relay() -> String {
	let app = Router::new().route("/v1/feature/{flag}/eval", post(eval));
	let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
	let addr = listener.local_addr().unwrap();
	tokio::spawn(async move {
		axum::serve(listener, app).await.unwrap();
	});
	format!("http://{addr}")
}

async fn store(endpoint: &str) -> OpenFeatureStore {
	let store = OpenFeatureStore::new();
	store
		.init(
			Metadata::new()
				.with("provider", "goFeatureFlag")
				.with("goFeatureFlagEndpoint", endpoint),
		)
		.await
		.unwrap();
	store
}

#[tokio::test]
async fn test_relay_string_with_context() {
	let store = store(&spawn_relay().await).await;
	let request = GetRequest::new(["banner"])
		.with_metadata("banner_type", "string")
		.with_metadata("banner_defaultValue", "hi")
		.with_metadata("name", "bob");
	let item = &store.get(request).await.unwrap().items["banner"];
	assert_eq!(item.value, "hello bob");
	assert_eq!(item.metadata["variant"], "custom");
	assert_eq!(item.metadata["reason"], "TARGETING_MATCH");
}

#[tokio::test]
async fn test_relay_receives_parsed_default() {
	let store = store(&spawn_relay().await).await;
	let request = GetRequest::new(["echo-default"])
		.with_metadata("echo-default_type", "float")
		.with_metadata("echo-default_defaultValue", "2.25");
	let item = &store.get(request).await.unwrap().items["echo-default"];
	assert_eq!(item.value, "2.25");
	assert_eq!(item.metadata["reason"], "DEFAULT");
}

#[tokio::test]
async fn test_relay_failed_evaluation() {
	let store = store(&spawn_relay().await).await;
	let request = GetRequest::new(["broken"])
		.with_metadata("broken_type", "bool")
		.with_metadata("broken_defaultValue", "true");
	let err = store.get(request).await.unwrap_err();
	assert!(matches!(err, StoreError::Evaluation(ref e) if e.code == ErrorCode::TypeMismatch));
}

#[tokio::test]
async fn test_relay_unknown_flag() {
	let store = store(&spawn_relay().await).await;
	let request = GetRequest::new(["nope"])
		.with_metadata("nope_type", "int")
		.with_metadata("nope_defaultValue", "3");
	let err = store.get(request).await.unwrap_err();
	assert!(matches!(err, StoreError::Evaluation(ref e) if e.code == ErrorCode::FlagNotFound));
}

#[tokio::test]
async fn test_relay_timeout() {
	let store = store(&spawn_relay().await).await;
	let request = GetRequest::new(["slow"])
		.with_metadata("slow_type", "bool")
		.with_metadata("slow_defaultValue", "false");

	let started = std::time::Instant::now();
	let err = store.get(request).await.unwrap_err();
	assert!(started.elapsed() < Duration::from_secs(3));
	assert!(matches!(err, StoreError::Evaluation(ref e) if e.code == ErrorCode::ProviderNotReady));
}
