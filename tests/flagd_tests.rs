/* tests/flagd_tests.rs */

#![cfg(feature = "flagd")]

use std::sync::{Arc, Mutex};

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::post;
use axum::{Json, Router};
use flagstore::evaluation::ErrorCode;
use flagstore::{ConfigurationStore, GetRequest, Metadata, OpenFeatureStore, StoreError};
use serde_json::{Value, json};

type Seen = Arc<Mutex<Vec<Value>>>;

async fn resolve_boolean(State(seen): State<Seen>, Json(body): Json<Value>) -> Json<Value> {
	seen.lock().unwrap().push(body);
	Json(json!({"value": true, "variant": "on", "reason": "TARGETING_MATCH"}))
}

async fn resolve_int(Json(body): Json<Value>) -> (StatusCode, Json<Value>) {
	if body["flagKey"] == "limit" {
		(StatusCode::OK, Json(json!({"value": "9007199254740993", "variant": "big", "reason": "STATIC"})))
	} else {
		(
			StatusCode::NOT_FOUND,
			Json(json!({"code": "not_found", "message": "flag not found"})),
		)
	}
}

async fn resolve_object(Json(_body): Json<Value>) -> Json<Value> {
	Json(json!({"value": {"bg": "#000"}, "variant": "dark", "reason": "DEFAULT"}))
}

async fn resolve_string(Json(_body): Json<Value>) -> (StatusCode, &'static str) {
	(StatusCode::INTERNAL_SERVER_ERROR, "upstream exploded")
}

/// Starts a fake flagd on a free port and returns the port.
async fn spawn_flagd(seen: Seen) -> u16 {
	let app = Router::new()
		.route("/flagd.evaluation.v1.Service/ResolveBoolean", post(resolve_boolean))
		.route("/flagd.evaluation.v1.Service/ResolveInt", post(resolve_int))
		.route("/flagd.evaluation.v1.Service/ResolveObject", post(resolve_object))
		.route("/flagd.evaluation.v1.Service/ResolveString", post(resolve_string))
		.with_state(seen);
	let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
	let port = listener.local_addr().unwrap().port();
	tokio::spawn(async move {
		axum::serve(listener, app).await.unwrap();
	});
	port
}

async fn store(port: u16) -> OpenFeatureStore {
	let store = OpenFeatureStore::new();
	store
		.init(
			Metadata::new()
				.with("provider", "flagd")
				.with("flagdHost", "127.0.0.1")
				.with("flagdPort", port.to_string()),
		)
		.await
		.unwrap();
	store
}

#[tokio::test]
async fn test_flagd_bool_end_to_end() {
	let seen = Seen::default();
	let store = store(spawn_flagd(seen.clone()).await).await;

	let request = GetRequest::new(["featureX"])
		.with_metadata("featureX_type", "bool")
		.with_metadata("featureX_defaultValue", "false")
		.with_metadata("region", "eu");
	let response = store.get(request).await.unwrap();

	let item = &response.items["featureX"];
	assert_eq!(item.value, "true");
	assert_eq!(item.metadata["flagKey"], "featureX");
	assert_eq!(item.metadata["variant"], "on");
	assert_eq!(item.metadata["reason"], "TARGETING_MATCH");

	let seen = seen.lock().unwrap();
	assert_eq!(seen.len(), 1);
	assert_eq!(seen[0]["flagKey"], "featureX");
	assert_eq!(seen[0]["context"]["region"], "eu");
	assert_eq!(seen[0]["context"]["featureX_type"], "bool");
}

#[tokio::test]
async fn test_flagd_int_as_string() {
	let store = store(spawn_flagd(Seen::default()).await).await;
	let request = GetRequest::new(["limit"])
		.with_metadata("limit_type", "int")
		.with_metadata("limit_defaultValue", "0");
	let response = store.get(request).await.unwrap();
	assert_eq!(response.items["limit"].value, "9007199254740993");
}

#[tokio::test]
async fn test_flagd_not_found() {
	let store = store(spawn_flagd(Seen::default()).await).await;
	let request = GetRequest::new(["other"])
		.with_metadata("other_type", "int")
		.with_metadata("other_defaultValue", "0");
	let err = store.get(request).await.unwrap_err();
	match err {
		StoreError::Evaluation(e) => {
			assert_eq!(e.code, ErrorCode::FlagNotFound);
			assert_eq!(e.message, "flag not found");
		}
		other => panic!("Expected evaluation error, got {other:?}"),
	}
}

#[tokio::test]
async fn test_flagd_object() {
	let store = store(spawn_flagd(Seen::default()).await).await;
	let request = GetRequest::new(["theme"])
		.with_metadata("theme_type", "object")
		.with_metadata("theme_defaultValue", "{}");
	let response = store.get(request).await.unwrap();
	assert_eq!(response.items["theme"].value, r##"{"bg":"#000"}"##);
	assert_eq!(response.items["theme"].metadata["reason"], "DEFAULT");
}

#[tokio::test]
async fn test_flagd_unreachable() {
	// Bind then drop to get a port nobody listens on.
	let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
	let port = listener.local_addr().unwrap().port();
	drop(listener);

	let store = store(port).await;
	let request = GetRequest::new(["featureX"])
		.with_metadata("featureX_type", "bool")
		.with_metadata("featureX_defaultValue", "false");
	let err = store.get(request).await.unwrap_err();
	assert!(matches!(err, StoreError::Evaluation(ref e) if e.code == ErrorCode::ProviderNotReady));
}

#[tokio::test]
async fn test_flagd_plain_error_body() {
	let store = store(spawn_flagd(Seen::default()).await).await;
	let request = GetRequest::new(["banner"])
		.with_metadata("banner_type", "string")
		.with_metadata("banner_defaultValue", "hi");
	let err = store.get(request).await.unwrap_err();
	match err {
		StoreError::Evaluation(e) => {
			assert_eq!(e.code, ErrorCode::General);
			assert!(e.message.contains("500"), "{}", e.message);
			assert!(e.message.contains("banner"), "{}", e.message);
		}
		other => panic!("Expected evaluation error, got {other:?}"),
	}
}
