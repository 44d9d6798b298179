/* src/provider/flagd.rs */

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::FlagdOptions;
use super::http::{WireValue, build_client, transport_error};
use crate::error::Result;
use crate::evaluation::{
	ErrorCode, EvaluationContext, EvaluationError, FeatureProvider, ProviderMetadata,
	ResolutionDetails, ResolutionResult,
};

const SERVICE_PATH: &str = "flagd.evaluation.v1.Service";

/// Provider backed by a flagd daemon, spoken to over its HTTP/JSON interface.
#[derive(Debug, Clone)]
pub struct FlagdProvider {
	http: reqwest::Client,
	base_url: String,
}

#[derive(Serialize)]
struct ResolveRequest<'a> {
	#[serde(rename = "flagKey")]
	flag_key: &'a str,
	context: &'a EvaluationContext,
}

#[derive(Deserialize)]
struct ResolveResponse {
	value: Option<Value>,
	#[serde(default)]
	reason: String,
	#[serde(default)]
	variant: String,
}

#[derive(Deserialize)]
struct ConnectError {
	#[serde(default)]
	code: String,
	#[serde(default)]
	message: String,
}

impl FlagdProvider {
	pub fn new(options: FlagdOptions) -> Result<Self> {
		Ok(Self {
			http: build_client(None)?,
			base_url: format!("http://{}:{}", options.host(), options.port()),
		})
	}

	pub fn base_url(&self) -> &str {
		&self.base_url
	}

	async fn resolve<T: WireValue>(
		&self,
		method: &str,
		flag: &str,
		ctx: &EvaluationContext,
	) -> ResolutionResult<T> {
		let url = format!("{}/{}/{}", self.base_url, SERVICE_PATH, method);

		#[cfg(feature = "logging")]
		tracing::trace!(%url, flag, "resolving flag with flagd");

		let response = self
			.http
			.post(url)
			.json(&ResolveRequest { flag_key: flag, context: ctx })
			.send()
			.await
			.map_err(|e| transport_error(flag, e))?;

		if !response.status().is_success() {
			let status = response.status();
			return Err(match response.text().await {
				Ok(body) => match serde_json::from_str::<ConnectError>(&body) {
					Ok(err) => EvaluationError::new(connect_code(&err.code), err.message),
					Err(_) => EvaluationError::general(format!(
						"flagd returned {status} for flag {flag}"
					)),
				},
				Err(e) => EvaluationError::general(format!(
					"flagd returned {status} for flag {flag}, body unreadable: {e}"
				)),
			});
		}

		let body: ResolveResponse = response.json().await.map_err(|e| transport_error(flag, e))?;
		Ok(ResolutionDetails::new(
			T::decode(flag, body.value)?,
			body.variant,
			body.reason,
		))
	}
}

/// Maps a Connect protocol error code onto an evaluation error code.
fn connect_code(code: &str) -> ErrorCode {
	match code {
		"not_found" => ErrorCode::FlagNotFound,
		"invalid_argument" => ErrorCode::TypeMismatch,
		"data_loss" => ErrorCode::ParseError,
		"unavailable" => ErrorCode::ProviderNotReady,
		_ => ErrorCode::General,
	}
}

#[async_trait]
impl FeatureProvider for FlagdProvider {
	fn metadata(&self) -> ProviderMetadata {
		ProviderMetadata::new("flagd")
	}

	async fn resolve_bool_value(
		&self,
		flag: &str,
		_default: bool,
		ctx: &EvaluationContext,
	) -> ResolutionResult<bool> {
		self.resolve("ResolveBoolean", flag, ctx).await
	}

	async fn resolve_string_value(
		&self,
		flag: &str,
		_default: &str,
		ctx: &EvaluationContext,
	) -> ResolutionResult<String> {
		self.resolve("ResolveString", flag, ctx).await
	}

	async fn resolve_int_value(
		&self,
		flag: &str,
		_default: i64,
		ctx: &EvaluationContext,
	) -> ResolutionResult<i64> {
		self.resolve("ResolveInt", flag, ctx).await
	}

	async fn resolve_float_value(
		&self,
		flag: &str,
		_default: f64,
		ctx: &EvaluationContext,
	) -> ResolutionResult<f64> {
		self.resolve("ResolveFloat", flag, ctx).await
	}

	async fn resolve_object_value(
		&self,
		flag: &str,
		_default: &Value,
		ctx: &EvaluationContext,
	) -> ResolutionResult<Value> {
		self.resolve("ResolveObject", flag, ctx).await
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_base_url_defaults() {
		let provider = FlagdProvider::new(FlagdOptions::default()).unwrap();
		assert_eq!(provider.base_url(), "http://localhost:8013");

		let provider = FlagdProvider::new(FlagdOptions {
			host: Some("flagd".into()),
			port: Some(9000),
		})
		.unwrap();
		assert_eq!(provider.base_url(), "http://flagd:9000");
	}

	#[test]
	fn test_connect_codes() {
		assert_eq!(connect_code("not_found"), ErrorCode::FlagNotFound);
		assert_eq!(connect_code("invalid_argument"), ErrorCode::TypeMismatch);
		assert_eq!(connect_code("internal"), ErrorCode::General);
	}
}
