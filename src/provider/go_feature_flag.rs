/* src/provider/go_feature_flag.rs */

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use url::Url;

use super::GoFeatureFlagOptions;
use super::KEY_GO_FEATURE_FLAG_ENDPOINT;
use super::http::{WireValue, build_client, transport_error};
use crate::error::{Result, StoreError};
use crate::evaluation::{
	ErrorCode, EvaluationContext, EvaluationError, FeatureProvider, ProviderMetadata,
	ResolutionDetails, ResolutionResult,
};

/// Provider backed by a GO Feature Flag relay proxy.
#[derive(Debug, Clone)]
pub struct GoFeatureFlagProvider {
	http: reqwest::Client,
	endpoint: Url,
}

#[derive(Serialize)]
struct EvalRequest<'a> {
	user: User<'a>,
	#[serde(rename = "defaultValue")]
	default_value: Value,
}

#[derive(Serialize)]
struct User<'a> {
	key: &'a str,
	anonymous: bool,
	custom: &'a Map<String, Value>,
}

#[derive(Deserialize)]
struct EvalResponse {
	value: Option<Value>,
	#[serde(rename = "variationType", default)]
	variation_type: String,
	#[serde(default)]
	reason: String,
	#[serde(rename = "errorCode", default)]
	error_code: String,
	#[serde(default)]
	failed: bool,
}

impl GoFeatureFlagProvider {
	pub fn new(options: GoFeatureFlagOptions) -> Result<Self> {
		let endpoint = Url::parse(&options.endpoint)
			.ok()
			.filter(|url| matches!(url.scheme(), "http" | "https") && !url.cannot_be_a_base())
			.ok_or_else(|| StoreError::InvalidMetadata {
				key: KEY_GO_FEATURE_FLAG_ENDPOINT.to_string(),
				value: options.endpoint.clone(),
			})?;
		Ok(Self {
			http: build_client(Some(options.timeout))?,
			endpoint,
		})
	}

	/// `{endpoint}/v1/feature/{flag}/eval`, with the flag key percent-encoded.
	fn eval_url(&self, flag: &str) -> std::result::Result<Url, EvaluationError> {
		let mut url = self.endpoint.clone();
		url.path_segments_mut()
			.map_err(|_| EvaluationError::general("relay proxy endpoint cannot be a base URL"))?
			.pop_if_empty()
			.extend(["v1", "feature", flag, "eval"]);
		Ok(url)
	}

	async fn resolve<T: WireValue>(
		&self,
		flag: &str,
		default: Value,
		ctx: &EvaluationContext,
	) -> ResolutionResult<T> {
		let url = self.eval_url(flag)?;

		#[cfg(feature = "logging")]
		tracing::trace!(%url, flag, "resolving flag with relay proxy");

		let request = EvalRequest {
			user: User {
				key: &ctx.targeting_key,
				anonymous: ctx.targeting_key.is_empty(),
				custom: &ctx.attributes,
			},
			default_value: default,
		};
		let response = self
			.http
			.post(url)
			.json(&request)
			.send()
			.await
			.map_err(|e| transport_error(flag, e))?;

		let status = response.status();
		if status == reqwest::StatusCode::NOT_FOUND {
			return Err(EvaluationError::flag_not_found(flag));
		}
		if !status.is_success() {
			return Err(EvaluationError::general(format!(
				"relay proxy returned {status} for flag {flag}"
			)));
		}

		let body: EvalResponse = response.json().await.map_err(|e| transport_error(flag, e))?;
		if body.failed || !body.error_code.is_empty() {
			let code = if body.error_code.is_empty() {
				ErrorCode::General
			} else {
				ErrorCode::from_code(&body.error_code)
			};
			return Err(EvaluationError::new(
				code,
				format!("evaluating flag {flag} failed: {}", body.reason),
			));
		}

		Ok(ResolutionDetails::new(
			T::decode(flag, body.value)?,
			body.variation_type,
			body.reason,
		))
	}
}

#[async_trait]
impl FeatureProvider for GoFeatureFlagProvider {
	fn metadata(&self) -> ProviderMetadata {
		ProviderMetadata::new("GO Feature Flag")
	}

	async fn resolve_bool_value(
		&self,
		flag: &str,
		default: bool,
		ctx: &EvaluationContext,
	) -> ResolutionResult<bool> {
		self.resolve(flag, Value::Bool(default), ctx).await
	}

	async fn resolve_string_value(
		&self,
		flag: &str,
		default: &str,
		ctx: &EvaluationContext,
	) -> ResolutionResult<String> {
		self.resolve(flag, Value::from(default), ctx).await
	}

	async fn resolve_int_value(
		&self,
		flag: &str,
		default: i64,
		ctx: &EvaluationContext,
	) -> ResolutionResult<i64> {
		self.resolve(flag, Value::from(default), ctx).await
	}

	async fn resolve_float_value(
		&self,
		flag: &str,
		default: f64,
		ctx: &EvaluationContext,
	) -> ResolutionResult<f64> {
		self.resolve(flag, Value::from(default), ctx).await
	}

	async fn resolve_object_value(
		&self,
		flag: &str,
		default: &Value,
		ctx: &EvaluationContext,
	) -> ResolutionResult<Value> {
		self.resolve(flag, default.clone(), ctx).await
	}
}
