/* src/evaluation/provider.rs */

use async_trait::async_trait;
use serde_json::Value;

use super::{EvaluationContext, EvaluationError, ResolutionDetails};

/// Result of a single provider resolution.
pub type ResolutionResult<T> = Result<ResolutionDetails<T>, EvaluationError>;

/// Describes a provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderMetadata {
	pub name: String,
}

impl ProviderMetadata {
	pub fn new(name: impl Into<String>) -> Self {
		Self { name: name.into() }
	}
}

/// A backend that performs flag evaluation.
///
/// Implementations must tolerate concurrent resolution calls.
#[async_trait]
pub trait FeatureProvider: Send + Sync {
	fn metadata(&self) -> ProviderMetadata;

	async fn resolve_bool_value(
		&self,
		flag: &str,
		default: bool,
		ctx: &EvaluationContext,
	) -> ResolutionResult<bool>;

	async fn resolve_string_value(
		&self,
		flag: &str,
		default: &str,
		ctx: &EvaluationContext,
	) -> ResolutionResult<String>;

	async fn resolve_int_value(
		&self,
		flag: &str,
		default: i64,
		ctx: &EvaluationContext,
	) -> ResolutionResult<i64>;

	async fn resolve_float_value(
		&self,
		flag: &str,
		default: f64,
		ctx: &EvaluationContext,
	) -> ResolutionResult<f64>;

	/// Resolves a structured value. `default` is always a JSON object.
	async fn resolve_object_value(
		&self,
		flag: &str,
		default: &Value,
		ctx: &EvaluationContext,
	) -> ResolutionResult<Value>;
}
