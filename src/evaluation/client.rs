/* src/evaluation/client.rs */

use std::sync::Arc;

use serde_json::Value;

use super::{EvaluationContext, EvaluationDetails, EvaluationError, FeatureProvider};

/// Result of a client evaluation.
pub type DetailsResult<T> = Result<EvaluationDetails<T>, EvaluationError>;

/// A named evaluation client bound to one provider.
#[derive(Clone)]
pub struct Client {
	name: String,
	provider: Arc<dyn FeatureProvider>,
}

impl Client {
	pub fn new(name: impl Into<String>, provider: Arc<dyn FeatureProvider>) -> Self {
		Self {
			name: name.into(),
			provider,
		}
	}

	pub fn name(&self) -> &str {
		&self.name
	}

	pub async fn bool_value_details(
		&self,
		flag: &str,
		default: bool,
		ctx: &EvaluationContext,
	) -> DetailsResult<bool> {
		let res = self.provider.resolve_bool_value(flag, default, ctx).await?;
		Ok(EvaluationDetails::from_resolution(flag, res))
	}

	pub async fn string_value_details(
		&self,
		flag: &str,
		default: &str,
		ctx: &EvaluationContext,
	) -> DetailsResult<String> {
		let res = self.provider.resolve_string_value(flag, default, ctx).await?;
		Ok(EvaluationDetails::from_resolution(flag, res))
	}

	pub async fn int_value_details(
		&self,
		flag: &str,
		default: i64,
		ctx: &EvaluationContext,
	) -> DetailsResult<i64> {
		let res = self.provider.resolve_int_value(flag, default, ctx).await?;
		Ok(EvaluationDetails::from_resolution(flag, res))
	}

	pub async fn float_value_details(
		&self,
		flag: &str,
		default: f64,
		ctx: &EvaluationContext,
	) -> DetailsResult<f64> {
		let res = self.provider.resolve_float_value(flag, default, ctx).await?;
		Ok(EvaluationDetails::from_resolution(flag, res))
	}

	pub async fn object_value_details(
		&self,
		flag: &str,
		default: &Value,
		ctx: &EvaluationContext,
	) -> DetailsResult<Value> {
		let res = self.provider.resolve_object_value(flag, default, ctx).await?;
		Ok(EvaluationDetails::from_resolution(flag, res))
	}
}

impl std::fmt::Debug for Client {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("Client")
			.field("name", &self.name)
			.field("provider", &self.provider.metadata().name)
			.finish()
	}
}
