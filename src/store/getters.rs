/* src/store/getters.rs */

use std::collections::HashMap;

use crate::configuration::Item;
use crate::error::Result;
use crate::evaluation::{Client, EvaluationContext, EvaluationDetails};
use crate::flag::{FlagType, FlagValue};

pub const META_FLAG_KEY: &str = "flagKey";
pub const META_VARIANT: &str = "variant";
pub const META_REASON: &str = "reason";

/// Parses `default` as `flag_type`, evaluates `flag` and encodes the result.
///
/// The default is parsed before the provider is called, so a malformed default
/// never reaches the backend.
pub(super) async fn evaluate(
	client: &Client,
	flag_type: FlagType,
	flag: &str,
	ctx: &EvaluationContext,
	default: &str,
) -> Result<Item> {
	let details = match FlagValue::parse_default(flag_type, flag, default)? {
		FlagValue::Bool(d) => client
			.bool_value_details(flag, d, ctx)
			.await?
			.map(FlagValue::Bool),
		FlagValue::String(d) => client
			.string_value_details(flag, &d, ctx)
			.await?
			.map(FlagValue::String),
		FlagValue::Int(d) => client
			.int_value_details(flag, d, ctx)
			.await?
			.map(FlagValue::Int),
		FlagValue::Float(d) => client
			.float_value_details(flag, d, ctx)
			.await?
			.map(FlagValue::Float),
		FlagValue::Object(d) => client
			.object_value_details(flag, &d, ctx)
			.await?
			.map(FlagValue::Object),
	};
	Ok(into_item(details))
}

fn into_item(details: EvaluationDetails<FlagValue>) -> Item {
	Item {
		value: details.value.encode(),
		version: String::new(),
		metadata: HashMap::from([
			(META_FLAG_KEY.to_string(), details.flag_key),
			(META_VARIANT.to_string(), details.variant),
			(META_REASON.to_string(), details.reason.to_string()),
		]),
	}
}
