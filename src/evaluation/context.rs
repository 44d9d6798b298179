/* src/evaluation/context.rs */

use std::collections::HashMap;

use serde::Serialize;
use serde_json::{Map, Value};

/// Request-scoped attributes a provider uses for targeting.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct EvaluationContext {
	#[serde(rename = "targetingKey", skip_serializing_if = "String::is_empty")]
	pub targeting_key: String,
	#[serde(flatten)]
	pub attributes: Map<String, Value>,
}

impl EvaluationContext {
	pub fn new(targeting_key: impl Into<String>) -> Self {
		Self {
			targeting_key: targeting_key.into(),
			attributes: Map::new(),
		}
	}

	/// Adds one attribute.
	pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
		self.attributes.insert(key.into(), value.into());
		self
	}

	/// Copies every metadata pair verbatim as a string attribute, with no targeting key.
	pub fn from_metadata(metadata: &HashMap<String, String>) -> Self {
		let attributes = metadata
			.iter()
			.map(|(k, v)| (k.clone(), Value::String(v.clone())))
			.collect();
		Self {
			targeting_key: String::new(),
			attributes,
		}
	}
}
