/* src/provider/http.rs */

use std::time::Duration;

use serde_json::Value;

use crate::error::{Result, StoreError};
use crate::evaluation::{ErrorCode, EvaluationError};

/// Builds the HTTP client shared by the remote providers. A zero timeout disables it.
pub(crate) fn build_client(timeout: Option<Duration>) -> Result<reqwest::Client> {
	let mut builder = reqwest::Client::builder();
	if let Some(timeout) = timeout.filter(|t| !t.is_zero()) {
		builder = builder.timeout(timeout);
	}
	builder
		.build()
		.map_err(|e| StoreError::ProviderSetup(e.to_string()))
}

/// Maps a transport failure onto an evaluation error.
pub(crate) fn transport_error(flag: &str, error: reqwest::Error) -> EvaluationError {
	let code = if error.is_connect() || error.is_timeout() {
		ErrorCode::ProviderNotReady
	} else if error.is_decode() {
		ErrorCode::ParseError
	} else {
		ErrorCode::General
	};
	EvaluationError::new(code, format!("evaluating flag {flag}: {error}"))
}

/// Conversion from a JSON wire value into a typed flag value.
pub(crate) trait WireValue: Sized {
	const TYPE: &'static str;

	/// Value assumed when the wire omits the field.
	fn absent() -> Self;

	fn from_wire(value: Value) -> Option<Self>;

	fn decode(flag: &str, value: Option<Value>) -> std::result::Result<Self, EvaluationError> {
		match value {
			None | Some(Value::Null) => Ok(Self::absent()),
			Some(v) => Self::from_wire(v).ok_or_else(|| EvaluationError::type_mismatch(flag, Self::TYPE)),
		}
	}
}

impl WireValue for bool {
	const TYPE: &'static str = "bool";

	fn absent() -> Self {
		false
	}

	fn from_wire(value: Value) -> Option<Self> {
		value.as_bool()
	}
}

impl WireValue for String {
	const TYPE: &'static str = "string";

	fn absent() -> Self {
		String::new()
	}

	fn from_wire(value: Value) -> Option<Self> {
		match value {
			Value::String(s) => Some(s),
			_ => None,
		}
	}
}

impl WireValue for i64 {
	const TYPE: &'static str = "int";

	fn absent() -> Self {
		0
	}

	// 64-bit integers travel as strings in proto3 JSON.
	fn from_wire(value: Value) -> Option<Self> {
		match value {
			Value::Number(n) => n.as_i64(),
			Value::String(s) => s.parse().ok(),
			_ => None,
		}
	}
}

impl WireValue for f64 {
	const TYPE: &'static str = "float";

	fn absent() -> Self {
		0.0
	}

	fn from_wire(value: Value) -> Option<Self> {
		match value {
			Value::Number(n) => n.as_f64(),
			Value::String(s) => s.parse().ok(),
			_ => None,
		}
	}
}

impl WireValue for Value {
	const TYPE: &'static str = "object";

	fn absent() -> Self {
		Value::Object(serde_json::Map::new())
	}

	fn from_wire(value: Value) -> Option<Self> {
		Some(value)
	}
}
