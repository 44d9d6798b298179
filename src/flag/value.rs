/* src/flag/value.rs */

use serde_json::{Map, Value};

use super::FlagType;
use crate::error::{Result, StoreError};

/// A typed flag value, as parsed from a default or returned by a provider.
#[derive(Debug, Clone, PartialEq)]
pub enum FlagValue {
	Bool(bool),
	String(String),
	Int(i64),
	Float(f64),
	/// Any JSON value. Defaults are always objects.
	Object(Value),
}

impl FlagValue {
	/// Parses the string-encoded default of `flag` as `ty`.
	pub fn parse_default(ty: FlagType, flag: &str, raw: &str) -> Result<Self> {
		let invalid = |reason: String| StoreError::InvalidDefault {
			flag: flag.to_string(),
			reason,
		};
		match ty {
			FlagType::Bool => parse_bool(raw)
				.map(Self::Bool)
				.ok_or_else(|| invalid(format!("invalid boolean {raw:?}"))),
			FlagType::String => Ok(Self::String(raw.to_string())),
			FlagType::Int => raw
				.parse::<i64>()
				.map(Self::Int)
				.map_err(|e| invalid(format!("invalid integer {raw:?}: {e}"))),
			FlagType::Float => {
				let value = raw
					.parse::<f64>()
					.map_err(|e| invalid(format!("invalid float {raw:?}: {e}")))?;
				if value.is_infinite() && !is_infinity_literal(raw) {
					return Err(invalid(format!("float {raw:?} out of range")));
				}
				Ok(Self::Float(value))
			}
			// `null` stands for an empty object; any other non-object shape is rejected.
			FlagType::Object => match serde_json::from_str::<Value>(raw) {
				Ok(Value::Null) => Ok(Self::Object(Value::Object(Map::new()))),
				Ok(value @ Value::Object(_)) => Ok(Self::Object(value)),
				Ok(other) => Err(invalid(format!("expected a JSON object, got {other}"))),
				Err(e) => Err(invalid(e.to_string())),
			},
		}
	}

	pub fn flag_type(&self) -> FlagType {
		match self {
			Self::Bool(_) => FlagType::Bool,
			Self::String(_) => FlagType::String,
			Self::Int(_) => FlagType::Int,
			Self::Float(_) => FlagType::Float,
			Self::Object(_) => FlagType::Object,
		}
	}

	/// Canonical string encoding handed back to the host.
	pub fn encode(&self) -> String {
		match self {
			Self::Bool(v) => v.to_string(),
			Self::String(v) => v.clone(),
			Self::Int(v) => v.to_string(),
			// Shortest representation that parses back to the same f64.
			Self::Float(v) => v.to_string(),
			Self::Object(v) => v.to_string(),
		}
	}
}

/// Whether `raw` spells infinity outright rather than overflowing to it.
fn is_infinity_literal(raw: &str) -> bool {
	let digits = raw.strip_prefix(['+', '-']).unwrap_or(raw);
	digits.eq_ignore_ascii_case("inf") || digits.eq_ignore_ascii_case("infinity")
}

/// Locale-free boolean parsing accepting the usual spellings.
pub fn parse_bool(raw: &str) -> Option<bool> {
	match raw {
		"1" | "t" | "T" | "true" | "TRUE" | "True" => Some(true),
		"0" | "f" | "F" | "false" | "FALSE" | "False" => Some(false),
		_ => None,
	}
}
