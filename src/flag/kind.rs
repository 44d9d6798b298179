/* src/flag/kind.rs */

use std::fmt;
use std::str::FromStr;

/// The declared type of a flag, read from `<flag>_type`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FlagType {
	Bool,
	String,
	Int,
	Float,
	Object,
}

impl FlagType {
	pub fn as_str(&self) -> &'static str {
		match self {
			Self::Bool => "bool",
			Self::String => "string",
			Self::Int => "int",
			Self::Float => "float",
			Self::Object => "object",
		}
	}
}

impl fmt::Display for FlagType {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

/// Returned when a type tag names no known flag type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownFlagType(pub String);

impl FromStr for FlagType {
	type Err = UnknownFlagType;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s {
			"bool" => Ok(Self::Bool),
			"string" => Ok(Self::String),
			"int" => Ok(Self::Int),
			"float" => Ok(Self::Float),
			"object" => Ok(Self::Object),
			other => Err(UnknownFlagType(other.to_string())),
		}
	}
}
