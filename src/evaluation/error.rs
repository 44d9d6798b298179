/* src/evaluation/error.rs */

use std::fmt;

/// Machine-readable cause of a failed evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
	ProviderNotReady,
	FlagNotFound,
	ParseError,
	TypeMismatch,
	TargetingKeyMissing,
	InvalidContext,
	General,
}

impl ErrorCode {
	pub fn as_str(&self) -> &'static str {
		match self {
			Self::ProviderNotReady => "PROVIDER_NOT_READY",
			Self::FlagNotFound => "FLAG_NOT_FOUND",
			Self::ParseError => "PARSE_ERROR",
			Self::TypeMismatch => "TYPE_MISMATCH",
			Self::TargetingKeyMissing => "TARGETING_KEY_MISSING",
			Self::InvalidContext => "INVALID_CONTEXT",
			Self::General => "GENERAL",
		}
	}

	/// Maps a wire error code onto the known set, falling back to `General`.
	pub fn from_code(code: &str) -> Self {
		match code {
			"PROVIDER_NOT_READY" => Self::ProviderNotReady,
			"FLAG_NOT_FOUND" => Self::FlagNotFound,
			"PARSE_ERROR" => Self::ParseError,
			"TYPE_MISMATCH" => Self::TypeMismatch,
			"TARGETING_KEY_MISSING" => Self::TargetingKeyMissing,
			"INVALID_CONTEXT" => Self::InvalidContext,
			_ => Self::General,
		}
	}
}

impl fmt::Display for ErrorCode {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

/// Error reported by a provider for a single evaluation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{code}: {message}")]
pub struct EvaluationError {
	pub code: ErrorCode,
	pub message: String,
}

impl EvaluationError {
	pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
		Self {
			code,
			message: message.into(),
		}
	}

	pub fn flag_not_found(flag: &str) -> Self {
		Self::new(ErrorCode::FlagNotFound, format!("flag {flag} not found"))
	}

	pub fn type_mismatch(flag: &str, expected: &str) -> Self {
		Self::new(
			ErrorCode::TypeMismatch,
			format!("flag {flag} is not of type {expected}"),
		)
	}

	pub fn general(message: impl Into<String>) -> Self {
		Self::new(ErrorCode::General, message)
	}
}
