/* src/evaluation/details.rs */

use std::borrow::Cow;
use std::fmt;

/// Provider-supplied explanation of why a value was chosen.
///
/// Values are passed through verbatim; the constants cover the common ones.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Reason(Cow<'static, str>);

impl Reason {
	pub const STATIC: Reason = Reason(Cow::Borrowed("STATIC"));
	pub const DEFAULT: Reason = Reason(Cow::Borrowed("DEFAULT"));
	pub const TARGETING_MATCH: Reason = Reason(Cow::Borrowed("TARGETING_MATCH"));
	pub const SPLIT: Reason = Reason(Cow::Borrowed("SPLIT"));
	pub const CACHED: Reason = Reason(Cow::Borrowed("CACHED"));
	pub const DISABLED: Reason = Reason(Cow::Borrowed("DISABLED"));
	pub const UNKNOWN: Reason = Reason(Cow::Borrowed("UNKNOWN"));
	pub const ERROR: Reason = Reason(Cow::Borrowed("ERROR"));

	pub fn new(reason: impl Into<String>) -> Self {
		Self(Cow::Owned(reason.into()))
	}

	pub fn as_str(&self) -> &str {
		&self.0
	}
}

impl Default for Reason {
	fn default() -> Self {
		Self::UNKNOWN
	}
}

impl fmt::Display for Reason {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.0)
	}
}

impl From<String> for Reason {
	fn from(reason: String) -> Self {
		Self::new(reason)
	}
}

impl From<&str> for Reason {
	fn from(reason: &str) -> Self {
		Self::new(reason)
	}
}

/// What a provider returns for one evaluation.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolutionDetails<T> {
	pub value: T,
	pub variant: String,
	pub reason: Reason,
}

impl<T> ResolutionDetails<T> {
	pub fn new(value: T, variant: impl Into<String>, reason: impl Into<Reason>) -> Self {
		Self {
			value,
			variant: variant.into(),
			reason: reason.into(),
		}
	}
}

/// Resolution details tagged with the flag they were evaluated for.
#[derive(Debug, Clone, PartialEq)]
pub struct EvaluationDetails<T> {
	pub flag_key: String,
	pub value: T,
	pub variant: String,
	pub reason: Reason,
}

impl<T> EvaluationDetails<T> {
	pub(crate) fn from_resolution(flag_key: &str, details: ResolutionDetails<T>) -> Self {
		Self {
			flag_key: flag_key.to_string(),
			value: details.value,
			variant: details.variant,
			reason: details.reason,
		}
	}

	/// Converts the value, keeping key, variant and reason.
	pub fn map<U>(self, f: impl FnOnce(T) -> U) -> EvaluationDetails<U> {
		EvaluationDetails {
			flag_key: self.flag_key,
			value: f(self.value),
			variant: self.variant,
			reason: self.reason,
		}
	}
}
