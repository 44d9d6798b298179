/* src/error.rs */

use crate::evaluation::EvaluationError;

/// Core error type for the configuration store adapter.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
	/// The component metadata has no `provider` entry.
	#[error("no provider defined in metadata")]
	NoProvider,

	/// The `provider` entry names a backend this crate does not know.
	#[error("unrecognized provider {0}")]
	UnrecognizedProvider(String),

	/// The selected provider was compiled out of this build.
	#[error("provider {0} is not enabled in this build")]
	ProviderDisabled(String),

	/// A required component metadata entry is absent.
	#[error("missing required metadata value {key}")]
	MissingMetadata { key: String },

	/// A component metadata entry could not be parsed.
	#[error("could not parse metadata value {key}, {value}")]
	InvalidMetadata { key: String, value: String },

	/// A requested flag lacks one of its companion request metadata entries.
	#[error("required key {field} not found in metadata for flag {flag}")]
	MissingFlagMetadata { field: String, flag: String },

	/// The `<flag>_type` entry is not one of the supported flag types.
	#[error("unsupported type {tag} for flag {flag}")]
	UnsupportedType { tag: String, flag: String },

	/// The `<flag>_defaultValue` entry does not parse as the declared type.
	#[error("invalid default value for flag {flag}: {reason}")]
	InvalidDefault { flag: String, reason: String },

	/// `get` was called before `init` bound a provider.
	#[error("configuration store is not initialized")]
	NotInitialized,

	/// A provider could not be constructed from its options.
	#[error("provider setup failed: {0}")]
	ProviderSetup(String),

	/// Error returned by the evaluation backend, passed through verbatim.
	#[error(transparent)]
	Evaluation(#[from] EvaluationError),
}

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, StoreError>;
