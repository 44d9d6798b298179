/* src/provider/mod.rs */

//!
//! Provider selection from component metadata, plus the concrete providers.
//!
//! - [`FlagdProvider`] - flagd evaluation service reachable by host and port
//! - [`GoFeatureFlagProvider`] - GO Feature Flag relay proxy behind an HTTP endpoint
//! - [`InMemoryProvider`] - flags held in process

#[cfg(feature = "flagd")]
mod flagd;
#[cfg(feature = "go-feature-flag")]
mod go_feature_flag;
#[cfg(any(feature = "flagd", feature = "go-feature-flag"))]
mod http;
mod memory;
mod settings;

#[cfg(feature = "flagd")]
pub use flagd::FlagdProvider;
#[cfg(feature = "go-feature-flag")]
pub use go_feature_flag::GoFeatureFlagProvider;
pub use memory::{InMemoryFlag, InMemoryProvider, TargetingFn};
pub use settings::{
	DEFAULT_FLAGD_HOST, DEFAULT_FLAGD_PORT, DEFAULT_GO_FEATURE_FLAG_TIMEOUT, FlagdOptions,
	GoFeatureFlagOptions, KEY_FLAGD_HOST, KEY_FLAGD_PORT, KEY_GO_FEATURE_FLAG_ENDPOINT,
	KEY_GO_FEATURE_FLAG_TIMEOUT, KEY_PROVIDER, ProviderSettings, ProviderType,
};

use std::sync::Arc;

use crate::configuration::Metadata;
use crate::error::Result;
use crate::evaluation::FeatureProvider;

/// Builds the provider named by the `provider` metadata entry.
pub fn select_provider(metadata: &Metadata) -> Result<Arc<dyn FeatureProvider>> {
	let settings = ProviderSettings::from_metadata(metadata)?;

	#[cfg(feature = "logging")]
	tracing::debug!(provider = %settings.provider_type(), "selecting feature flag provider");

	settings.build()
}

impl ProviderSettings {
	/// Constructs the provider these settings describe.
	pub fn build(self) -> Result<Arc<dyn FeatureProvider>> {
		match self {
			#[cfg(feature = "flagd")]
			Self::Flagd(options) => Ok(Arc::new(FlagdProvider::new(options)?)),
			#[cfg(feature = "go-feature-flag")]
			Self::GoFeatureFlag(options) => Ok(Arc::new(GoFeatureFlagProvider::new(options)?)),
			#[allow(unreachable_patterns)]
			other => Err(crate::error::StoreError::ProviderDisabled(
				other.provider_type().to_string(),
			)),
		}
	}
}
