/* src/provider/settings.rs */

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use crate::configuration::Metadata;
use crate::error::{Result, StoreError};

pub const KEY_PROVIDER: &str = "provider";
pub const KEY_FLAGD_HOST: &str = "flagdHost";
pub const KEY_FLAGD_PORT: &str = "flagdPort";
pub const KEY_GO_FEATURE_FLAG_ENDPOINT: &str = "goFeatureFlagEndpoint";
pub const KEY_GO_FEATURE_FLAG_TIMEOUT: &str = "goFeatureFlagTimeout";

pub const DEFAULT_FLAGD_HOST: &str = "localhost";
pub const DEFAULT_FLAGD_PORT: u16 = 8013;
pub const DEFAULT_GO_FEATURE_FLAG_TIMEOUT: Duration = Duration::from_secs(1);

/// The supported evaluation backends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProviderType {
	Flagd,
	GoFeatureFlag,
}

impl ProviderType {
	pub fn as_str(&self) -> &'static str {
		match self {
			Self::Flagd => "flagd",
			Self::GoFeatureFlag => "goFeatureFlag",
		}
	}
}

impl fmt::Display for ProviderType {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

impl FromStr for ProviderType {
	type Err = StoreError;

	fn from_str(s: &str) -> Result<Self> {
		match s {
			"flagd" => Ok(Self::Flagd),
			"goFeatureFlag" => Ok(Self::GoFeatureFlag),
			other => Err(StoreError::UnrecognizedProvider(other.to_string())),
		}
	}
}

/// Options for the flagd provider. Unset fields fall back to the flagd defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FlagdOptions {
	pub host: Option<String>,
	pub port: Option<u16>,
}

impl FlagdOptions {
	pub fn host(&self) -> &str {
		self.host.as_deref().unwrap_or(DEFAULT_FLAGD_HOST)
	}

	pub fn port(&self) -> u16 {
		self.port.unwrap_or(DEFAULT_FLAGD_PORT)
	}
}

/// Options for the GO Feature Flag relay proxy provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GoFeatureFlagOptions {
	pub endpoint: String,
	/// HTTP timeout. Zero disables the timeout.
	pub timeout: Duration,
}

impl GoFeatureFlagOptions {
	pub fn new(endpoint: impl Into<String>) -> Self {
		Self {
			endpoint: endpoint.into(),
			timeout: DEFAULT_GO_FEATURE_FLAG_TIMEOUT,
		}
	}
}

/// Provider choice parsed from component metadata.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProviderSettings {
	Flagd(FlagdOptions),
	GoFeatureFlag(GoFeatureFlagOptions),
}

impl ProviderSettings {
	pub fn from_metadata(metadata: &Metadata) -> Result<Self> {
		let provider = metadata.get(KEY_PROVIDER).ok_or(StoreError::NoProvider)?;
		match provider.parse::<ProviderType>()? {
			ProviderType::Flagd => Ok(Self::Flagd(FlagdOptions {
				host: metadata.get(KEY_FLAGD_HOST).map(str::to_string),
				port: parse_optional::<u16>(metadata, KEY_FLAGD_PORT)?,
			})),
			ProviderType::GoFeatureFlag => {
				let endpoint = metadata.require(KEY_GO_FEATURE_FLAG_ENDPOINT)?;
				let timeout = parse_optional::<u64>(metadata, KEY_GO_FEATURE_FLAG_TIMEOUT)?
					.map(Duration::from_secs)
					.unwrap_or(DEFAULT_GO_FEATURE_FLAG_TIMEOUT);
				Ok(Self::GoFeatureFlag(GoFeatureFlagOptions {
					endpoint: endpoint.to_string(),
					timeout,
				}))
			}
		}
	}

	pub fn provider_type(&self) -> ProviderType {
		match self {
			Self::Flagd(_) => ProviderType::Flagd,
			Self::GoFeatureFlag(_) => ProviderType::GoFeatureFlag,
		}
	}
}

fn parse_optional<T: FromStr>(metadata: &Metadata, key: &str) -> Result<Option<T>> {
	metadata
		.get(key)
		.map(|raw| {
			raw.parse::<T>().map_err(|_| StoreError::InvalidMetadata {
				key: key.to_string(),
				value: raw.to_string(),
			})
		})
		.transpose()
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_missing_provider() {
		let err = ProviderSettings::from_metadata(&Metadata::new()).unwrap_err();
		assert!(matches!(err, StoreError::NoProvider));
	}

	#[test]
	fn test_unrecognized_provider() {
		let meta = Metadata::new().with(KEY_PROVIDER, "launchdarkly");
		let err = ProviderSettings::from_metadata(&meta).unwrap_err();
		assert_eq!(err.to_string(), "unrecognized provider launchdarkly");
	}

	#[test]
	fn test_flagd_without_options_uses_defaults() {
		let meta = Metadata::new().with(KEY_PROVIDER, "flagd");
		let settings = ProviderSettings::from_metadata(&meta).unwrap();
		let ProviderSettings::Flagd(options) = settings else {
			panic!("Expected flagd settings");
		};
		assert_eq!(options, FlagdOptions::default());
		assert_eq!(options.host(), "localhost");
		assert_eq!(options.port(), 8013);
	}

	#[test]
	fn test_flagd_host_and_port() {
		let meta = Metadata::new()
			.with(KEY_PROVIDER, "flagd")
			.with(KEY_FLAGD_HOST, "flagd.internal")
			.with(KEY_FLAGD_PORT, "9090");
		let settings = ProviderSettings::from_metadata(&meta).unwrap();
		assert_eq!(
			settings,
			ProviderSettings::Flagd(FlagdOptions {
				host: Some("flagd.internal".into()),
				port: Some(9090),
			})
		);
	}

	#[test]
	fn test_flagd_port_must_fit_u16() {
		for bad in ["70000", "-1", "http"] {
			let meta = Metadata::new()
				.with(KEY_PROVIDER, "flagd")
				.with(KEY_FLAGD_PORT, bad);
			let err = ProviderSettings::from_metadata(&meta).unwrap_err();
			assert_eq!(
				err.to_string(),
				format!("could not parse metadata value flagdPort, {bad}")
			);
		}
	}

	#[test]
	fn test_go_feature_flag_requires_endpoint() {
		let meta = Metadata::new().with(KEY_PROVIDER, "goFeatureFlag");
		let err = ProviderSettings::from_metadata(&meta).unwrap_err();
		assert!(matches!(err, StoreError::MissingMetadata { ref key } if key == KEY_GO_FEATURE_FLAG_ENDPOINT));
	}

	#[test]
	fn test_go_feature_flag_timeout() {
		let meta = Metadata::new()
			.with(KEY_PROVIDER, "goFeatureFlag")
			.with(KEY_GO_FEATURE_FLAG_ENDPOINT, "http://relay:1031");
		let ProviderSettings::GoFeatureFlag(options) = ProviderSettings::from_metadata(&meta).unwrap()
		else {
			panic!("Expected goFeatureFlag settings");
		};
		assert_eq!(options.timeout, Duration::from_secs(1));

		let meta = meta.with(KEY_GO_FEATURE_FLAG_TIMEOUT, "5");
		let ProviderSettings::GoFeatureFlag(options) = ProviderSettings::from_metadata(&meta).unwrap()
		else {
			panic!("Expected goFeatureFlag settings");
		};
		assert_eq!(options.timeout, Duration::from_secs(5));
	}

	#[test]
	fn test_go_feature_flag_timeout_ignores_flagd_port() {
		let meta = Metadata::new()
			.with(KEY_PROVIDER, "goFeatureFlag")
			.with(KEY_GO_FEATURE_FLAG_ENDPOINT, "http://relay:1031")
			.with(KEY_FLAGD_PORT, "not-a-number");
		let ProviderSettings::GoFeatureFlag(options) = ProviderSettings::from_metadata(&meta).unwrap()
		else {
			panic!("Expected goFeatureFlag settings");
		};
		assert_eq!(options.timeout, DEFAULT_GO_FEATURE_FLAG_TIMEOUT);
	}

	#[test]
	fn test_go_feature_flag_bad_timeout() {
		let meta = Metadata::new()
			.with(KEY_PROVIDER, "goFeatureFlag")
			.with(KEY_GO_FEATURE_FLAG_ENDPOINT, "http://relay:1031")
			.with(KEY_GO_FEATURE_FLAG_TIMEOUT, "1s");
		let err = ProviderSettings::from_metadata(&meta).unwrap_err();
		assert_eq!(
			err.to_string(),
			"could not parse metadata value goFeatureFlagTimeout, 1s"
		);
	}
}
