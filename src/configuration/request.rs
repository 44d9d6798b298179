/* src/configuration/request.rs */

use std::collections::HashMap;

/// A single configuration value returned to the host.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Item {
	/// String-encoded value.
	pub value: String,
	/// Version of the value. Flag providers do not version, so this stays empty.
	pub version: String,
	/// Per-item attributes such as `flagKey`, `variant` and `reason`.
	pub metadata: HashMap<String, String>,
}

/// Point-in-time read of a batch of keys.
#[derive(Debug, Clone, Default)]
pub struct GetRequest {
	pub keys: Vec<String>,
	pub metadata: HashMap<String, String>,
}

impl GetRequest {
	pub fn new<I, K>(keys: I) -> Self
	where
		I: IntoIterator<Item = K>,
		K: Into<String>,
	{
		Self {
			keys: keys.into_iter().map(Into::into).collect(),
			metadata: HashMap::new(),
		}
	}

	/// Adds a request metadata entry.
	pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
		self.metadata.insert(key.into(), value.into());
		self
	}
}

/// Items keyed by the requested key.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GetResponse {
	pub items: HashMap<String, Item>,
}

#[derive(Debug, Clone, Default)]
pub struct SubscribeRequest {
	pub keys: Vec<String>,
	pub metadata: HashMap<String, String>,
}

#[derive(Debug, Clone, Default)]
pub struct UnsubscribeRequest {
	pub id: String,
}

/// Change notification delivered to an [`UpdateHandler`](super::UpdateHandler).
#[derive(Debug, Clone, Default)]
pub struct UpdateEvent {
	pub id: String,
	pub items: HashMap<String, Item>,
}
