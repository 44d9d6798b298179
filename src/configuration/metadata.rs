/* src/configuration/metadata.rs */

use std::collections::HashMap;

use crate::error::{Result, StoreError};

/// Flat string properties handed to a store at initialization.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Metadata {
	pub properties: HashMap<String, String>,
}

impl Metadata {
	/// Creates empty metadata.
	pub fn new() -> Self {
		Self::default()
	}

	/// Adds a property, returning the updated metadata.
	pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
		self.properties.insert(key.into(), value.into());
		self
	}

	/// Returns the property stored under `key`, if any.
	pub fn get(&self, key: &str) -> Option<&str> {
		self.properties.get(key).map(String::as_str)
	}

	/// Returns the property stored under `key` or a `MissingMetadata` error.
	pub fn require(&self, key: &str) -> Result<&str> {
		self.get(key).ok_or_else(|| StoreError::MissingMetadata {
			key: key.to_string(),
		})
	}
}

impl From<HashMap<String, String>> for Metadata {
	fn from(properties: HashMap<String, String>) -> Self {
		Self { properties }
	}
}

impl<K, V> FromIterator<(K, V)> for Metadata
where
	K: Into<String>,
	V: Into<String>,
{
	fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
		Self {
			properties: iter
				.into_iter()
				.map(|(k, v)| (k.into(), v.into()))
				.collect(),
		}
	}
}
