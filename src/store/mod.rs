/* src/store/mod.rs */

//!
//! The configuration store adapter serving feature flags.

mod getters;

pub use getters::{META_FLAG_KEY, META_REASON, META_VARIANT};

use std::collections::HashMap;
use std::sync::Arc;

use arc_swap::ArcSwapOption;
use async_trait::async_trait;

use crate::configuration::{
	ConfigurationStore, GetRequest, GetResponse, Metadata, SubscribeRequest, UnsubscribeRequest,
	UpdateHandler,
};
use crate::error::{Result, StoreError};
use crate::evaluation::{Client, EvaluationContext, FeatureProvider};
use crate::flag::{DEFAULT_VALUE_SUFFIX, FlagType, TYPE_SUFFIX, UnknownFlagType};
use crate::provider::select_provider;

/// Fixed name of the evaluation client owned by the store.
pub const CLIENT_NAME: &str = "dapr";

/// Configuration store that answers reads with feature flag evaluations.
///
/// The store owns its provider; separate instances can be bound to different
/// providers in one process.
#[derive(Default)]
pub struct OpenFeatureStore {
	client: ArcSwapOption<Client>,
}

impl OpenFeatureStore {
	/// Creates a store with no provider. Call [`ConfigurationStore::init`] before reading.
	pub fn new() -> Self {
		Self::default()
	}

	/// Creates a store already bound to `provider`.
	pub fn with_provider(provider: Arc<dyn FeatureProvider>) -> Self {
		let store = Self::new();
		store.bind(provider);
		store
	}

	/// Replaces the bound provider. Reads in flight finish against the old one.
	pub fn bind(&self, provider: Arc<dyn FeatureProvider>) {
		#[cfg(feature = "logging")]
		tracing::debug!(
			client = CLIENT_NAME,
			provider = %provider.metadata().name,
			"binding feature flag provider"
		);

		self.client
			.store(Some(Arc::new(Client::new(CLIENT_NAME, provider))));
	}

	/// Returns the bound client, if any.
	pub fn client(&self) -> Option<Arc<Client>> {
		self.client.load_full()
	}

	pub fn is_initialized(&self) -> bool {
		self.client.load().is_some()
	}
}

/// Looks up the companion metadata entry `<flag><suffix>`.
fn flag_metadata<'a>(
	metadata: &'a HashMap<String, String>,
	flag: &str,
	suffix: &str,
) -> Result<&'a str> {
	let field = format!("{flag}{suffix}");
	match metadata.get(&field) {
		Some(value) => Ok(value.as_str()),
		None => Err(StoreError::MissingFlagMetadata {
			field,
			flag: flag.to_string(),
		}),
	}
}

#[async_trait]
impl ConfigurationStore for OpenFeatureStore {
	async fn init(&self, metadata: Metadata) -> Result<()> {
		let provider = select_provider(&metadata)?;
		self.bind(provider);
		Ok(())
	}

	async fn get(&self, request: GetRequest) -> Result<GetResponse> {
		let client = self.client().ok_or(StoreError::NotInitialized)?;
		let ctx = EvaluationContext::from_metadata(&request.metadata);

		let mut items = HashMap::with_capacity(request.keys.len());
		for key in &request.keys {
			let tag = flag_metadata(&request.metadata, key, TYPE_SUFFIX)?;
			let default = flag_metadata(&request.metadata, key, DEFAULT_VALUE_SUFFIX)?;
			let flag_type = tag
				.parse::<FlagType>()
				.map_err(|UnknownFlagType(tag)| StoreError::UnsupportedType {
					tag,
					flag: key.clone(),
				})?;

			#[cfg(feature = "logging")]
			tracing::trace!(flag = %key, %flag_type, "evaluating flag");

			let item = getters::evaluate(&client, flag_type, key, &ctx, default).await?;
			items.insert(key.clone(), item);
		}

		Ok(GetResponse { items })
	}

	fn component_metadata(&self) -> HashMap<String, String> {
		HashMap::from([("name".to_string(), CLIENT_NAME.to_string())])
	}

	async fn subscribe(
		&self,
		_request: SubscribeRequest,
		_handler: Arc<dyn UpdateHandler>,
	) -> Result<String> {
		// Flag providers are only read on demand; there is nothing to push.
		Ok(String::new())
	}

	async fn unsubscribe(&self, _request: UnsubscribeRequest) -> Result<()> {
		Ok(())
	}
}

impl std::fmt::Debug for OpenFeatureStore {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("OpenFeatureStore")
			.field("client", &self.client.load().as_deref())
			.finish()
	}
}
