/* src/configuration/mod.rs */

//!
//! The generic key/value configuration store contract.

mod metadata;
mod request;

pub use metadata::Metadata;
pub use request::{GetRequest, GetResponse, Item, SubscribeRequest, UnsubscribeRequest, UpdateEvent};

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;

use crate::error::Result;

/// Receives pushed configuration changes.
#[async_trait]
pub trait UpdateHandler: Send + Sync {
	async fn on_update(&self, event: UpdateEvent) -> Result<()>;
}

/// A pluggable configuration store as seen by the host.
#[async_trait]
pub trait ConfigurationStore: Send + Sync {
	/// Binds the store to its backend using component metadata.
	async fn init(&self, metadata: Metadata) -> Result<()>;

	/// Reads the requested keys.
	async fn get(&self, request: GetRequest) -> Result<GetResponse>;

	/// Static descriptor of the component.
	fn component_metadata(&self) -> HashMap<String, String>;

	/// Registers `handler` for changes to the requested keys, returning a subscription id.
	async fn subscribe(
		&self,
		request: SubscribeRequest,
		handler: Arc<dyn UpdateHandler>,
	) -> Result<String>;

	/// Cancels a subscription.
	async fn unsubscribe(&self, request: UnsubscribeRequest) -> Result<()>;
}
