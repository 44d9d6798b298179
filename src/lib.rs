/* src/lib.rs */

//!
//! Serves feature flags through a generic key/value configuration store.
//!
//! The crate is built from four parts:
//!
//! - **configuration**: The host-facing store contract ([`ConfigurationStore`]).
//! - **evaluation**: The provider seam ([`FeatureProvider`]) and the named [`Client`].
//! - **provider**: Selection from metadata and the concrete providers.
//! - **store**: [`OpenFeatureStore`], turning typed requests into evaluations.
//!
//! ## Feature Flags
//!
//! - `full`: Enables all features (default).
//! - `flagd`: The flagd provider.
//! - `go-feature-flag`: The GO Feature Flag relay proxy provider.
//! - `logging`: `tracing` events for provider selection and evaluation.
//!
//! ## Request Shape
//!
//! Each requested key `k` needs two request metadata entries: `k_type`
//! (`bool`, `string`, `int`, `float` or `object`) and `k_defaultValue`.
//! The whole request metadata is also passed to the provider as the
//! evaluation context.

pub mod configuration;
pub mod error;
pub mod evaluation;
pub mod flag;
pub mod provider;
pub mod store;

pub use configuration::{ConfigurationStore, GetRequest, GetResponse, Item, Metadata};
pub use error::{Result, StoreError};
pub use evaluation::{Client, EvaluationContext, FeatureProvider};
pub use flag::{FlagType, FlagValue};
pub use provider::{InMemoryFlag, InMemoryProvider, select_provider};
pub use store::OpenFeatureStore;
