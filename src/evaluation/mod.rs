/* src/evaluation/mod.rs */

//!
//! Flag evaluation: the provider seam and the named client bound to it.

mod client;
mod context;
mod details;
mod error;
mod provider;

pub use client::{Client, DetailsResult};
pub use context::EvaluationContext;
pub use details::{EvaluationDetails, Reason, ResolutionDetails};
pub use error::{ErrorCode, EvaluationError};
pub use provider::{FeatureProvider, ProviderMetadata, ResolutionResult};
