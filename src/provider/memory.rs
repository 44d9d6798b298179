/* src/provider/memory.rs */

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use arc_swap::ArcSwap;
use async_trait::async_trait;
use serde_json::Value;

use crate::evaluation::{
	EvaluationContext, EvaluationError, FeatureProvider, ProviderMetadata, Reason,
	ResolutionDetails, ResolutionResult,
};
use crate::flag::FlagValue;

/// Picks a variant from the evaluation context, or `None` to use the default variant.
pub type TargetingFn = Arc<dyn Fn(&EvaluationContext) -> Option<String> + Send + Sync>;

/// A flag definition held by [`InMemoryProvider`].
#[derive(Clone)]
pub struct InMemoryFlag {
	pub variants: HashMap<String, FlagValue>,
	pub default_variant: String,
	pub targeting: Option<TargetingFn>,
}

impl InMemoryFlag {
	/// A flag with a single variant that is always served.
	pub fn fixed(variant: impl Into<String>, value: FlagValue) -> Self {
		let variant = variant.into();
		Self {
			variants: HashMap::from([(variant.clone(), value)]),
			default_variant: variant,
			targeting: None,
		}
	}

	pub fn with_variant(mut self, variant: impl Into<String>, value: FlagValue) -> Self {
		self.variants.insert(variant.into(), value);
		self
	}

	pub fn with_targeting(
		mut self,
		targeting: impl Fn(&EvaluationContext) -> Option<String> + Send + Sync + 'static,
	) -> Self {
		self.targeting = Some(Arc::new(targeting));
		self
	}
}

impl std::fmt::Debug for InMemoryFlag {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("InMemoryFlag")
			.field("variants", &self.variants)
			.field("default_variant", &self.default_variant)
			.field("targeting", &self.targeting.is_some())
			.finish()
	}
}

/// A provider serving flags from memory, useful for testing and embedded hosts.
///
/// Flags can be replaced while evaluations are in flight; readers see either the
/// old or the new definition, never a mix.
#[derive(Default)]
pub struct InMemoryProvider {
	flags: ArcSwap<HashMap<String, InMemoryFlag>>,
	evaluations: AtomicU64,
}

impl InMemoryProvider {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn with_flag(self, key: impl Into<String>, flag: InMemoryFlag) -> Self {
		self.set_flag(key, flag);
		self
	}

	/// Inserts or replaces a flag definition.
	pub fn set_flag(&self, key: impl Into<String>, flag: InMemoryFlag) {
		let key = key.into();
		self.flags.rcu(|current| {
			let mut next = HashMap::clone(current);
			next.insert(key.clone(), flag.clone());
			next
		});
	}

	/// Removes a flag definition, returning whether it existed.
	pub fn remove_flag(&self, key: &str) -> bool {
		let mut existed = false;
		self.flags.rcu(|current| {
			let mut next = HashMap::clone(current);
			existed = next.remove(key).is_some();
			next
		});
		existed
	}

	/// Number of resolutions attempted so far.
	pub fn evaluations(&self) -> u64 {
		self.evaluations.load(Ordering::Relaxed)
	}

	fn resolve(&self, flag: &str, ctx: &EvaluationContext) -> ResolutionResult<FlagValue> {
		self.evaluations.fetch_add(1, Ordering::Relaxed);

		let flags = self.flags.load();
		let definition = flags
			.get(flag)
			.ok_or_else(|| EvaluationError::flag_not_found(flag))?;

		let targeted = definition.targeting.as_ref().and_then(|select| select(ctx));
		let (variant, reason) = match targeted {
			Some(variant) => (variant, Reason::TARGETING_MATCH),
			None => (definition.default_variant.clone(), Reason::STATIC),
		};
		let value = definition.variants.get(&variant).cloned().ok_or_else(|| {
			EvaluationError::general(format!("flag {flag} has no variant {variant}"))
		})?;
		Ok(ResolutionDetails::new(value, variant, reason))
	}
}

impl std::fmt::Debug for InMemoryProvider {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("InMemoryProvider")
			.field("flags", &self.flags.load().len())
			.field("evaluations", &self.evaluations())
			.finish()
	}
}

macro_rules! typed {
	($details:expr, $flag:expr, $variant:ident, $name:literal) => {{
		let details = $details;
		match details.value {
			FlagValue::$variant(value) => Ok(ResolutionDetails::new(value, details.variant, details.reason)),
			_ => Err(EvaluationError::type_mismatch($flag, $name)),
		}
	}};
}

#[async_trait]
impl FeatureProvider for InMemoryProvider {
	fn metadata(&self) -> ProviderMetadata {
		ProviderMetadata::new("in-memory")
	}

	async fn resolve_bool_value(
		&self,
		flag: &str,
		_default: bool,
		ctx: &EvaluationContext,
	) -> ResolutionResult<bool> {
		typed!(self.resolve(flag, ctx)?, flag, Bool, "bool")
	}

	async fn resolve_string_value(
		&self,
		flag: &str,
		_default: &str,
		ctx: &EvaluationContext,
	) -> ResolutionResult<String> {
		typed!(self.resolve(flag, ctx)?, flag, String, "string")
	}

	async fn resolve_int_value(
		&self,
		flag: &str,
		_default: i64,
		ctx: &EvaluationContext,
	) -> ResolutionResult<i64> {
		typed!(self.resolve(flag, ctx)?, flag, Int, "int")
	}

	async fn resolve_float_value(
		&self,
		flag: &str,
		_default: f64,
		ctx: &EvaluationContext,
	) -> ResolutionResult<f64> {
		typed!(self.resolve(flag, ctx)?, flag, Float, "float")
	}

	async fn resolve_object_value(
		&self,
		flag: &str,
		_default: &Value,
		ctx: &EvaluationContext,
	) -> ResolutionResult<Value> {
		typed!(self.resolve(flag, ctx)?, flag, Object, "object")
	}
}
