/* src/flag/mod.rs */

//!
//! Flag types and the string encoding used across the store boundary.

mod kind;
mod value;

pub use kind::{FlagType, UnknownFlagType};
pub use value::{FlagValue, parse_bool};

/// Suffix of the request metadata entry carrying a flag's type.
pub const TYPE_SUFFIX: &str = "_type";
/// Suffix of the request metadata entry carrying a flag's default value.
pub const DEFAULT_VALUE_SUFFIX: &str = "_defaultValue";
