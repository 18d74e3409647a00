//! Key and value transformation strategies.
//!
//! A transformer reshapes a key or value on its way into the compiled
//! output. Strategies receive the owning [`OptionSpec`] so custom
//! transformers can branch on option metadata. The built-in catalogue
//! mirrors the two common casing conventions plus the identity default.

use std::sync::Arc;

use serde_json::Value;

use crate::option::OptionSpec;
use crate::registry::{DEFAULT_NAME, Registry, StrategyRef};

/// A named or concrete reference to a transformation strategy.
pub type TransformerRef = StrategyRef<dyn Transform>;

/// A pure key/value reshaping strategy.
pub trait Transform: Send + Sync {
    /// Reshapes `value` for the given option.
    fn apply(&self, value: Value, option: &OptionSpec) -> Value;
}

impl std::fmt::Debug for dyn Transform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("dyn Transform")
    }
}

impl<F> Transform for F
where
    F: Fn(Value, &OptionSpec) -> Value + Send + Sync,
{
    fn apply(&self, value: Value, option: &OptionSpec) -> Value {
        self(value, option)
    }
}

/// Identity transformation, also registered as the default entry.
fn pass_thru(value: Value, _option: &OptionSpec) -> Value {
    value
}

/// `frank_rizzo` → `frankRizzo`. Non-string values pass through unchanged.
fn camel_case(value: Value, _option: &OptionSpec) -> Value {
    match value {
        Value::String(s) => Value::String(lower_first(&pascalise(&s))),
        other => other,
    }
}

/// `frank_rizzo` → `FrankRizzo`. Non-string values pass through unchanged.
fn pascal_case(value: Value, _option: &OptionSpec) -> Value {
    match value {
        Value::String(s) => Value::String(pascalise(&s)),
        other => other,
    }
}

fn pascalise(input: &str) -> String {
    input.split('_').map(capitalise).collect()
}

/// Upper-cases the first character and lower-cases the remainder.
fn capitalise(segment: &str) -> String {
    let mut chars = segment.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

fn lower_first(input: &str) -> String {
    let mut chars = input.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// The built-in transformer catalogue: `pass_thru`, `camel_case`,
/// `pascal_case`, with `pass_thru` doubling as the default entry.
pub(crate) fn built_in() -> Registry<dyn Transform> {
    let mut registry = Registry::new("transformer");
    registry.register(DEFAULT_NAME, Arc::new(pass_thru) as Arc<dyn Transform>);
    registry.register("pass_thru", Arc::new(pass_thru) as Arc<dyn Transform>);
    registry.register("camel_case", Arc::new(camel_case) as Arc<dyn Transform>);
    registry.register("pascal_case", Arc::new(pascal_case) as Arc<dyn Transform>);
    registry
}
