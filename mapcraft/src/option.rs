//! Option descriptors: one declarable, configurable field on a schema.

use std::sync::Arc;

use indexmap::IndexMap;
use serde_json::{Map, Value};
use uncased::{Uncased, UncasedStr};

use crate::dictionary::Keyed;
use crate::error::{CraftError, CraftResult};
use crate::instance::Instance;
use crate::mutate::MutatorRef;
use crate::registry::Resolvers;
use crate::schema::Schema;
use crate::value::{Slot, SlotMap};

/// Shared configuration bag for declaring one or more options.
///
/// A single config can declare several options at once via
/// [`crate::SchemaBuilder::options`]; every field is optional and defaults
/// to the plainest behaviour (no explicit key, `null` default, not eager,
/// default mutator, no craft schema, empty metadata).
#[derive(Clone, Debug, Default)]
pub struct OptionConfig {
    key: Option<String>,
    default: Value,
    eager: bool,
    mutator: Option<MutatorRef>,
    craft: Option<Arc<Schema>>,
    meta: IndexMap<Uncased<'static>, Value>,
}

impl OptionConfig {
    /// Creates an empty configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the output key, overriding the option name.
    #[must_use]
    pub fn key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }

    /// Sets the default value.
    #[must_use]
    pub fn default_value(mut self, value: impl Into<Value>) -> Self {
        self.default = value.into();
        self
    }

    /// Marks the option eager: its default is written into every fresh
    /// instance even when the caller never sets it.
    #[must_use]
    pub fn eager(mut self) -> Self {
        self.eager = true;
        self
    }

    /// Chooses the mutation strategy, by name or as a concrete strategy.
    #[must_use]
    pub fn mutator(mut self, mutator: impl Into<MutatorRef>) -> Self {
        self.mutator = Some(mutator.into());
        self
    }

    /// Configures a craft schema: raw values for this option are wrapped in
    /// a nested instance of `schema` so closures can configure sub-objects.
    #[must_use]
    pub fn craft(mut self, schema: Arc<Schema>) -> Self {
        self.craft = Some(schema);
        self
    }

    /// Adds a metadata entry for custom transformers to consult.
    #[must_use]
    pub fn meta(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.meta.insert(Uncased::from(key.into()), value.into());
        self
    }
}

/// Immutable descriptor of one declared option.
#[derive(Debug)]
pub struct OptionSpec {
    name: String,
    key: Option<String>,
    default: Value,
    eager: bool,
    mutator: Option<MutatorRef>,
    craft: Option<Arc<Schema>>,
    meta: IndexMap<Uncased<'static>, Value>,
}

impl Keyed for OptionSpec {
    fn dictionary_key(&self) -> &str {
        &self.name
    }
}

impl OptionSpec {
    /// Builds a descriptor from a name and a shared configuration.
    ///
    /// # Errors
    ///
    /// Returns [`CraftError::EmptyOptionName`] when `name` is empty.
    pub fn new(name: impl Into<String>, config: OptionConfig) -> CraftResult<Self> {
        let name = name.into();
        if name.is_empty() {
            return Err(CraftError::EmptyOptionName);
        }
        Ok(Self {
            name,
            key: config.key,
            default: config.default,
            eager: config.eager,
            mutator: config.mutator,
            craft: config.craft,
            meta: config.meta,
        })
    }

    /// The option's declared name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The output key: the explicit key when one was configured, else the
    /// option name.
    #[must_use]
    pub fn hash_key(&self) -> &str {
        self.key.as_deref().unwrap_or(&self.name)
    }

    /// The configured default value.
    #[must_use]
    pub fn default(&self) -> &Value {
        &self.default
    }

    /// Whether the default is materialised eagerly at construction.
    #[must_use]
    pub fn eager(&self) -> bool {
        self.eager
    }

    /// The configured mutation strategy, if any (`None` means the registry
    /// default).
    #[must_use]
    pub fn mutator(&self) -> Option<&MutatorRef> {
        self.mutator.as_ref()
    }

    /// The craft schema for nested sub-objects, if configured.
    #[must_use]
    pub fn craft(&self) -> Option<&Arc<Schema>> {
        self.craft.as_ref()
    }

    /// Looks up a metadata entry, ignoring key case.
    #[must_use]
    pub fn meta(&self, key: &str) -> Option<&Value> {
        self.meta.get(UncasedStr::new(key))
    }

    /// Wraps a raw value for storage.
    ///
    /// With a craft schema configured, the raw value must be an object (or
    /// `null`) of initial option values; a nested instance is built from it
    /// and the optional configurator. Without one, the raw value passes
    /// through unchanged and any configurator is ignored.
    ///
    /// # Errors
    ///
    /// Propagates nested construction failures, and rejects non-object raw
    /// values when a craft schema is configured.
    pub fn craft_value<F>(&self, raw: Value, configure: Option<F>) -> CraftResult<Slot>
    where
        F: FnOnce(&mut Instance) -> CraftResult<()>,
    {
        let Some(schema) = &self.craft else {
            if configure.is_some() {
                tracing::debug!(
                    option = %self.name,
                    "configurator ignored for option without a craft schema"
                );
            }
            return Ok(Slot::Value(raw));
        };
        let values = match raw {
            Value::Object(map) => map,
            Value::Null => Map::new(),
            _ => {
                return Err(CraftError::Mutation {
                    key: self.name.clone(),
                    message: "craft values must be an object".to_owned(),
                });
            }
        };
        let mut nested = Instance::from_values(schema, values)?;
        if let Some(configure) = configure {
            configure(&mut nested)?;
        }
        Ok(Slot::Craft(Box::new(nested)))
    }

    /// Resolves the configured mutator (or the default) and applies it to
    /// the slot at `key`.
    ///
    /// # Errors
    ///
    /// Returns [`CraftError::UnknownStrategy`] for an unresolvable mutator
    /// name and propagates mutation shape clashes.
    pub fn apply(
        &self,
        resolvers: &Resolvers,
        data: &mut SlotMap,
        key: &str,
        value: Slot,
    ) -> CraftResult<()> {
        let mutator = resolvers.mutators().resolve(self.mutator.as_ref())?;
        mutator.mutate(data, key, value)
    }
}

#[cfg(test)]
mod tests;
