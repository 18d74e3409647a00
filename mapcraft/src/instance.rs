//! Live instances and the compilation engine.
//!
//! An instance owns one live mapping from output key to stored slot.
//! Construction hydrates eager defaults, optional bulk values, and an
//! optional configurator closure, in that order; population feeds each
//! incoming value through craft → value transform → key transform →
//! mutation; [`Instance::compile`] materialises the whole tree into a
//! plain, serialisation-ready [`Value`].

use std::sync::Arc;

use serde_json::{Map, Value};

use crate::error::{CraftError, CraftResult};
use crate::option::OptionSpec;
use crate::schema::Schema;
use crate::value::{Slot, SlotMap};

type NoConfigure = fn(&mut Instance) -> CraftResult<()>;

/// One live, exclusively owned set of option values for a schema.
#[derive(Clone, Debug)]
pub struct Instance {
    schema: Arc<Schema>,
    data: SlotMap,
}

impl Instance {
    /// Creates a fresh instance, materialising every eager option's
    /// value-transformed default.
    ///
    /// # Errors
    ///
    /// Returns [`CraftError::UnknownStrategy`] when the schema's effective
    /// transformer names have no registration.
    pub fn new(schema: &Arc<Schema>) -> CraftResult<Self> {
        let mut instance = Self {
            schema: Arc::clone(schema),
            data: SlotMap::new(),
        };
        instance.load_defaults()?;
        Ok(instance)
    }

    /// Creates an instance and feeds each `(option name, raw value)` pair
    /// through [`Instance::set`].
    ///
    /// # Errors
    ///
    /// An undeclared name fails with [`CraftError::UnknownOption`], exactly
    /// as a direct call would.
    pub fn from_values<I, N, V>(schema: &Arc<Schema>, values: I) -> CraftResult<Self>
    where
        I: IntoIterator<Item = (N, V)>,
        N: AsRef<str>,
        V: Into<Value>,
    {
        let mut instance = Self::new(schema)?;
        instance.apply_values(values)?;
        Ok(instance)
    }

    /// Creates an instance and hands it to a configurator closure.
    ///
    /// # Errors
    ///
    /// Propagates construction failures and any error the closure returns.
    pub fn configured<F>(schema: &Arc<Schema>, configure: F) -> CraftResult<Self>
    where
        F: FnOnce(&mut Self) -> CraftResult<()>,
    {
        let mut instance = Self::new(schema)?;
        configure(&mut instance)?;
        Ok(instance)
    }

    /// Full construction: eager defaults, then bulk values, then the
    /// configurator, in that order.
    ///
    /// # Errors
    ///
    /// Propagates failures from any of the three phases.
    pub fn build<I, N, V, F>(schema: &Arc<Schema>, values: I, configure: F) -> CraftResult<Self>
    where
        I: IntoIterator<Item = (N, V)>,
        N: AsRef<str>,
        V: Into<Value>,
        F: FnOnce(&mut Self) -> CraftResult<()>,
    {
        let mut instance = Self::new(schema)?;
        instance.apply_values(values)?;
        configure(&mut instance)?;
        Ok(instance)
    }

    /// The schema this instance was built from.
    #[must_use]
    pub fn schema(&self) -> &Arc<Schema> {
        &self.schema
    }

    /// Sets a declared option to a raw value.
    ///
    /// The value is crafted (for options with a craft schema), transformed
    /// by the effective value transformer, and combined into live state by
    /// the option's mutation strategy under the transformed output key.
    ///
    /// # Errors
    ///
    /// Returns [`CraftError::UnknownOption`] for undeclared names and
    /// propagates transformer resolution and mutation failures.
    pub fn set(&mut self, name: &str, value: impl Into<Value>) -> CraftResult<&mut Self> {
        self.store(name, value.into(), None::<NoConfigure>)
    }

    /// Sets a declared option with a nested configurator, the closure-based
    /// counterpart of block-style sub-object configuration.
    ///
    /// For options with a craft schema the closure receives the nested
    /// instance after its bulk values are applied. For plain options the
    /// closure is ignored.
    ///
    /// # Errors
    ///
    /// As [`Instance::set`], plus any error the closure returns.
    pub fn set_with<F>(
        &mut self,
        name: &str,
        value: impl Into<Value>,
        configure: F,
    ) -> CraftResult<&mut Self>
    where
        F: FnOnce(&mut Self) -> CraftResult<()>,
    {
        self.store(name, value.into(), Some(configure))
    }

    /// Invokes a declared option with no payload, for mutators that ignore
    /// the incoming value (`always_true`, `always_false`).
    ///
    /// # Errors
    ///
    /// As [`Instance::set`].
    pub fn touch(&mut self, name: &str) -> CraftResult<&mut Self> {
        self.set(name, Value::Null)
    }

    /// Stores an already-built compilable instance under a declared option,
    /// bypassing the craft step but not the mutation strategy.
    ///
    /// # Errors
    ///
    /// As [`Instance::set`].
    pub fn set_instance(&mut self, name: &str, nested: Self) -> CraftResult<&mut Self> {
        let option = self.schema.lookup(name)?;
        let key = self.transformed_key(&option)?;
        option.apply(
            self.schema.resolvers(),
            &mut self.data,
            &key,
            Slot::Craft(Box::new(nested)),
        )?;
        Ok(self)
    }

    /// Feeds each `(option name, raw value)` pair through
    /// [`Instance::set`].
    ///
    /// # Errors
    ///
    /// As [`Instance::set`]; the first failure aborts.
    pub fn apply_values<I, N, V>(&mut self, values: I) -> CraftResult<&mut Self>
    where
        I: IntoIterator<Item = (N, V)>,
        N: AsRef<str>,
        V: Into<Value>,
    {
        for (name, value) in values {
            self.set(name.as_ref(), value)?;
        }
        Ok(self)
    }

    /// Compiles live state into a plain nested structure.
    ///
    /// Keys appear in insertion order; nested instances (and lists holding
    /// them) are materialised recursively. Compilation is pure and
    /// repeatable but never cached: mutating the instance between calls
    /// changes the next result.
    #[must_use]
    pub fn compile(&self) -> Value {
        let mut output = Map::new();
        for (key, slot) in &self.data {
            output.insert(key.clone(), slot.compile());
        }
        Value::Object(output)
    }

    /// Compiles and deserialises the result into a typed structure.
    ///
    /// # Errors
    ///
    /// Returns [`CraftError::Deserialize`] when the compiled tree does not
    /// match `T`.
    pub fn compile_into<T: serde::de::DeserializeOwned>(&self) -> CraftResult<T> {
        serde_json::from_value(self.compile()).map_err(|e| CraftError::Deserialize(Box::new(e)))
    }

    /// Writes every eager option's transformed default directly into live
    /// state. Defaults bypass the mutation strategy; later accessor calls
    /// run the mutator against whatever the slot then holds, so `property`
    /// overwrites a default while `array` appends to it.
    fn load_defaults(&mut self) -> CraftResult<()> {
        let eager: Vec<Arc<OptionSpec>> = self
            .schema
            .effective_options()
            .iter()
            .filter(|option| option.eager())
            .cloned()
            .collect();
        for option in eager {
            let key = self.transformed_key(&option)?;
            let value = self.transform_value(option.default().clone(), &option)?;
            self.data.insert(key, Slot::Value(value));
        }
        Ok(())
    }

    fn store<F>(&mut self, name: &str, raw: Value, configure: Option<F>) -> CraftResult<&mut Self>
    where
        F: FnOnce(&mut Self) -> CraftResult<()>,
    {
        let option = self.schema.lookup(name)?;
        let slot = match option.craft_value(raw, configure)? {
            Slot::Value(value) => Slot::Value(self.transform_value(value, &option)?),
            crafted => crafted,
        };
        let key = self.transformed_key(&option)?;
        option.apply(self.schema.resolvers(), &mut self.data, &key, slot)?;
        Ok(self)
    }

    /// Runs the effective value transformer over a plain value.
    fn transform_value(&self, value: Value, option: &OptionSpec) -> CraftResult<Value> {
        let transformer = self
            .schema
            .resolvers()
            .transformers()
            .resolve(self.schema.effective_value_transformer())?;
        Ok(transformer.apply(value, option))
    }

    /// Runs the effective key transformer over the option's output key. A
    /// custom transformer returning a non-string falls back to the
    /// untransformed key.
    fn transformed_key(&self, option: &OptionSpec) -> CraftResult<String> {
        let transformer = self
            .schema
            .resolvers()
            .transformers()
            .resolve(self.schema.effective_key_transformer())?;
        let raw = option.hash_key();
        match transformer.apply(Value::String(raw.to_owned()), option) {
            Value::String(key) => Ok(key),
            _ => Ok(raw.to_owned()),
        }
    }
}
