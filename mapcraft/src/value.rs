//! Slots: the tagged storage form of live instance state.

use indexmap::IndexMap;
use serde_json::Value;

use crate::instance::Instance;

/// Live instance state: output key → slot, in insertion order.
pub type SlotMap = IndexMap<String, Slot>;

/// One stored value in an instance's live state.
///
/// A slot is either a plain JSON value, a nested compilable instance
/// produced by a craft schema, or a list mixing both (built by the array
/// mutators). [`Slot::compile`] materialises the slot recursively.
#[derive(Clone, Debug)]
pub enum Slot {
    /// A plain JSON value, stored as-is.
    Value(Value),
    /// A nested instance, compiled recursively on materialisation.
    Craft(Box<Instance>),
    /// A list whose elements may themselves be plain or crafted.
    List(Vec<Slot>),
}

impl Slot {
    /// Materialises this slot into a plain JSON value, recursively
    /// compiling nested instances.
    #[must_use]
    pub fn compile(&self) -> Value {
        match self {
            Self::Value(value) => value.clone(),
            Self::Craft(instance) => instance.compile(),
            Self::List(items) => Value::Array(items.iter().map(Self::compile).collect()),
        }
    }
}

impl From<Value> for Slot {
    fn from(value: Value) -> Self {
        Self::Value(value)
    }
}

impl From<Instance> for Slot {
    fn from(instance: Instance) -> Self {
        Self::Craft(Box::new(instance))
    }
}
