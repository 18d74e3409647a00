//! Value mutation strategies.
//!
//! A mutator decides how an incoming value combines with whatever an
//! instance's live state already holds at an output key: overwrite it,
//! append it to a list, merge it into a map, or force a boolean. Mutators
//! operate on [`Slot`]s so appended elements may themselves be nested
//! compilable instances.

use std::sync::Arc;

use serde_json::{Map, Value};

use crate::error::{CraftError, CraftResult};
use crate::registry::{DEFAULT_NAME, Registry, StrategyRef};
use crate::value::{Slot, SlotMap};

/// A named or concrete reference to a mutation strategy.
pub type MutatorRef = StrategyRef<dyn Mutate>;

/// A strategy combining an incoming value into live instance state.
pub trait Mutate: Send + Sync {
    /// Mutates the slot at `key` in place with the incoming `value`.
    ///
    /// # Errors
    ///
    /// Returns [`CraftError::Mutation`] when the existing slot or the
    /// incoming value has the wrong shape for this strategy.
    fn mutate(&self, data: &mut SlotMap, key: &str, value: Slot) -> CraftResult<()>;
}

impl<F> Mutate for F
where
    F: Fn(&mut SlotMap, &str, Slot) -> CraftResult<()> + Send + Sync,
{
    fn mutate(&self, data: &mut SlotMap, key: &str, value: Slot) -> CraftResult<()> {
        self(data, key, value)
    }
}

/// Returns the slot at `key` as a mutable list, creating an empty list when
/// the slot is absent and promoting an eagerly defaulted plain JSON array
/// to the slot-list form.
fn list_slot<'a>(data: &'a mut SlotMap, key: &str) -> CraftResult<&'a mut Vec<Slot>> {
    let slot = data
        .entry(key.to_owned())
        .or_insert_with(|| Slot::List(Vec::new()));
    if let Slot::Value(Value::Array(items)) = slot {
        let items = std::mem::take(items);
        *slot = Slot::List(items.into_iter().map(Slot::Value).collect());
    }
    match slot {
        Slot::List(items) => Ok(items),
        _ => Err(CraftError::Mutation {
            key: key.to_owned(),
            message: "existing value is not a list".to_owned(),
        }),
    }
}

/// Returns the slot at `key` as a mutable JSON object, creating an empty
/// object when the slot is absent.
fn object_slot<'a>(data: &'a mut SlotMap, key: &str) -> CraftResult<&'a mut Map<String, Value>> {
    let slot = data
        .entry(key.to_owned())
        .or_insert_with(|| Slot::Value(Value::Object(Map::new())));
    match slot {
        Slot::Value(Value::Object(map)) => Ok(map),
        _ => Err(CraftError::Mutation {
            key: key.to_owned(),
            message: "existing value is not an object".to_owned(),
        }),
    }
}

/// Overwrite the slot. This is also the default mutator.
fn property(data: &mut SlotMap, key: &str, value: Slot) -> CraftResult<()> {
    data.insert(key.to_owned(), value);
    Ok(())
}

/// Ensure the slot is a list and append the incoming value.
fn array(data: &mut SlotMap, key: &str, value: Slot) -> CraftResult<()> {
    list_slot(data, key)?.push(value);
    Ok(())
}

/// Ensure the slot is a list; splice in the elements of an incoming list,
/// otherwise append. Flattens exactly one level.
fn flat_array(data: &mut SlotMap, key: &str, value: Slot) -> CraftResult<()> {
    let items = list_slot(data, key)?;
    match value {
        Slot::Value(Value::Array(values)) => items.extend(values.into_iter().map(Slot::Value)),
        Slot::List(slots) => items.extend(slots),
        other => items.push(other),
    }
    Ok(())
}

/// Ensure the slot is a JSON object and shallow-merge an incoming object
/// into it. `null` merges nothing (the slot still becomes an empty object
/// when previously absent).
fn hash(data: &mut SlotMap, key: &str, value: Slot) -> CraftResult<()> {
    let incoming = match value {
        Slot::Value(Value::Object(map)) => map,
        Slot::Value(Value::Null) => Map::new(),
        _ => {
            return Err(CraftError::Mutation {
                key: key.to_owned(),
                message: "hash mutator expects an object".to_owned(),
            });
        }
    };
    let target = object_slot(data, key)?;
    for (field, value) in incoming {
        target.insert(field, value);
    }
    Ok(())
}

/// Ignore the incoming value and store `true`.
fn always_true(data: &mut SlotMap, key: &str, _value: Slot) -> CraftResult<()> {
    data.insert(key.to_owned(), Slot::Value(Value::Bool(true)));
    Ok(())
}

/// Ignore the incoming value and store `false`.
fn always_false(data: &mut SlotMap, key: &str, _value: Slot) -> CraftResult<()> {
    data.insert(key.to_owned(), Slot::Value(Value::Bool(false)));
    Ok(())
}

/// The built-in mutator catalogue, with `property` doubling as the default
/// entry.
pub(crate) fn built_in() -> Registry<dyn Mutate> {
    let mut registry = Registry::new("mutator");
    registry.register(DEFAULT_NAME, Arc::new(property) as Arc<dyn Mutate>);
    registry.register("property", Arc::new(property) as Arc<dyn Mutate>);
    registry.register("array", Arc::new(array) as Arc<dyn Mutate>);
    registry.register("flat_array", Arc::new(flat_array) as Arc<dyn Mutate>);
    registry.register("hash", Arc::new(hash) as Arc<dyn Mutate>);
    registry.register("always_true", Arc::new(always_true) as Arc<dyn Mutate>);
    registry.register("always_false", Arc::new(always_false) as Arc<dyn Mutate>);
    registry
}
