//! Error types produced by schema declaration, population, and compilation.

use thiserror::Error;

/// Convenience alias for results carrying a [`CraftError`].
pub type CraftResult<T> = Result<T, CraftError>;

/// Errors that can occur while declaring schemas or crafting instances.
///
/// Every failure surfaces synchronously to the caller; nothing is retried,
/// logged-and-swallowed, or partially recovered.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CraftError {
    /// A schema was built without a name.
    #[error("schema name is required")]
    EmptySchemaName,

    /// An option was declared without a name.
    #[error("option name is required")]
    EmptyOptionName,

    /// A value was supplied for an option the schema never declared.
    ///
    /// This is the primary validation mechanism: undeclared names are
    /// rejected identically whether they arrive through a direct
    /// [`crate::Instance::set`] call or through the bulk constructor.
    #[error("no option named '{option}' is declared on schema '{schema}'")]
    UnknownOption {
        /// Name of the schema the lookup ran against.
        schema: String,
        /// The undeclared option name.
        option: String,
    },

    /// A transformer or mutator name had no matching registry entry.
    #[error("no {kind} registered under '{name}'")]
    UnknownStrategy {
        /// Which strategy family the registry serves.
        kind: &'static str,
        /// The unresolvable name.
        name: String,
    },

    /// A mutation strategy met a slot or incoming value of the wrong shape,
    /// such as a `hash` merge into a scalar.
    #[error("cannot mutate '{key}': {message}")]
    Mutation {
        /// Output key (or option name) the mutation targeted.
        key: String,
        /// Description of the shape clash.
        message: String,
    },

    /// A compiled structure could not be deserialised into the requested
    /// type.
    #[error("failed to deserialise compiled structure: {0}")]
    Deserialize(#[from] Box<serde_json::Error>),
}
