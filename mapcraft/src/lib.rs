//! Declarative engine for crafting deeply nested, key-ordered structures.
//!
//! A [`Schema`] declares the named options a definition accepts: how each
//! incoming value combines into the final structure (its mutation
//! strategy), how keys and values are reshaped on output (transformation),
//! and what default an option takes when unset. An [`Instance`] is
//! populated through direct calls or nested closure-style configuration and
//! then compiled into a plain [`serde_json::Value`] tree ready for
//! serialisation.
//!
//! ```
//! use mapcraft::{CraftResult, Instance, OptionConfig, Schema};
//! use serde_json::json;
//!
//! fn main() -> CraftResult<()> {
//!     let grid = Schema::builder("grid")
//!         .option("name", OptionConfig::new())
//!         .option("max_width", OptionConfig::new().eager().default_value("350px"))
//!         .build()?;
//!
//!     let mut instance = Instance::new(&grid)?;
//!     instance.set("name", "PatientsGrid")?;
//!     assert_eq!(
//!         instance.compile(),
//!         json!({"max_width": "350px", "name": "PatientsGrid"})
//!     );
//!     Ok(())
//! }
//! ```
//!
//! Schemas, and the [`Resolvers`] they resolve strategies against, are
//! declared once during setup and only read afterwards; declare them on a
//! single thread before sharing. Each instance is exclusively owned, so
//! different instances may be built and compiled concurrently without
//! synchronisation.

mod dictionary;
mod error;
mod instance;
mod mutate;
mod option;
mod registry;
mod schema;
mod transform;
mod value;

pub use dictionary::{Dictionary, Keyed};
pub use error::{CraftError, CraftResult};
pub use instance::Instance;
pub use mutate::{Mutate, MutatorRef};
pub use option::{OptionConfig, OptionSpec};
pub use registry::{DEFAULT_NAME, Registry, Resolvers, StrategyRef};
pub use schema::{Schema, SchemaBuilder};
pub use transform::{Transform, TransformerRef};
pub use value::{Slot, SlotMap};
