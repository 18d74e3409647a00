//! Name-to-strategy registries and the resolver bundle shared by schemas.
//!
//! A [`Registry`] maps case-insensitive names to strategies behind `Arc`s.
//! The same abstraction backs both strategy families (key/value
//! transformation and value mutation); each family is seeded with its
//! built-in catalogue by [`Resolvers::built_in`]. Registries are plain
//! values rather than hidden singletons so tests can substitute isolated
//! sets: extend a [`Resolvers`] while you own it exclusively, then freeze
//! it behind an `Arc` before building schemas against it.

use std::sync::{Arc, LazyLock};

use indexmap::IndexMap;
use uncased::{Uncased, UncasedStr};

use crate::error::{CraftError, CraftResult};
use crate::mutate::{self, Mutate};
use crate::transform::{self, Transform};

/// Reserved name of the default (unnamed) registry entry.
pub const DEFAULT_NAME: &str = "";

/// A reference to a strategy: either a registered name to resolve later or
/// an already-concrete strategy that resolution passes through unchanged.
pub enum StrategyRef<S: ?Sized> {
    /// A name to look up in the owning registry at resolution time.
    Named(String),
    /// A caller-supplied strategy, used as-is.
    Concrete(Arc<S>),
}

impl<S: ?Sized> Clone for StrategyRef<S> {
    fn clone(&self) -> Self {
        match self {
            Self::Named(name) => Self::Named(name.clone()),
            Self::Concrete(strategy) => Self::Concrete(Arc::clone(strategy)),
        }
    }
}

impl<S: ?Sized> std::fmt::Debug for StrategyRef<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Named(name) => f.debug_tuple("Named").field(name).finish(),
            Self::Concrete(_) => f.write_str("Concrete(..)"),
        }
    }
}

impl<S: ?Sized> From<&str> for StrategyRef<S> {
    fn from(name: &str) -> Self {
        Self::Named(name.to_owned())
    }
}

impl<S: ?Sized> From<String> for StrategyRef<S> {
    fn from(name: String) -> Self {
        Self::Named(name)
    }
}

impl<S: ?Sized> From<Arc<S>> for StrategyRef<S> {
    fn from(strategy: Arc<S>) -> Self {
        Self::Concrete(strategy)
    }
}

/// A name → strategy lookup with case-insensitive, insertion-ordered keys.
pub struct Registry<S: ?Sized> {
    kind: &'static str,
    entries: IndexMap<Uncased<'static>, Arc<S>>,
}

impl<S: ?Sized> std::fmt::Debug for Registry<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Registry")
            .field("kind", &self.kind)
            .field("names", &self.entries.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl<S: ?Sized> Registry<S> {
    /// Creates an empty registry; `kind` names the strategy family in
    /// errors (e.g. `"transformer"`).
    #[must_use]
    pub fn new(kind: &'static str) -> Self {
        Self {
            kind,
            entries: IndexMap::new(),
        }
    }

    /// Stores `strategy` under `name`, overwriting any previous entry.
    pub fn register(&mut self, name: impl Into<String>, strategy: Arc<S>) {
        self.entries.insert(Uncased::from(name.into()), strategy);
    }

    /// Bulk-registers `(name, strategy)` pairs.
    pub fn register_all<I, N>(&mut self, entries: I)
    where
        I: IntoIterator<Item = (N, Arc<S>)>,
        N: Into<String>,
    {
        for (name, strategy) in entries {
            self.register(name, strategy);
        }
    }

    /// Resolves a strategy reference.
    ///
    /// `None` yields the default ([`DEFAULT_NAME`]) entry. A
    /// [`StrategyRef::Named`] reference is looked up by name. A
    /// [`StrategyRef::Concrete`] reference passes through unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`CraftError::UnknownStrategy`] when a name (or the default
    /// entry) has no registration.
    pub fn resolve(&self, reference: Option<&StrategyRef<S>>) -> CraftResult<Arc<S>> {
        match reference {
            Some(StrategyRef::Concrete(strategy)) => Ok(Arc::clone(strategy)),
            Some(StrategyRef::Named(name)) => self.lookup(name),
            None => self.lookup(DEFAULT_NAME),
        }
    }

    fn lookup(&self, name: &str) -> CraftResult<Arc<S>> {
        self.entries
            .get(UncasedStr::new(name))
            .cloned()
            .ok_or_else(|| CraftError::UnknownStrategy {
                kind: self.kind,
                name: name.to_owned(),
            })
    }
}

/// The pair of registries every schema resolves strategies against.
#[derive(Debug)]
pub struct Resolvers {
    transformers: Registry<dyn Transform>,
    mutators: Registry<dyn Mutate>,
}

impl Resolvers {
    /// Builds a resolver set seeded with the built-in transformer and
    /// mutator catalogues.
    #[must_use]
    pub fn built_in() -> Self {
        Self {
            transformers: transform::built_in(),
            mutators: mutate::built_in(),
        }
    }

    /// The process-wide resolver set holding exactly the built-ins.
    ///
    /// Schemas that do not supply their own resolvers use this set. It is
    /// immutable; callers wanting custom strategies construct their own
    /// [`Resolvers::built_in`], extend it, and pass it to
    /// [`crate::SchemaBuilder::resolvers`].
    #[must_use]
    pub fn shared() -> &'static Arc<Self> {
        static SHARED: LazyLock<Arc<Resolvers>> = LazyLock::new(|| Arc::new(Resolvers::built_in()));
        &SHARED
    }

    /// The transformer registry.
    #[must_use]
    pub fn transformers(&self) -> &Registry<dyn Transform> {
        &self.transformers
    }

    /// Mutable access to the transformer registry, for registration during
    /// setup.
    pub fn transformers_mut(&mut self) -> &mut Registry<dyn Transform> {
        &mut self.transformers
    }

    /// The mutator registry.
    #[must_use]
    pub fn mutators(&self) -> &Registry<dyn Mutate> {
        &self.mutators
    }

    /// Mutable access to the mutator registry, for registration during
    /// setup.
    pub fn mutators_mut(&mut self) -> &mut Registry<dyn Mutate> {
        &mut self.mutators
    }
}

impl Default for Resolvers {
    fn default() -> Self {
        Self::built_in()
    }
}
