//! Schema declaration and inheritance-aware resolution.
//!
//! A schema is a named set of declared options plus an explicit `extends`
//! link to an optional parent. The effective option set merges every
//! ancestor's local declarations root-to-leaf so a descendant's option with
//! the same name replaces an ancestor's; the effective key and value
//! transformers are the nearest child-first declared choices. Both are
//! resolved once and cached — schemas are declared at load time and never
//! change afterwards.

use std::sync::{Arc, OnceLock};

use crate::dictionary::Dictionary;
use crate::error::{CraftError, CraftResult};
use crate::option::{OptionConfig, OptionSpec};
use crate::registry::Resolvers;
use crate::transform::TransformerRef;

/// A definition's option schema, always handled behind `Arc`.
pub struct Schema {
    name: String,
    parent: Option<Arc<Schema>>,
    resolvers: Arc<Resolvers>,
    local_options: Dictionary<Arc<OptionSpec>>,
    local_key_transformer: Option<TransformerRef>,
    local_value_transformer: Option<TransformerRef>,
    effective_options: OnceLock<Dictionary<Arc<OptionSpec>>>,
    effective_key_transformer: OnceLock<Option<TransformerRef>>,
    effective_value_transformer: OnceLock<Option<TransformerRef>>,
}

impl std::fmt::Debug for Schema {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Schema")
            .field("name", &self.name)
            .field("parent", &self.parent.as_ref().map(|p| p.name()))
            .field("options", &self.local_options.len())
            .finish()
    }
}

impl Schema {
    /// Starts declaring a schema named `name`.
    #[must_use]
    pub fn builder(name: impl Into<String>) -> SchemaBuilder {
        SchemaBuilder {
            name: name.into(),
            parent: None,
            resolvers: None,
            options: Vec::new(),
            key_transformer: None,
            value_transformer: None,
        }
    }

    /// The schema's name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The parent this schema extends, if any.
    #[must_use]
    pub fn parent(&self) -> Option<&Arc<Schema>> {
        self.parent.as_ref()
    }

    /// The resolver set this schema's strategies are resolved against.
    #[must_use]
    pub fn resolvers(&self) -> &Arc<Resolvers> {
        &self.resolvers
    }

    /// The effective option set: every ancestor's local declarations merged
    /// root-to-leaf, descendants replacing ancestors by name. Computed once
    /// and cached.
    pub fn effective_options(&self) -> &Dictionary<Arc<OptionSpec>> {
        self.effective_options.get_or_init(|| {
            let mut merged = Dictionary::new();
            for schema in self.chain() {
                merged.merge_from(&schema.local_options);
            }
            tracing::debug!(
                schema = %self.name,
                options = merged.len(),
                "resolved effective option set"
            );
            merged
        })
    }

    /// The effective key transformer: the nearest child-first declared
    /// choice, or `None` meaning pass-through.
    #[must_use]
    pub fn effective_key_transformer(&self) -> Option<&TransformerRef> {
        self.effective_key_transformer
            .get_or_init(|| self.nearest(|schema| schema.local_key_transformer.as_ref()))
            .as_ref()
    }

    /// The effective value transformer: the nearest child-first declared
    /// choice, or `None` meaning pass-through.
    #[must_use]
    pub fn effective_value_transformer(&self) -> Option<&TransformerRef> {
        self.effective_value_transformer
            .get_or_init(|| self.nearest(|schema| schema.local_value_transformer.as_ref()))
            .as_ref()
    }

    /// Finds a declared option by name in the effective set.
    ///
    /// # Errors
    ///
    /// Returns [`CraftError::UnknownOption`] for undeclared names: the
    /// rejection mechanism for unknown configuration keys, whether they
    /// arrive through a direct call or the bulk constructor.
    pub fn lookup(&self, name: &str) -> CraftResult<Arc<OptionSpec>> {
        self.effective_options()
            .find(name)
            .cloned()
            .ok_or_else(|| CraftError::UnknownOption {
                schema: self.name.clone(),
                option: name.to_owned(),
            })
    }

    /// Ancestor chain in root-to-leaf order, including `self`.
    fn chain(&self) -> Vec<&Schema> {
        let mut chain = Vec::new();
        let mut current = Some(self);
        while let Some(schema) = current {
            chain.push(schema);
            current = schema.parent.as_deref();
        }
        chain.reverse();
        chain
    }

    /// Walks child-first and returns the first transformer `pick` yields.
    fn nearest<F>(&self, pick: F) -> Option<TransformerRef>
    where
        F: Fn(&Schema) -> Option<&TransformerRef>,
    {
        let mut current = Some(self);
        while let Some(schema) = current {
            if let Some(transformer) = pick(schema) {
                return Some(transformer.clone());
            }
            current = schema.parent.as_deref();
        }
        None
    }
}

/// Builder collecting a schema's declarations before validation.
#[derive(Debug)]
pub struct SchemaBuilder {
    name: String,
    parent: Option<Arc<Schema>>,
    resolvers: Option<Arc<Resolvers>>,
    options: Vec<(String, OptionConfig)>,
    key_transformer: Option<TransformerRef>,
    value_transformer: Option<TransformerRef>,
}

impl SchemaBuilder {
    /// Declares the parent schema this one extends.
    #[must_use]
    pub fn extends(mut self, parent: Arc<Schema>) -> Self {
        self.parent = Some(parent);
        self
    }

    /// Substitutes the resolver set strategies are resolved against
    /// (defaults to [`Resolvers::shared`]).
    #[must_use]
    pub fn resolvers(mut self, resolvers: Arc<Resolvers>) -> Self {
        self.resolvers = Some(resolvers);
        self
    }

    /// Declares one option.
    #[must_use]
    pub fn option(mut self, name: impl Into<String>, config: OptionConfig) -> Self {
        self.options.push((name.into(), config));
        self
    }

    /// Declares several options sharing one configuration.
    #[must_use]
    pub fn options<I, N>(mut self, names: I, config: OptionConfig) -> Self
    where
        I: IntoIterator<Item = N>,
        N: Into<String>,
    {
        for name in names {
            self.options.push((name.into(), config.clone()));
        }
        self
    }

    /// Records this schema's own key-transformer choice. Descendants
    /// inherit it unless they declare their own.
    #[must_use]
    pub fn key_transformer(mut self, transformer: impl Into<TransformerRef>) -> Self {
        self.key_transformer = Some(transformer.into());
        self
    }

    /// Records this schema's own value-transformer choice. Descendants
    /// inherit it unless they declare their own.
    #[must_use]
    pub fn value_transformer(mut self, transformer: impl Into<TransformerRef>) -> Self {
        self.value_transformer = Some(transformer.into());
        self
    }

    /// Validates the declarations and builds the schema.
    ///
    /// # Errors
    ///
    /// Returns [`CraftError::EmptySchemaName`] or
    /// [`CraftError::EmptyOptionName`] when a name is missing.
    pub fn build(self) -> CraftResult<Arc<Schema>> {
        if self.name.is_empty() {
            return Err(CraftError::EmptySchemaName);
        }
        let mut local_options = Dictionary::new();
        for (name, config) in self.options {
            local_options.insert(Arc::new(OptionSpec::new(name, config)?));
        }
        Ok(Arc::new(Schema {
            name: self.name,
            parent: self.parent,
            resolvers: self
                .resolvers
                .unwrap_or_else(|| Arc::clone(Resolvers::shared())),
            local_options,
            local_key_transformer: self.key_transformer,
            local_value_transformer: self.value_transformer,
            effective_options: OnceLock::new(),
            effective_key_transformer: OnceLock::new(),
            effective_value_transformer: OnceLock::new(),
        }))
    }
}
