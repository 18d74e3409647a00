//! Insertion-ordered collections keyed by a case-insensitive projection.

use indexmap::IndexMap;
use uncased::{Uncased, UncasedStr};

/// Projects the identifying key of a collection element.
///
/// The projection is fixed at compile time by the implementation, so two
/// elements whose keys compare equal case-insensitively occupy the same
/// dictionary entry.
pub trait Keyed {
    /// The string this element is filed under.
    fn dictionary_key(&self) -> &str;
}

impl<T: Keyed + ?Sized> Keyed for std::sync::Arc<T> {
    fn dictionary_key(&self) -> &str {
        (**self).dictionary_key()
    }
}

/// An associative container preserving insertion order, keyed by the
/// case-insensitive string form of each element's [`Keyed`] projection.
///
/// Re-inserting an existing key replaces the element while keeping its
/// original position, which is the property schema inheritance relies on:
/// a descendant's redeclaration overrides an ancestor's option without
/// reordering the output.
#[derive(Clone, Debug)]
pub struct Dictionary<T> {
    entries: IndexMap<Uncased<'static>, T>,
}

impl<T> Default for Dictionary<T> {
    fn default() -> Self {
        Self {
            entries: IndexMap::new(),
        }
    }
}

impl<T: Keyed> Dictionary<T> {
    /// Creates an empty dictionary.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts `value` under its projected key, replacing (in place) any
    /// element already filed there.
    pub fn insert(&mut self, value: T) {
        let key = Uncased::from(value.dictionary_key().to_owned());
        self.entries.insert(key, value);
    }

    /// Looks up an element by key, ignoring case.
    #[must_use]
    pub fn find(&self, key: &str) -> Option<&T> {
        self.entries.get(UncasedStr::new(key))
    }

    /// Folds every entry of `other` into `self`, with `other` winning on
    /// key collisions while colliding entries keep their original position.
    pub fn merge_from(&mut self, other: &Self)
    where
        T: Clone,
    {
        for (key, value) in &other.entries {
            self.entries.insert(key.clone(), value.clone());
        }
    }

    /// Iterates elements in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.entries.values()
    }

    /// Number of elements held.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the dictionary holds no elements.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests;
