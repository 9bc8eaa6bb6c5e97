/*
 * model.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! The data model a template is rendered against.
//!
//! A [`DataModel`] holds three namespaces:
//!
//! - the **tag store**: dotted key → scalar, used by interpolation and
//!   conditions
//! - the **iteration store**: name → list of entries, used by `foreach`
//! - the **injection buffers**: text wrapped around the top-level output
//!
//! A key lives in exactly one of the tag and iteration stores. Which one is
//! decided by the shape of the value when it is assigned.

use indexmap::IndexMap;

use crate::inject::{InjectPosition, Injections};
use crate::value::{Assignable, Entry, TemplateValue, is_index_keyed};

/// Variable bindings for one render.
#[derive(Debug, Clone, Default)]
pub struct DataModel {
    tags: IndexMap<String, TemplateValue>,
    iterations: IndexMap<String, Vec<Entry>>,
    injections: Injections,
}

impl DataModel {
    /// Create a new empty model.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the model for one iteration entry.
    ///
    /// Every field of the entry is assigned as a top-level key, so nested
    /// lists inside an entry become iteration lists of the sub-model.
    pub fn from_entry(entry: &Entry) -> Self {
        let mut model = Self::new();
        for (key, value) in entry.iter() {
            model.assign(key.clone(), value.clone());
        }
        model
    }

    /// Assign a value under `key`.
    ///
    /// - Scalars go to the tag store, replacing any earlier value.
    /// - Lists (and empty or integer-keyed maps) go to the iteration store.
    /// - String-keyed maps are flattened into `key.field` tags, recursively.
    pub fn assign(&mut self, key: impl Into<String>, value: impl Into<Assignable>) {
        self.store(key.into(), value.into());
    }

    /// Assign every `(key, value)` pair with `prefix` prepended to the key.
    pub fn assign_all<K, V>(&mut self, values: impl IntoIterator<Item = (K, V)>, prefix: &str)
    where
        K: AsRef<str>,
        V: Into<Assignable>,
    {
        for (key, value) in values {
            self.store(format!("{}{}", prefix, key.as_ref()), value.into());
        }
    }

    fn store(&mut self, key: String, value: Assignable) {
        match value {
            Assignable::Scalar(scalar) => {
                self.iterations.shift_remove(&key);
                self.tags.insert(key, scalar);
            }
            Assignable::Map(map) if !is_index_keyed(&map) => {
                for (field, nested) in map {
                    self.store(format!("{}.{}", key, field), nested);
                }
            }
            list => {
                let entries = list.into_items().into_iter().map(Entry::from).collect();
                self.tags.shift_remove(&key);
                self.iterations.insert(key, entries);
            }
        }
    }

    /// Append text to one of the injection buffers.
    pub fn inject(&mut self, text: &str, position: InjectPosition) {
        self.injections.push(text, position);
    }

    /// Get a tag value.
    pub fn tag(&self, key: &str) -> Option<&TemplateValue> {
        self.tags.get(key)
    }

    /// All tags, in assignment order.
    pub fn tags(&self) -> &IndexMap<String, TemplateValue> {
        &self.tags
    }

    /// Get the entries of an iteration list.
    pub fn iteration(&self, name: &str) -> Option<&[Entry]> {
        self.iterations.get(name).map(Vec::as_slice)
    }

    /// All iteration lists, in assignment order.
    pub fn iterations(&self) -> impl Iterator<Item = (&str, &[Entry])> {
        self.iterations
            .iter()
            .map(|(name, entries)| (name.as_str(), entries.as_slice()))
    }

    pub fn has_iterations(&self) -> bool {
        !self.iterations.is_empty()
    }

    /// Whether `name` is known to either the tag or the iteration store.
    pub fn contains(&self, name: &str) -> bool {
        self.tags.contains_key(name) || self.iterations.contains_key(name)
    }

    /// Truthiness used by `is` conditions: a non-empty tag or a non-empty list.
    pub fn is_truthy(&self, name: &str) -> bool {
        self.tags.get(name).is_some_and(|v| !v.is_empty())
            || self.iterations.get(name).is_some_and(|e| !e.is_empty())
    }

    pub fn injections(&self) -> &Injections {
        &self.injections
    }
}
