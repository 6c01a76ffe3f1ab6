// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Composite grouping keys assembled from named components.
use std::collections::BTreeMap;

use trailfold_graph::PropertyValue;

/// One named slot of a composite key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum KeyComponent<N> {
    /// A node captured whole; compares by the node's identity.
    Node(N),
    /// A scalar property value.
    Value(PropertyValue),
}

/// An immutable set of named key components identifying one bucket.
///
/// Two keys are equal iff they carry the same names with equal components
/// per name. Entries live in a name-sorted map, so equality and hashing
/// never depend on the order components were added in.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CompositeKey<N> {
    components: BTreeMap<String, KeyComponent<N>>,
}

impl<N> CompositeKey<N> {
    /// Creates the empty key, the key of the universal bucket.
    #[must_use]
    pub fn new() -> Self {
        Self {
            components: BTreeMap::new(),
        }
    }

    /// Returns this key with `component` installed under `name`, replacing
    /// any previous component of that name.
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, component: KeyComponent<N>) -> Self {
        self.components.insert(name.into(), component);
        self
    }

    pub(crate) fn insert(&mut self, name: String, component: KeyComponent<N>) {
        self.components.insert(name, component);
    }

    /// Looks up the component stored under `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&KeyComponent<N>> {
        self.components.get(name)
    }

    /// The key names, in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        self.components.keys().map(String::as_str)
    }

    /// The (name, component) entries, in name order.
    pub fn components(&self) -> impl Iterator<Item = (&str, &KeyComponent<N>)> + '_ {
        self.components
            .iter()
            .map(|(name, component)| (name.as_str(), component))
    }

    /// Number of components in the key.
    #[must_use]
    pub fn len(&self) -> usize {
        self.components.len()
    }

    /// Whether the key carries no components.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }
}

impl<N> Default for CompositeKey<N> {
    fn default() -> Self {
        Self::new()
    }
}
