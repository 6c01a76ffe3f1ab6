// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Immutable, composable grouping descriptions.
use core::fmt;
use std::collections::BTreeMap;
use std::sync::Arc;

use trailfold_graph::{GraphPath, RelTypeId};

use crate::extract::{
    ExtractError, KeyExtractor, NodeAtOffset, NodePropertyAtOffset, RelationshipEndNode,
    RelationshipProperty, RelationshipStartNode,
};
use crate::grouping::{GroupError, GroupLimits, Grouping};
use crate::key::CompositeKey;

/// An immutable recipe mapping key names to extractors.
///
/// Every `group_by_*` operation returns a new description with one entry
/// added or replaced; the receiver is never touched, so descriptions
/// compose like persistent values. Extractors sit behind shared pointers
/// and are reused across the clones.
pub struct GroupingDescription<P: GraphPath> {
    extractors: BTreeMap<String, Arc<dyn KeyExtractor<P>>>,
}

impl<P: GraphPath> GroupingDescription<P> {
    /// Creates a description with no keys.
    #[must_use]
    pub fn new() -> Self {
        Self {
            extractors: BTreeMap::new(),
        }
    }

    /// Returns this description plus `extractor` installed under `name`.
    ///
    /// Installing under a name already in use replaces that entry in the
    /// new description; the receiver keeps the old one.
    #[must_use]
    pub fn group_by(
        &self,
        name: impl Into<String>,
        extractor: impl KeyExtractor<P> + 'static,
    ) -> Self {
        let mut extractors = self.extractors.clone();
        extractors.insert(name.into(), Arc::new(extractor));
        Self { extractors }
    }

    /// Groups by the node at `offset`, under `name`.
    #[must_use]
    pub fn group_by_node(&self, offset: isize, name: impl Into<String>) -> Self {
        self.group_by(name, NodeAtOffset::new(offset))
    }

    /// Groups by a property of the node at `offset`; the property name
    /// doubles as the key name.
    #[must_use]
    pub fn group_by_node_property(&self, offset: isize, property: impl Into<String>) -> Self {
        let property = property.into();
        self.group_by(property.clone(), NodePropertyAtOffset::new(offset, property))
    }

    /// Groups by a property of the first `rel_type` relationship on each
    /// path; the property name doubles as the key name.
    #[must_use]
    pub fn group_by_relationship_property(
        &self,
        rel_type: RelTypeId,
        property: impl Into<String>,
    ) -> Self {
        let property = property.into();
        self.group_by(property.clone(), RelationshipProperty::new(rel_type, property))
    }

    /// Groups by the end node of the first `rel_type` relationship, under
    /// `name`.
    #[must_use]
    pub fn group_by_relationship_end_node(
        &self,
        rel_type: RelTypeId,
        name: impl Into<String>,
    ) -> Self {
        self.group_by(name, RelationshipEndNode::new(rel_type))
    }

    /// Groups by the start node of the first `rel_type` relationship,
    /// under `name`.
    #[must_use]
    pub fn group_by_relationship_start_node(
        &self,
        rel_type: RelTypeId,
        name: impl Into<String>,
    ) -> Self {
        self.group_by(name, RelationshipStartNode::new(rel_type))
    }

    /// Number of installed keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.extractors.len()
    }

    /// Whether the description has no keys. Grouping with an empty
    /// description collapses every path into one universal bucket.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.extractors.is_empty()
    }

    /// The installed key names, in sorted order.
    pub fn key_names(&self) -> impl Iterator<Item = &str> + '_ {
        self.extractors.keys().map(String::as_str)
    }

    /// Computes the composite key for `path` by running every installed
    /// extractor.
    ///
    /// # Errors
    ///
    /// The first [`ExtractError`] any extractor raises.
    pub fn grouping_key(&self, path: &P) -> Result<CompositeKey<P::Node>, ExtractError> {
        let mut key = CompositeKey::new();
        for (name, extractor) in &self.extractors {
            key.insert(name.clone(), extractor.extract(path)?);
        }
        Ok(key)
    }

    /// Groups `paths` by this description, with no budget.
    ///
    /// # Errors
    ///
    /// [`GroupError`] when key extraction fails for any path.
    pub fn group_from<I>(&self, paths: I) -> Result<Grouping<P>, GroupError>
    where
        I: IntoIterator<Item = P>,
    {
        self.group_from_with_limits(paths, GroupLimits::unbounded())
    }

    /// Groups `paths` by this description under `limits`.
    ///
    /// # Errors
    ///
    /// [`GroupError`] when key extraction fails for any path or a budget
    /// is exceeded.
    pub fn group_from_with_limits<I>(
        &self,
        paths: I,
        limits: GroupLimits,
    ) -> Result<Grouping<P>, GroupError>
    where
        I: IntoIterator<Item = P>,
    {
        Grouping::build(self, paths, limits)
    }
}

impl<P: GraphPath> Clone for GroupingDescription<P> {
    fn clone(&self) -> Self {
        Self {
            extractors: self.extractors.clone(),
        }
    }
}

impl<P: GraphPath> Default for GroupingDescription<P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P: GraphPath> fmt::Debug for GroupingDescription<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GroupingDescription")
            .field("extractors", &self.extractors)
            .finish()
    }
}
