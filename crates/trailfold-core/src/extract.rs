// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Pluggable extraction of key components from paths.
use core::fmt;

use thiserror::Error;

use trailfold_graph::{GraphNode, GraphPath, GraphRelationship, RelTypeId};

use crate::key::KeyComponent;
use crate::offset::{resolve_node, OffsetError};

/// Error returned when a key component cannot be extracted from a path.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExtractError {
    /// The extractor's offset did not land on a node.
    #[error(transparent)]
    Offset(#[from] OffsetError),
    /// No relationship of the requested type exists on the path.
    #[error("no relationship of type {rel_type} on the path")]
    RelationshipNotFound {
        /// The relationship type that was searched for.
        rel_type: RelTypeId,
    },
    /// The node at the offset lacks the requested property.
    #[error("node at offset {offset} has no property {property:?}")]
    NodePropertyNotFound {
        /// Offset of the node that was inspected.
        offset: isize,
        /// Name of the missing property.
        property: String,
    },
    /// The first matching relationship lacks the requested property.
    #[error("relationship of type {rel_type} has no property {property:?}")]
    RelationshipPropertyNotFound {
        /// Type of the relationship that matched.
        rel_type: RelTypeId,
        /// Name of the missing property.
        property: String,
    },
}

/// Extracts one key component from a path.
///
/// Extractors carry no per-path state: one instance may run over any
/// number of paths, and descriptions share instances across clones.
pub trait KeyExtractor<P: GraphPath>: fmt::Debug {
    /// Extracts the component for `path`.
    ///
    /// # Errors
    ///
    /// [`ExtractError`] naming the condition that left the path without
    /// this component.
    fn extract(&self, path: &P) -> Result<KeyComponent<P::Node>, ExtractError>;
}

fn first_relationship_of_type<P: GraphPath>(
    path: &P,
    rel_type: RelTypeId,
) -> Result<P::Rel, ExtractError> {
    path.relationships()
        .find(|relationship| relationship.is_type(rel_type))
        .ok_or(ExtractError::RelationshipNotFound { rel_type })
}

/// Captures the node at an offset, compared by identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NodeAtOffset {
    offset: isize,
}

impl NodeAtOffset {
    /// Creates an extractor for the node at `offset`.
    #[must_use]
    pub fn new(offset: isize) -> Self {
        Self { offset }
    }
}

impl<P: GraphPath> KeyExtractor<P> for NodeAtOffset {
    fn extract(&self, path: &P) -> Result<KeyComponent<P::Node>, ExtractError> {
        Ok(KeyComponent::Node(resolve_node(path, self.offset)?))
    }
}

/// Captures a property of the node at an offset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodePropertyAtOffset {
    offset: isize,
    property: String,
}

impl NodePropertyAtOffset {
    /// Creates an extractor for `property` on the node at `offset`.
    #[must_use]
    pub fn new(offset: isize, property: impl Into<String>) -> Self {
        Self {
            offset,
            property: property.into(),
        }
    }
}

impl<P: GraphPath> KeyExtractor<P> for NodePropertyAtOffset {
    fn extract(&self, path: &P) -> Result<KeyComponent<P::Node>, ExtractError> {
        let node = resolve_node(path, self.offset)?;
        let Some(value) = node.property(&self.property) else {
            return Err(ExtractError::NodePropertyNotFound {
                offset: self.offset,
                property: self.property.clone(),
            });
        };
        Ok(KeyComponent::Value(value))
    }
}

/// Captures a property of the first relationship of a type on the path.
///
/// Relationships are scanned in path order; the first one whose type
/// matches supplies the property.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelationshipProperty {
    rel_type: RelTypeId,
    property: String,
}

impl RelationshipProperty {
    /// Creates an extractor for `property` on the first `rel_type`
    /// relationship.
    #[must_use]
    pub fn new(rel_type: RelTypeId, property: impl Into<String>) -> Self {
        Self {
            rel_type,
            property: property.into(),
        }
    }
}

impl<P: GraphPath> KeyExtractor<P> for RelationshipProperty {
    fn extract(&self, path: &P) -> Result<KeyComponent<P::Node>, ExtractError> {
        let relationship = first_relationship_of_type(path, self.rel_type)?;
        let Some(value) = relationship.property(&self.property) else {
            return Err(ExtractError::RelationshipPropertyNotFound {
                rel_type: self.rel_type,
                property: self.property.clone(),
            });
        };
        Ok(KeyComponent::Value(value))
    }
}

/// Captures the end node of the first relationship of a type on the path.
///
/// The endpoint follows the relationship's stored direction, not the
/// direction the traversal walked it in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RelationshipEndNode {
    rel_type: RelTypeId,
}

impl RelationshipEndNode {
    /// Creates an extractor for the end node of the first `rel_type`
    /// relationship.
    #[must_use]
    pub fn new(rel_type: RelTypeId) -> Self {
        Self { rel_type }
    }
}

impl<P: GraphPath> KeyExtractor<P> for RelationshipEndNode {
    fn extract(&self, path: &P) -> Result<KeyComponent<P::Node>, ExtractError> {
        let relationship = first_relationship_of_type(path, self.rel_type)?;
        Ok(KeyComponent::Node(relationship.end_node()))
    }
}

/// Captures the start node of the first relationship of a type on the
/// path, following the relationship's stored direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RelationshipStartNode {
    rel_type: RelTypeId,
}

impl RelationshipStartNode {
    /// Creates an extractor for the start node of the first `rel_type`
    /// relationship.
    #[must_use]
    pub fn new(rel_type: RelTypeId) -> Self {
        Self { rel_type }
    }
}

impl<P: GraphPath> KeyExtractor<P> for RelationshipStartNode {
    fn extract(&self, path: &P) -> Result<KeyComponent<P::Node>, ExtractError> {
        let relationship = first_relationship_of_type(path, self.rel_type)?;
        Ok(KeyComponent::Node(relationship.start_node()))
    }
}

/// Adapts a closure into a [`KeyExtractor`].
pub struct FnExtractor<F> {
    label: &'static str,
    extract: F,
}

impl<F> FnExtractor<F> {
    /// Wraps `extract`; `label` names the closure in debug output.
    #[must_use]
    pub fn new(label: &'static str, extract: F) -> Self {
        Self { label, extract }
    }
}

impl<F> fmt::Debug for FnExtractor<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnExtractor")
            .field("label", &self.label)
            .finish_non_exhaustive()
    }
}

impl<P, F> KeyExtractor<P> for FnExtractor<F>
where
    P: GraphPath,
    F: Fn(&P) -> Result<KeyComponent<P::Node>, ExtractError>,
{
    fn extract(&self, path: &P) -> Result<KeyComponent<P::Node>, ExtractError> {
        (self.extract)(path)
    }
}
