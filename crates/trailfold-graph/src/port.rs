// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Port traits defining the contract a graph implementation satisfies.

use core::fmt;
use core::hash::Hash as StdHash;

use crate::ident::RelTypeId;
use crate::value::PropertyValue;

/// Node handle exposed by a graph implementation.
///
/// Handles are identity-comparable: `Eq`/`Hash` must agree with the graph's
/// notion of "the same node", independent of property contents, so that
/// node-valued grouping keys bucket by identity. Handles are expected to be
/// cheap to clone (the reference store shares property maps behind `Arc`).
pub trait GraphNode: Clone + Eq + StdHash + fmt::Debug {
    /// Looks up a property by name. Absent properties are `None`; consumers
    /// that require presence convert absence into their own error with
    /// context.
    fn property(&self, name: &str) -> Option<PropertyValue>;
}

/// Relationship handle exposed by a graph implementation.
///
/// Endpoint accessors return the relationship's stored direction. A
/// traversal may have walked the relationship against that direction, so
/// `start_node`/`end_node` are not "previous/next on the path".
pub trait GraphRelationship: Clone + fmt::Debug {
    /// Node handle type shared with the owning path.
    type Node: GraphNode;

    /// Returns `true` when this relationship has the given type.
    fn is_type(&self, rel_type: RelTypeId) -> bool;

    /// Looks up a property by name. Absent properties are `None`.
    fn property(&self, name: &str) -> Option<PropertyValue>;

    /// The node this relationship points away from.
    fn start_node(&self) -> Self::Node;

    /// The node this relationship points at.
    fn end_node(&self) -> Self::Node;
}

/// An ordered walk over a graph: nodes alternating with the relationships
/// that connect them.
///
/// # Design
///
/// This is a hexagonal port: an external traversal engine produces paths,
/// the grouping engine only consumes them. Search order, uniqueness
/// filtering, and direction filtering all belong to the producer.
///
/// A well-formed path of length L (relationship count) yields exactly
/// L + 1 nodes; consumers treat a shorter node sequence as out-of-range at
/// the point of access rather than validating paths up front.
pub trait GraphPath: fmt::Debug {
    /// Node handle type.
    type Node: GraphNode;
    /// Relationship handle type, sharing the node type.
    type Rel: GraphRelationship<Node = Self::Node>;

    /// Number of relationships on the path.
    fn length(&self) -> usize;

    /// The last node of the walk. Total: even a single-node path has an
    /// end node.
    fn end_node(&self) -> Self::Node;

    /// Nodes in walk order, starting node first.
    fn nodes(&self) -> impl Iterator<Item = Self::Node> + '_;

    /// Relationships in walk order.
    fn relationships(&self) -> impl Iterator<Item = Self::Rel> + '_;
}
