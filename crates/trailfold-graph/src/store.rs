// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Minimal in-memory property graph used by the grouping engine's tests and
//! by consumers that need paths without a full traversal stack.
use std::collections::BTreeMap;
use std::sync::Arc;

use thiserror::Error;

use crate::ident::{NodeId, RelId, RelTypeId};
use crate::port::{GraphNode, GraphPath, GraphRelationship};
use crate::value::PropertyValue;

type PropertyMap = BTreeMap<String, PropertyValue>;

/// Error returned by [`MemoryGraph`] mutators and path assembly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GraphError {
    /// Referenced a node id that was never created.
    #[error("missing node: {0:?}")]
    MissingNode(NodeId),
    /// Referenced a relationship id that was never created.
    #[error("missing relationship: {0:?}")]
    MissingRelationship(RelId),
    /// A hop's relationship touches neither endpoint of the path so far.
    #[error("relationship {relationship:?} does not touch the end of the path")]
    DisconnectedHop {
        /// The relationship that failed to connect.
        relationship: RelId,
    },
}

/// Node handle: identity plus a property snapshot.
///
/// Equality and hashing use the id only, so two handles for the same node
/// compare equal even when minted across property updates. The property map
/// is shared; cloning a handle is two pointer copies.
#[derive(Debug, Clone)]
pub struct Node {
    id: NodeId,
    properties: Arc<PropertyMap>,
}

impl Node {
    /// Identity of the underlying node.
    #[must_use]
    pub fn id(&self) -> NodeId {
        self.id
    }

    /// Looks up a property in this handle's snapshot.
    #[must_use]
    pub fn property(&self, name: &str) -> Option<PropertyValue> {
        self.properties.get(name).cloned()
    }
}

impl PartialEq for Node {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Node {}

impl core::hash::Hash for Node {
    fn hash<H: core::hash::Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl GraphNode for Node {
    fn property(&self, name: &str) -> Option<PropertyValue> {
        Node::property(self, name)
    }
}

/// Relationship handle: identity, type, stored-direction endpoints, and a
/// property snapshot.
#[derive(Debug, Clone)]
pub struct Relationship {
    id: RelId,
    rel_type: RelTypeId,
    start: Node,
    end: Node,
    properties: Arc<PropertyMap>,
}

impl Relationship {
    /// Identity of the underlying relationship.
    #[must_use]
    pub fn id(&self) -> RelId {
        self.id
    }

    /// The relationship's type id.
    #[must_use]
    pub fn rel_type(&self) -> RelTypeId {
        self.rel_type
    }

    /// Looks up a property in this handle's snapshot.
    #[must_use]
    pub fn property(&self, name: &str) -> Option<PropertyValue> {
        self.properties.get(name).cloned()
    }

    /// The node this relationship points away from (stored direction).
    #[must_use]
    pub fn start_node(&self) -> Node {
        self.start.clone()
    }

    /// The node this relationship points at (stored direction).
    #[must_use]
    pub fn end_node(&self) -> Node {
        self.end.clone()
    }
}

impl GraphRelationship for Relationship {
    type Node = Node;

    fn is_type(&self, rel_type: RelTypeId) -> bool {
        self.rel_type == rel_type
    }

    fn property(&self, name: &str) -> Option<PropertyValue> {
        Relationship::property(self, name)
    }

    fn start_node(&self) -> Node {
        Relationship::start_node(self)
    }

    fn end_node(&self) -> Node {
        Relationship::end_node(self)
    }
}

/// An assembled walk: a start node plus (relationship, node) hops.
///
/// Structurally non-empty, so `end_node` is total. Hops are
/// direction-agnostic: [`Path::hop`] accepts a relationship walked either
/// with or against its stored direction and appends the opposite endpoint.
#[derive(Debug, Clone)]
pub struct Path {
    first: Node,
    hops: Vec<(Relationship, Node)>,
}

impl Path {
    /// Starts a path at a single node (length 0).
    #[must_use]
    pub fn starting_at(node: Node) -> Self {
        Self {
            first: node,
            hops: Vec::new(),
        }
    }

    /// Extends the path across `relationship`.
    ///
    /// The relationship must touch the current end node; the path continues
    /// at the opposite endpoint. A self-loop continues at the same node.
    ///
    /// # Errors
    ///
    /// [`GraphError::DisconnectedHop`] when the relationship touches neither
    /// endpoint.
    pub fn hop(mut self, relationship: Relationship) -> Result<Self, GraphError> {
        let here = self.last_node();
        let next = if relationship.start == *here {
            relationship.end.clone()
        } else if relationship.end == *here {
            relationship.start.clone()
        } else {
            return Err(GraphError::DisconnectedHop {
                relationship: relationship.id,
            });
        };
        self.hops.push((relationship, next));
        Ok(self)
    }

    /// The first node of the walk.
    #[must_use]
    pub fn start_node(&self) -> Node {
        self.first.clone()
    }

    /// The last node of the walk.
    #[must_use]
    pub fn end_node(&self) -> Node {
        self.last_node().clone()
    }

    /// Number of relationships on the path.
    #[must_use]
    pub fn length(&self) -> usize {
        self.hops.len()
    }

    fn last_node(&self) -> &Node {
        self.hops.last().map_or(&self.first, |(_, node)| node)
    }
}

impl GraphPath for Path {
    type Node = Node;
    type Rel = Relationship;

    fn length(&self) -> usize {
        Path::length(self)
    }

    fn end_node(&self) -> Node {
        Path::end_node(self)
    }

    fn nodes(&self) -> impl Iterator<Item = Node> + '_ {
        core::iter::once(self.first.clone()).chain(self.hops.iter().map(|(_, node)| node.clone()))
    }

    fn relationships(&self) -> impl Iterator<Item = Relationship> + '_ {
        self.hops.iter().map(|(relationship, _)| relationship.clone())
    }
}

#[derive(Debug, Clone)]
struct RelRecord {
    rel_type: RelTypeId,
    start: NodeId,
    end: NodeId,
    properties: Arc<PropertyMap>,
}

/// In-memory graph store minting snapshot handles.
///
/// Property maps live behind shared pointers with copy-on-write mutation:
/// a handle minted before a property update keeps the snapshot it was
/// minted with, while later handles see the new value. Take handles after
/// the graph is built when stale snapshots would matter.
#[derive(Debug, Clone, Default)]
pub struct MemoryGraph {
    nodes: BTreeMap<NodeId, Arc<PropertyMap>>,
    relationships: BTreeMap<RelId, RelRecord>,
    next_node: u64,
    next_rel: u64,
}

impl MemoryGraph {
    /// Creates an empty graph.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a node with no properties and returns its id.
    pub fn create_node(&mut self) -> NodeId {
        let id = NodeId(self.next_node);
        self.next_node += 1;
        self.nodes.insert(id, Arc::new(PropertyMap::new()));
        id
    }

    /// Creates a typed relationship from `start` to `end`.
    ///
    /// # Errors
    ///
    /// [`GraphError::MissingNode`] when either endpoint does not exist.
    pub fn create_relationship(
        &mut self,
        start: NodeId,
        end: NodeId,
        rel_type: RelTypeId,
    ) -> Result<RelId, GraphError> {
        if !self.nodes.contains_key(&start) {
            return Err(GraphError::MissingNode(start));
        }
        if !self.nodes.contains_key(&end) {
            return Err(GraphError::MissingNode(end));
        }
        let id = RelId(self.next_rel);
        self.next_rel += 1;
        self.relationships.insert(
            id,
            RelRecord {
                rel_type,
                start,
                end,
                properties: Arc::new(PropertyMap::new()),
            },
        );
        Ok(id)
    }

    /// Sets (or replaces) a node property.
    ///
    /// # Errors
    ///
    /// [`GraphError::MissingNode`] when the node does not exist.
    pub fn set_node_property(
        &mut self,
        node: NodeId,
        name: &str,
        value: impl Into<PropertyValue>,
    ) -> Result<(), GraphError> {
        let Some(properties) = self.nodes.get_mut(&node) else {
            return Err(GraphError::MissingNode(node));
        };
        Arc::make_mut(properties).insert(name.to_owned(), value.into());
        Ok(())
    }

    /// Sets (or replaces) a relationship property.
    ///
    /// # Errors
    ///
    /// [`GraphError::MissingRelationship`] when the relationship does not
    /// exist.
    pub fn set_relationship_property(
        &mut self,
        relationship: RelId,
        name: &str,
        value: impl Into<PropertyValue>,
    ) -> Result<(), GraphError> {
        let Some(record) = self.relationships.get_mut(&relationship) else {
            return Err(GraphError::MissingRelationship(relationship));
        };
        Arc::make_mut(&mut record.properties).insert(name.to_owned(), value.into());
        Ok(())
    }

    /// Mints a handle for a node, carrying the current property snapshot.
    #[must_use]
    pub fn node(&self, id: NodeId) -> Option<Node> {
        let properties = self.nodes.get(&id)?;
        Some(Node {
            id,
            properties: Arc::clone(properties),
        })
    }

    /// Mints a handle for a relationship, resolving both endpoint handles.
    #[must_use]
    pub fn relationship(&self, id: RelId) -> Option<Relationship> {
        let record = self.relationships.get(&id)?;
        let start = self.node(record.start)?;
        let end = self.node(record.end)?;
        Some(Relationship {
            id,
            rel_type: record.rel_type,
            start,
            end,
            properties: Arc::clone(&record.properties),
        })
    }

    /// Number of nodes in the graph.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of relationships in the graph.
    #[must_use]
    pub fn relationship_count(&self) -> usize {
        self.relationships.len()
    }

    /// Builds a path from a start node across the given relationships, in
    /// order, minting fresh handles along the way.
    ///
    /// # Errors
    ///
    /// [`GraphError::MissingNode`] / [`GraphError::MissingRelationship`] for
    /// unknown ids, [`GraphError::DisconnectedHop`] when a relationship does
    /// not touch the walk's current end.
    pub fn assemble_path(&self, start: NodeId, hops: &[RelId]) -> Result<Path, GraphError> {
        let first = self.node(start).ok_or(GraphError::MissingNode(start))?;
        let mut path = Path::starting_at(first);
        for &rel_id in hops {
            let relationship = self
                .relationship(rel_id)
                .ok_or(GraphError::MissingRelationship(rel_id))?;
            path = path.hop(relationship)?;
        }
        Ok(path)
    }
}

#[cfg(test)]
#[allow(clippy::expect_used)]
mod tests {
    use crate::ident::make_rel_type_id;

    use super::*;

    fn graph_with_node(value: i64) -> (MemoryGraph, NodeId) {
        let mut graph = MemoryGraph::new();
        let node = graph.create_node();
        graph
            .set_node_property(node, "value", value)
            .expect("node exists");
        (graph, node)
    }

    #[test]
    fn properties_roundtrip_through_handles() {
        let (graph, id) = graph_with_node(7);
        let handle = graph.node(id).expect("node exists");
        assert_eq!(handle.property("value"), Some(PropertyValue::Int(7)));
        assert_eq!(handle.property("absent"), None);
    }

    #[test]
    fn handles_are_snapshots() {
        let (mut graph, id) = graph_with_node(1);
        let before = graph.node(id).expect("node exists");
        graph
            .set_node_property(id, "value", 2_i64)
            .expect("node exists");
        let after = graph.node(id).expect("node exists");

        assert_eq!(before.property("value"), Some(PropertyValue::Int(1)));
        assert_eq!(after.property("value"), Some(PropertyValue::Int(2)));
        // Identity is unaffected by the property change.
        assert_eq!(before, after);
    }

    #[test]
    fn relationship_endpoints_and_type_match() {
        let mut graph = MemoryGraph::new();
        let a = graph.create_node();
        let b = graph.create_node();
        let knows = make_rel_type_id("KNOWS");
        let rel_id = graph.create_relationship(a, b, knows).expect("nodes exist");
        graph
            .set_relationship_property(rel_id, "since", 2019_i64)
            .expect("relationship exists");

        let rel = graph.relationship(rel_id).expect("relationship exists");
        assert!(rel.is_type(knows));
        assert!(!rel.is_type(make_rel_type_id("LIKES")));
        assert_eq!(rel.start_node().id(), a);
        assert_eq!(rel.end_node().id(), b);
        assert_eq!(rel.property("since"), Some(PropertyValue::Int(2019)));
    }

    #[test]
    fn create_relationship_rejects_missing_endpoints() {
        let mut graph = MemoryGraph::new();
        let a = graph.create_node();
        let ghost = NodeId(999);
        let err = graph
            .create_relationship(a, ghost, make_rel_type_id("KNOWS"))
            .expect_err("endpoint is missing");
        assert_eq!(err, GraphError::MissingNode(ghost));
    }

    #[test]
    fn paths_walk_relationships_in_either_direction() {
        let mut graph = MemoryGraph::new();
        let company = graph.create_node();
        let department = graph.create_node();
        let employee = graph.create_node();
        let dept_of = make_rel_type_id("DEPARTMENT_OF");
        let works_for = make_rel_type_id("WORKS_FOR");
        // Both relationships point *toward* the walk's origin, as an
        // undirected expansion would encounter them.
        let r1 = graph
            .create_relationship(department, company, dept_of)
            .expect("nodes exist");
        let r2 = graph
            .create_relationship(employee, department, works_for)
            .expect("nodes exist");

        let path = graph.assemble_path(company, &[r1, r2]).expect("connected");
        assert_eq!(path.length(), 2);
        assert_eq!(path.end_node().id(), employee);
        let ids: Vec<NodeId> = path.nodes().map(|n| n.id()).collect();
        assert_eq!(ids, vec![company, department, employee]);
        let rels: Vec<RelId> = path.relationships().map(|r| r.id()).collect();
        assert_eq!(rels, vec![r1, r2]);
    }

    #[test]
    fn disconnected_hops_are_rejected() {
        let mut graph = MemoryGraph::new();
        let a = graph.create_node();
        let b = graph.create_node();
        let c = graph.create_node();
        let d = graph.create_node();
        let knows = make_rel_type_id("KNOWS");
        let elsewhere = graph
            .create_relationship(c, d, knows)
            .expect("nodes exist");
        let _ = graph.create_relationship(a, b, knows).expect("nodes exist");

        let err = graph
            .assemble_path(a, &[elsewhere])
            .expect_err("hop does not touch the path");
        assert_eq!(
            err,
            GraphError::DisconnectedHop {
                relationship: elsewhere
            }
        );
    }

    #[test]
    fn single_node_paths_have_an_end_node() {
        let (graph, id) = graph_with_node(0);
        let path = graph.assemble_path(id, &[]).expect("node exists");
        assert_eq!(path.length(), 0);
        assert_eq!(path.end_node().id(), id);
        assert_eq!(path.nodes().count(), 1);
        assert_eq!(path.relationships().count(), 0);
    }
}
