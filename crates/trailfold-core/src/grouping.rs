// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Eager partitioning of paths into buckets by composite key.
use std::collections::hash_map::Entry;

use rustc_hash::FxHashMap;
use thiserror::Error;

use trailfold_graph::{GraphNode, GraphPath, PropertyValue};

use crate::aggregate::{Accumulator, AggregateError};
use crate::describe::GroupingDescription;
use crate::extract::ExtractError;
use crate::key::CompositeKey;
use crate::offset::resolve_node;

/// Budgets applied while a grouping materializes.
///
/// Unbounded by default. Each cap aborts construction before the
/// offending path or bucket is stored.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GroupLimits {
    max_groups: Option<usize>,
    max_paths: Option<usize>,
}

impl GroupLimits {
    /// No caps; what [`GroupingDescription::group_from`] uses.
    #[must_use]
    pub fn unbounded() -> Self {
        Self::default()
    }

    /// Caps the number of distinct buckets.
    #[must_use]
    pub fn max_groups(mut self, limit: usize) -> Self {
        self.max_groups = Some(limit);
        self
    }

    /// Caps the total number of paths across all buckets.
    #[must_use]
    pub fn max_paths(mut self, limit: usize) -> Self {
        self.max_paths = Some(limit);
        self
    }
}

/// Error returned when a grouping cannot be built.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GroupError {
    /// Key extraction failed for a path.
    #[error(transparent)]
    Extract(#[from] ExtractError),
    /// Construction hit the distinct-bucket budget.
    #[error("grouping exceeded the budget of {limit} groups")]
    TooManyGroups {
        /// The configured cap.
        limit: usize,
    },
    /// Construction hit the total-path budget.
    #[error("grouping exceeded the budget of {limit} paths")]
    TooManyPaths {
        /// The configured cap.
        limit: usize,
    },
}

/// Paths partitioned into buckets by composite key.
///
/// Built once by consuming a path sequence eagerly; read-only afterwards,
/// so aggregate calls repeat freely with no side effects. Buckets keep
/// the encounter order of their paths; the order of the buckets
/// themselves is unspecified.
#[derive(Debug)]
pub struct Grouping<P: GraphPath> {
    buckets: FxHashMap<CompositeKey<P::Node>, Vec<P>>,
    path_count: usize,
}

impl<P: GraphPath> Grouping<P> {
    pub(crate) fn build<I>(
        description: &GroupingDescription<P>,
        paths: I,
        limits: GroupLimits,
    ) -> Result<Self, GroupError>
    where
        I: IntoIterator<Item = P>,
    {
        let mut buckets: FxHashMap<CompositeKey<P::Node>, Vec<P>> = FxHashMap::default();
        let mut path_count = 0_usize;
        for path in paths {
            if let Some(limit) = limits.max_paths {
                if path_count >= limit {
                    return Err(GroupError::TooManyPaths { limit });
                }
            }
            let key = description.grouping_key(&path)?;
            let group_count = buckets.len();
            match buckets.entry(key) {
                Entry::Occupied(mut bucket) => bucket.get_mut().push(path),
                Entry::Vacant(slot) => {
                    if let Some(limit) = limits.max_groups {
                        if group_count >= limit {
                            return Err(GroupError::TooManyGroups { limit });
                        }
                    }
                    slot.insert(vec![path]);
                }
            }
            path_count += 1;
        }

        #[cfg(feature = "telemetry")]
        crate::telemetry::grouped(path_count, buckets.len());

        Ok(Self {
            buckets,
            path_count,
        })
    }

    /// Number of buckets.
    #[must_use]
    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    /// Whether the grouping holds no buckets (no paths were grouped).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    /// Total number of paths across all buckets.
    #[must_use]
    pub fn path_count(&self) -> usize {
        self.path_count
    }

    /// The composite keys, in unspecified order.
    pub fn keys(&self) -> impl Iterator<Item = &CompositeKey<P::Node>> + '_ {
        self.buckets.keys()
    }

    /// The paths grouped under `key`, in encounter order.
    #[must_use]
    pub fn paths(&self, key: &CompositeKey<P::Node>) -> Option<&[P]> {
        self.buckets.get(key).map(Vec::as_slice)
    }

    /// The (key, bucket) pairs, in unspecified order.
    pub fn buckets(&self) -> impl Iterator<Item = (&CompositeKey<P::Node>, &[P])> + '_ {
        self.buckets
            .iter()
            .map(|(key, paths)| (key, paths.as_slice()))
    }

    /// Aggregates the node at `offset` of every path, bucket by bucket.
    ///
    /// Each bucket gets one fresh accumulator from `factory` and is fed
    /// its paths' resolved nodes in encounter order. Either every bucket
    /// finishes and the full result map is returned, or the first failure
    /// aborts the call with nothing.
    ///
    /// # Errors
    ///
    /// [`AggregateError`] from offset resolution or the accumulator.
    pub fn aggregate_node<A, F>(
        &self,
        offset: isize,
        mut factory: F,
    ) -> Result<FxHashMap<CompositeKey<P::Node>, A::Output>, AggregateError>
    where
        A: Accumulator<P::Node>,
        F: FnMut() -> A,
    {
        let mut results = FxHashMap::default();
        for (key, paths) in &self.buckets {
            let mut accumulator = factory();
            for path in paths {
                accumulator.accumulate(resolve_node(path, offset)?)?;
            }
            results.insert(key.clone(), accumulator.finish());
        }

        #[cfg(feature = "telemetry")]
        crate::telemetry::aggregated("node", results.len());

        Ok(results)
    }

    /// Aggregates `property` of the node at `offset` of every path,
    /// bucket by bucket, with the same per-bucket protocol as
    /// [`Self::aggregate_node`].
    ///
    /// # Errors
    ///
    /// [`AggregateError::PropertyNotFound`] when any resolved node lacks
    /// the property, plus everything [`Self::aggregate_node`] can raise.
    pub fn aggregate_node_property<A, F>(
        &self,
        offset: isize,
        property: &str,
        mut factory: F,
    ) -> Result<FxHashMap<CompositeKey<P::Node>, A::Output>, AggregateError>
    where
        A: Accumulator<PropertyValue>,
        F: FnMut() -> A,
    {
        let mut results = FxHashMap::default();
        for (key, paths) in &self.buckets {
            let mut accumulator = factory();
            for path in paths {
                let node = resolve_node(path, offset)?;
                let Some(value) = node.property(property) else {
                    return Err(AggregateError::PropertyNotFound {
                        offset,
                        property: property.to_owned(),
                    });
                };
                accumulator.accumulate(value)?;
            }
            results.insert(key.clone(), accumulator.finish());
        }

        #[cfg(feature = "telemetry")]
        crate::telemetry::aggregated("node_property", results.len());

        Ok(results)
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::float_cmp)]
mod tests {
    use trailfold_graph::{MemoryGraph, NodeId, Path};

    use crate::aggregate::{Collect, Count, Sum};
    use crate::key::KeyComponent;

    use super::*;

    // Single-node paths are enough to exercise the bucketing itself;
    // offset 0 resolves each path's only node.
    fn single_node_paths(values: &[i64]) -> (Vec<Path>, Vec<NodeId>) {
        let mut graph = MemoryGraph::new();
        let mut paths = Vec::new();
        let mut ids = Vec::new();
        for &value in values {
            let id = graph.create_node();
            graph
                .set_node_property(id, "value", value)
                .expect("node exists");
            ids.push(id);
        }
        for &id in &ids {
            paths.push(graph.assemble_path(id, &[]).expect("node exists"));
        }
        (paths, ids)
    }

    fn by_value() -> GroupingDescription<Path> {
        GroupingDescription::new().group_by_node_property(0, "value")
    }

    fn value_key(value: i64) -> CompositeKey<trailfold_graph::Node> {
        CompositeKey::new().with("value", KeyComponent::Value(PropertyValue::Int(value)))
    }

    #[test]
    fn buckets_keep_encounter_order() {
        let (paths, ids) = single_node_paths(&[1, 2, 1, 1]);
        let grouping = by_value().group_from(paths).expect("grouping succeeds");

        assert_eq!(grouping.len(), 2);
        assert_eq!(grouping.path_count(), 4);
        let ones = grouping.paths(&value_key(1)).expect("bucket exists");
        let got: Vec<NodeId> = ones.iter().map(|path| path.end_node().id()).collect();
        assert_eq!(got, vec![ids[0], ids[2], ids[3]]);
        assert!(grouping.paths(&value_key(9)).is_none());
    }

    #[test]
    fn empty_description_collapses_everything_into_one_bucket() {
        let (paths, _) = single_node_paths(&[1, 2, 3]);
        let description: GroupingDescription<Path> = GroupingDescription::new();
        let grouping = description.group_from(paths).expect("grouping succeeds");

        assert_eq!(grouping.len(), 1);
        let universal = grouping
            .paths(&CompositeKey::new())
            .expect("universal bucket exists");
        assert_eq!(universal.len(), 3);
    }

    #[test]
    fn grouping_nothing_yields_no_buckets() {
        let grouping = by_value()
            .group_from(Vec::<Path>::new())
            .expect("grouping succeeds");
        assert!(grouping.is_empty());
        assert_eq!(grouping.path_count(), 0);
        assert_eq!(grouping.keys().count(), 0);
    }

    #[test]
    fn group_budget_aborts_on_the_offending_bucket() {
        let (paths, _) = single_node_paths(&[1, 2]);
        let err = by_value()
            .group_from_with_limits(paths, GroupLimits::unbounded().max_groups(1))
            .expect_err("second key exceeds the cap");
        assert_eq!(err, GroupError::TooManyGroups { limit: 1 });
    }

    #[test]
    fn path_budget_aborts_on_the_offending_path() {
        let (paths, _) = single_node_paths(&[1, 1, 1]);
        let err = by_value()
            .group_from_with_limits(paths, GroupLimits::unbounded().max_paths(2))
            .expect_err("third path exceeds the cap");
        assert_eq!(err, GroupError::TooManyPaths { limit: 2 });
    }

    #[test]
    fn budgets_at_capacity_pass() {
        let (paths, _) = single_node_paths(&[1, 2, 1]);
        let limits = GroupLimits::unbounded().max_groups(2).max_paths(3);
        let grouping = by_value()
            .group_from_with_limits(paths, limits)
            .expect("exactly at both caps");
        assert_eq!(grouping.len(), 2);
        assert_eq!(grouping.path_count(), 3);
    }

    #[test]
    fn aggregate_calls_repeat_without_side_effects() {
        let (paths, _) = single_node_paths(&[1, 2, 1, 1]);
        let grouping = by_value().group_from(paths).expect("grouping succeeds");

        let first = grouping
            .aggregate_node_property(0, "value", Sum::new)
            .expect("aggregation succeeds");
        let second = grouping
            .aggregate_node_property(0, "value", Sum::new)
            .expect("aggregation succeeds");
        assert_eq!(first, second);
        assert_eq!(first.get(&value_key(1)), Some(&3.0));
        assert_eq!(first.get(&value_key(2)), Some(&2.0));
        assert_eq!(grouping.path_count(), 4);
    }

    #[test]
    fn aggregate_node_feeds_whole_nodes() {
        let (paths, ids) = single_node_paths(&[5, 5]);
        let grouping = by_value().group_from(paths).expect("grouping succeeds");

        let counts = grouping
            .aggregate_node(0, Count::new)
            .expect("aggregation succeeds");
        assert_eq!(counts.get(&value_key(5)), Some(&2));

        let collected = grouping
            .aggregate_node(0, Collect::new)
            .expect("aggregation succeeds");
        let bucket = collected.get(&value_key(5)).expect("bucket exists");
        let got: Vec<NodeId> = bucket.iter().map(trailfold_graph::Node::id).collect();
        assert_eq!(got, ids);
    }

    #[test]
    fn missing_aggregation_property_aborts_with_context() {
        let (paths, _) = single_node_paths(&[1, 2]);
        let grouping = by_value().group_from(paths).expect("grouping succeeds");

        let err = grouping
            .aggregate_node_property(0, "ghost", Sum::new)
            .expect_err("property is absent");
        assert_eq!(
            err,
            AggregateError::PropertyNotFound {
                offset: 0,
                property: "ghost".into()
            }
        );
    }
}
