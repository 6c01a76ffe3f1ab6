// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! trailfold-core: grouping and aggregation over graph-traversal paths.
//!
//! The `GROUP BY` of a path world: a composable [`GroupingDescription`]
//! derives one composite key per path, [`Grouping`] eagerly partitions a
//! path sequence into buckets by that key, and the [`Accumulator`]
//! protocol folds every bucket into a per-group aggregate (count, sum,
//! average, min/max, join, collect) looked up by [`CompositeKey`]. Paths
//! come from any provider of the `trailfold-graph` port traits.
#![forbid(unsafe_code)]
#![deny(missing_docs, rust_2018_idioms, unused_must_use)]
#![deny(
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    clippy::cargo,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    clippy::todo,
    clippy::unimplemented,
    clippy::dbg_macro,
    clippy::print_stdout,
    clippy::print_stderr
)]
#![allow(
    clippy::must_use_candidate,
    clippy::return_self_not_must_use,
    clippy::unreadable_literal,
    clippy::missing_const_for_fn,
    clippy::suboptimal_flops,
    clippy::redundant_pub_crate,
    clippy::many_single_char_names,
    clippy::module_name_repetitions,
    clippy::use_self
)]

mod aggregate;
mod describe;
mod extract;
mod grouping;
mod key;
mod offset;
#[cfg(feature = "telemetry")]
mod telemetry;

// Re-exports for stable public API
/// The accumulate/finish protocol and the built-in aggregates.
pub use aggregate::{Accumulator, AggregateError, Avg, Collect, Count, Join, Max, Min, Sum};
/// Immutable grouping descriptions.
pub use describe::GroupingDescription;
/// Key extraction from paths.
pub use extract::{
    ExtractError, FnExtractor, KeyExtractor, NodeAtOffset, NodePropertyAtOffset,
    RelationshipEndNode, RelationshipProperty, RelationshipStartNode,
};
/// The grouping engine and its budgets.
pub use grouping::{GroupError, GroupLimits, Grouping};
/// Composite grouping keys.
pub use key::{CompositeKey, KeyComponent};
/// Path offset resolution.
pub use offset::{resolve_node, OffsetError};
