// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! trailfold-graph: property-graph contract and in-memory reference store.
//!
//! Defines the port traits a graph implementation satisfies to feed the
//! trailfold grouping engine, the scalar property-value domain, and a
//! minimal in-memory store that mints snapshot handles and assembles
//! walk-order paths for tests and standalone use.
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

mod ident;
mod port;
mod store;
mod value;

// Re-exports for stable public API
/// Identifier types and the relationship-type constructor.
pub use ident::{make_rel_type_id, Hash, NodeId, RelId, RelTypeId};
/// Port traits implemented by graph providers.
pub use port::{GraphNode, GraphPath, GraphRelationship};
/// In-memory reference store, its handles, and path assembly.
pub use store::{GraphError, MemoryGraph, Node, Path, Relationship};
/// Scalar property values.
pub use value::{PropertyValue, ValueKind};
