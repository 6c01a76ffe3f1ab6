// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Resolves integer offsets to nodes on a path.
use thiserror::Error;

use trailfold_graph::GraphPath;

/// Error returned when an offset does not land on a node of the path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum OffsetError {
    /// A positive offset indexed past the final node.
    #[error("offset {offset} is out of range for a path of length {length}")]
    OutOfRange {
        /// The offset that was requested.
        offset: isize,
        /// Relationship count of the path it was applied to.
        length: usize,
    },
    /// A negative offset reached back past the start node.
    #[error("negative offset {offset} reaches before the start of a path of length {length}")]
    NegativeOutOfRange {
        /// The offset that was requested.
        offset: isize,
        /// Relationship count of the path it was applied to.
        length: usize,
    },
}

/// Resolves `offset` to a node on `path`.
///
/// The addressing scheme:
///
/// - `0` selects the path's end node, wherever the path ends.
/// - Positive offsets index the node sequence from the start, zero-based,
///   so a path of length `L` accepts offsets up to and including `L` (it
///   carries `L + 1` nodes, and offset `L` is the end node again).
/// - Negative offsets count back from the end: `-1` is the node one hop
///   before the end, `-L` is the start node.
///
/// # Errors
///
/// [`OffsetError::OutOfRange`] when a positive offset walks off the end,
/// [`OffsetError::NegativeOutOfRange`] when a negative offset walks off
/// the start.
pub fn resolve_node<P: GraphPath>(path: &P, offset: isize) -> Result<P::Node, OffsetError> {
    let length = path.length();
    if offset == 0 {
        return Ok(path.end_node());
    }
    if offset > 0 {
        let index = offset.unsigned_abs();
        if index > length {
            return Err(OffsetError::OutOfRange { offset, length });
        }
        return path
            .nodes()
            .nth(index)
            .ok_or(OffsetError::OutOfRange { offset, length });
    }
    let Some(index) = length.checked_add_signed(offset) else {
        return Err(OffsetError::NegativeOutOfRange { offset, length });
    };
    path.nodes()
        .nth(index)
        .ok_or(OffsetError::NegativeOutOfRange { offset, length })
}
