// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Identifier types for graph entities and relationship types.
use core::fmt;

use blake3::Hasher;

/// Canonical 256-bit hash used for relationship-type addressing.
pub type Hash = [u8; 32];

/// Strongly typed identifier for a relationship type.
///
/// `RelTypeId` values are produced by [`make_rel_type_id`], which hashes a
/// label under a dedicated domain prefix; the wrapper prevents accidental
/// mixing with other identifier kinds. Ids are not reversible back into
/// labels; callers that need the label for display must keep it themselves.
#[repr(transparent)]
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RelTypeId(pub Hash);

impl RelTypeId {
    /// Returns the canonical byte representation of this id.
    #[must_use]
    pub fn as_bytes(&self) -> &Hash {
        &self.0
    }
}

impl fmt::Display for RelTypeId {
    /// Shortened hex form (first 8 bytes) for error messages and logs.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&hex::encode(&self.0[0..8]))
    }
}

/// Produces a stable, domain-separated relationship-type identifier
/// (prefix `b"reltype:"`) using BLAKE3.
#[must_use]
pub fn make_rel_type_id(label: &str) -> RelTypeId {
    let mut hasher = Hasher::new();
    hasher.update(b"reltype:");
    hasher.update(label.as_bytes());
    RelTypeId(hasher.finalize().into())
}

/// Compact, process-local identifier for a node in the reference store.
///
/// Minted sequentially by [`crate::MemoryGraph`]; never serialized as a
/// stable address. Node handles compare by this id, which is what makes
/// node-valued grouping keys identity-based.
#[repr(transparent)]
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NodeId(pub u64);

/// Compact, process-local identifier for a relationship in the reference
/// store.
#[repr(transparent)]
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RelId(pub u64);
