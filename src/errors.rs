//! Error types for corpus loading and feature lookup.
//!
//! Lookup misses (a node without a value, an out-of-range node) are not errors:
//! they come back as `None`. The variants here are either integrity violations
//! found while loading, which make the corpus unusable, or a request for a
//! feature that was never loaded.

use crate::{Node, Slot};
use thiserror::Error;

/// The kind of feature a failed lookup asked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeatureKind {
    Node,
    Edge,
    Computed,
}

impl std::fmt::Display for FeatureKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FeatureKind::Node => f.write_str("node"),
            FeatureKind::Edge => f.write_str("edge"),
            FeatureKind::Computed => f.write_str("computed"),
        }
    }
}

/// Errors raised while building a corpus or resolving features by name.
#[derive(Debug, Error, PartialEq)]
pub enum CorpusError {
    /// An extent mentions a slot outside `1..=max_slot`.
    #[error("node {node}: slot {slot} outside 1..={max_slot}")]
    SlotOutOfRange { node: Node, slot: Slot, max_slot: Slot },

    /// A non-slot node has no slots at all.
    #[error("node {node}: empty extent")]
    EmptyExtent { node: Node },

    /// Extent slots must be strictly increasing.
    #[error("node {node}: extent is not strictly increasing")]
    UnorderedExtent { node: Node },

    /// The type table and the extent table disagree on the number of non-slot nodes.
    #[error("{otypes} non-slot types but {oslots} non-slot extents")]
    TableLengthMismatch { otypes: usize, oslots: usize },

    /// Slots plus non-slot nodes do not fit in the node id range.
    #[error("{max_slot} slots and {non_slots} non-slot nodes exceed the node id range")]
    NodeSpaceOverflow { max_slot: Slot, non_slots: usize },

    /// The rank table does not cover every node exactly once.
    #[error("rank table has {found} entries, expected {expected}")]
    RankLengthMismatch { expected: usize, found: usize },

    /// The rank table is not a permutation of `0..max_node`.
    #[error("rank table is not a permutation: rank {rank} of node {node} is repeated or out of range")]
    RankNotPermutation { node: Node, rank: u32 },

    /// A node has a type that is missing from the levels table.
    #[error("type {name:?} is not in the levels table")]
    UnknownType { name: String },

    /// More distinct types than the compact type codes can address.
    #[error("{count} node types exceed the type code capacity")]
    TooManyTypes { count: usize },

    /// The slot type must close the canonical type ordering.
    #[error("slot type {slot_type:?} must be the last level")]
    SlotTypeNotLast { slot_type: String },

    /// A type appears twice in the levels table.
    #[error("type {name:?} appears more than once in the levels table")]
    DuplicateType { name: String },

    /// A level has a support range that is empty or outside the slot range.
    #[error("type {name:?}: invalid support {min_slot}..={max_slot}")]
    InvalidSupport {
        name: String,
        min_slot: Slot,
        max_slot: Slot,
    },

    /// A feature refers to a node outside `1..=max_node`.
    #[error("feature {feature:?}: node {node} outside 1..={max_node}")]
    NodeOutOfRange {
        feature: String,
        node: Node,
        max_node: Node,
    },

    /// Two features were registered under the same name.
    #[error("feature {name:?} is defined more than once")]
    DuplicateFeature { name: String },

    /// A feature was requested by name but is not loaded.
    #[error("{kind} feature {name:?} not loaded")]
    FeatureNotLoaded { kind: FeatureKind, name: String },
}

/// Result type for corpus operations.
pub type CorpusResult<T> = Result<T, CorpusError>;
