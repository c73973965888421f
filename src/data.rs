//! Serializable corpus tables as produced by the offline build step.
//!
//! A loader (outside this crate) deserializes a [`CorpusData`] from whatever
//! storage it uses and hands it to [`Corpus::load`](crate::Corpus::load),
//! which validates it and builds the compact in-memory tables.

use crate::{Node, Slot, Value};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One row of the levels table: a node type with its slot support.
///
/// The order of the rows is the canonical type order; the slot type is last.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Level {
    pub name: String,
    /// Average number of slots per node of this type.
    #[serde(default)]
    pub avg_slots: f64,
    pub min_slot: Slot,
    pub max_slot: Slot,
}

impl Level {
    pub fn new(name: impl Into<String>, avg_slots: f64, min_slot: Slot, max_slot: Slot) -> Self {
        Self {
            name: name.into(),
            avg_slots,
            min_slot,
            max_slot,
        }
    }
}

/// Raw edge feature data.
///
/// The inverse map is optional; when absent it is derived on load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum EdgeData {
    /// Unlabeled adjacency: node → targets.
    Plain {
        forward: BTreeMap<Node, Vec<Node>>,
        #[serde(default)]
        inverse: Option<BTreeMap<Node, Vec<Node>>>,
    },
    /// Labeled adjacency: node → target → optional value.
    Valued {
        forward: BTreeMap<Node, BTreeMap<Node, Option<Value>>>,
        #[serde(default)]
        inverse: Option<BTreeMap<Node, BTreeMap<Node, Option<Value>>>>,
    },
}

/// Everything the core needs from a corpus build.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CorpusData {
    pub max_slot: Slot,
    pub slot_type: String,
    /// Types of nodes `max_slot + 1 ..`, in node order.
    pub otypes: Vec<String>,
    /// Extents of nodes `max_slot + 1 ..`, in node order.
    pub oslots: Vec<Vec<Slot>>,
    /// `rank[n - 1]` is the canonical rank of node `n`.
    pub rank: Vec<u32>,
    pub levels: Vec<Level>,
    #[serde(default)]
    pub node_features: BTreeMap<String, BTreeMap<Node, Value>>,
    #[serde(default)]
    pub edge_features: BTreeMap<String, EdgeData>,
}

impl CorpusData {
    /// The highest node id, or `None` when it does not fit in a [`Node`].
    pub fn max_node(&self) -> Option<Node> {
        Node::try_from(self.otypes.len())
            .ok()
            .and_then(|non_slots| self.max_slot.checked_add(non_slots))
    }
}
