//! Small corpora for unravel tests.

use layered_corpus::{Corpus, CorpusData, Level, Node, Slot, Value};
use std::cmp::Reverse;
use std::collections::BTreeMap;

pub const SLOT_TYPE: &str = "word";

/// Builds a corpus from a list of typed extents.
///
/// Node ids are handed out in insertion order after the slots. The rank sorts
/// by first slot, then last slot descending, then type order, which puts
/// containers before their contents.
pub struct CorpusBuilder {
    max_slot: Slot,
    types: Vec<String>,
    nodes: Vec<(String, Vec<Slot>)>,
    node_features: BTreeMap<String, BTreeMap<Node, Value>>,
}

impl CorpusBuilder {
    /// `types` in canonical order, without the slot type.
    pub fn new(max_slot: Slot, types: &[&str]) -> Self {
        let mut types: Vec<String> = types.iter().map(|t| t.to_string()).collect();
        types.push(SLOT_TYPE.to_string());
        Self {
            max_slot,
            types,
            nodes: Vec::new(),
            node_features: BTreeMap::new(),
        }
    }

    pub fn node(mut self, node_type: &str, slots: &[Slot]) -> Self {
        self.nodes.push((node_type.to_string(), slots.to_vec()));
        self
    }

    pub fn feature(mut self, name: &str, n: Node, value: impl Into<Value>) -> Self {
        self.node_features
            .entry(name.to_string())
            .or_default()
            .insert(n, value.into());
        self
    }

    pub fn build(self) -> Corpus {
        let max_slot = self.max_slot;
        let position = |t: &str| self.types.iter().position(|name| name == t).unwrap();

        let mut keyed: Vec<(Slot, Reverse<Slot>, usize, Node)> = (1..=max_slot)
            .map(|s| (s, Reverse(s), self.types.len() - 1, s))
            .collect();
        for (i, (t, slots)) in self.nodes.iter().enumerate() {
            let n = max_slot + 1 + i as Node;
            keyed.push((slots[0], Reverse(*slots.last().unwrap()), position(t), n));
        }
        keyed.sort();
        let mut rank = vec![0; keyed.len()];
        for (r, key) in keyed.iter().enumerate() {
            rank[key.3 as usize - 1] = r as u32;
        }

        let levels = self
            .types
            .iter()
            .map(|t| {
                let extents: Vec<&Vec<Slot>> = self
                    .nodes
                    .iter()
                    .filter(|(nt, _)| nt == t)
                    .map(|(_, slots)| slots)
                    .collect();
                if t == SLOT_TYPE || extents.is_empty() {
                    return Level::new(t.as_str(), 1.0, 1, max_slot);
                }
                let min = extents.iter().map(|slots| slots[0]).min().unwrap();
                let max = extents.iter().map(|slots| *slots.last().unwrap()).max().unwrap();
                let total: usize = extents.iter().map(|slots| slots.len()).sum();
                Level::new(t.as_str(), total as f64 / extents.len() as f64, min, max)
            })
            .collect();

        Corpus::load(CorpusData {
            max_slot,
            slot_type: SLOT_TYPE.to_string(),
            otypes: self.nodes.iter().map(|(t, _)| t.clone()).collect(),
            oslots: self.nodes.iter().map(|(_, slots)| slots.clone()).collect(),
            rank,
            levels,
            node_features: self.node_features,
            edge_features: BTreeMap::new(),
        })
        .unwrap()
    }
}

pub fn types(names: &[&str]) -> std::collections::BTreeSet<String> {
    names.iter().map(|name| name.to_string()).collect()
}
