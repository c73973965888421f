//! Canonical node order.
//!
//! The rank permutation is computed when the corpus is built and loaded as
//! data; this module only validates it and derives the inverse (the walk
//! order).

use crate::{CorpusError, CorpusResult, Node};

#[derive(Debug)]
pub struct RankIndex {
    /// `rank[n - 1]` is the rank of node `n`.
    rank: Vec<u32>,
    /// `order[r]` is the node with rank `r`.
    order: Vec<Node>,
}

impl RankIndex {
    pub(crate) fn build(max_node: Node, rank: Vec<u32>) -> CorpusResult<Self> {
        if rank.len() != max_node as usize {
            return Err(CorpusError::RankLengthMismatch {
                expected: max_node as usize,
                found: rank.len(),
            });
        }
        let mut order = vec![0; rank.len()];
        for (i, &r) in rank.iter().enumerate() {
            let node = i as Node + 1;
            match order.get_mut(r as usize) {
                Some(slot) if *slot == 0 => *slot = node,
                _ => return Err(CorpusError::RankNotPermutation { node, rank: r }),
            }
        }
        Ok(Self { rank, order })
    }

    pub fn rank(&self, n: Node) -> Option<u32> {
        if n == 0 {
            return None;
        }
        self.rank.get(n as usize - 1).copied()
    }

    /// Sort key for a node. Unknown nodes sort after all others.
    pub fn sort_key(&self, n: Node) -> u32 {
        self.rank(n).unwrap_or(u32::MAX)
    }

    /// Sort any collection of nodes into canonical order.
    pub fn sort_nodes<I: IntoIterator<Item = Node>>(&self, nodes: I) -> Vec<Node> {
        let mut nodes: Vec<Node> = nodes.into_iter().collect();
        nodes.sort_by_key(|&n| self.sort_key(n));
        nodes
    }

    /// All nodes in canonical order.
    pub fn walk(&self) -> impl Iterator<Item = Node> + '_ {
        self.order.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.rank.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rank.is_empty()
    }
}
