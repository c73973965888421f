//! Containment queries over node extents.

use crate::{ExtentTable, Node, Slot, TypeTable};
use std::collections::{BTreeSet, HashSet};

/// Answers "which nodes lie inside this node?".
///
/// Implementations return nodes in canonical order.
pub trait Locality {
    /// All nodes other than `n` whose slots are a subset of the slots of `n`,
    /// optionally restricted to the given types.
    fn embedded(&self, n: Node, types: Option<&BTreeSet<String>>) -> Vec<Node>;
}

/// For every slot, the non-slot nodes whose extent contains it.
#[derive(Debug)]
pub(crate) struct SlotIndex {
    offsets: Vec<u32>,
    nodes: Vec<Node>,
}

impl SlotIndex {
    pub(crate) fn build(otype: &TypeTable, oslots: &ExtentTable) -> Self {
        let max_slot = otype.max_slot();
        let non_slots = otype.max_slot() + 1..=otype.max_node();

        let mut counts = vec![0u32; max_slot as usize + 1];
        for m in non_slots.clone() {
            for &s in oslots.extent_of(m).iter() {
                counts[s as usize] += 1;
            }
        }

        // offsets[s]..offsets[s + 1] holds the nodes containing slot s
        let mut offsets = vec![0u32; max_slot as usize + 2];
        for s in 1..=max_slot as usize {
            offsets[s + 1] = offsets[s] + counts[s];
        }

        let mut fill = offsets.clone();
        let mut nodes = vec![0; offsets[max_slot as usize + 1] as usize];
        for m in non_slots {
            for &s in oslots.extent_of(m).iter() {
                nodes[fill[s as usize] as usize] = m;
                fill[s as usize] += 1;
            }
        }

        Self { offsets, nodes }
    }

    /// Non-slot nodes whose extent contains slot `s`, in node order.
    pub(crate) fn containing(&self, s: Slot) -> &[Node] {
        let s = s as usize;
        match (self.offsets.get(s), self.offsets.get(s + 1)) {
            (Some(&b), Some(&e)) => &self.nodes[b as usize..e as usize],
            _ => &[],
        }
    }
}

/// Whether sorted `inner` is a subset of sorted `outer`.
pub(crate) fn is_subset(inner: &[Slot], outer: &[Slot]) -> bool {
    let mut outer = outer.iter();
    inner
        .iter()
        .all(|s| outer.by_ref().any(|o| o == s))
}

/// Candidate collection shared by the containment queries.
pub(crate) fn embedded_candidates(
    index: &SlotIndex,
    slots: &[Slot],
) -> HashSet<Node> {
    let mut candidates: HashSet<Node> = slots.iter().copied().collect();
    for &s in slots {
        candidates.extend(index.containing(s).iter().copied());
    }
    candidates
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn subset_of_sorted_slices() {
        assert!(is_subset(&[2, 3], &[1, 2, 3, 4]));
        assert!(is_subset(&[1, 4], &[1, 2, 3, 4]));
        assert!(is_subset(&[], &[1]));
        assert!(!is_subset(&[2, 5], &[1, 2, 3, 4]));
        assert!(!is_subset(&[3, 4], &[3, 5, 6]));
    }
}
