//! Fragmentation and assembly over random interval families.

use layered_corpus::{Node, Slot};
use crate::{fragment, is_laminar, Chunk, FragmentTree};
use proptest::prelude::*;
use std::cmp::Reverse;
use std::collections::{BTreeMap, BTreeSet};

const TYPES: usize = 4;

/// One chunk per node, spread over the non-slot types, plus one single-slot
/// chunk per slot in the last type.
fn families() -> impl Strategy<Value = Vec<BTreeSet<Chunk>>> {
    prop::collection::vec((0..TYPES - 1, 1u32..=20, 0u32..8), 1..24).prop_map(|spans| {
        let mut chunks = vec![BTreeSet::new(); TYPES];
        let mut max_slot = 0;
        for (i, (position, begin, extra)) in spans.into_iter().enumerate() {
            let node = 100 + i as Node;
            chunks[position].insert(Chunk::new(node, begin, begin + extra));
            max_slot = max_slot.max(begin + extra);
        }
        for s in 1..=max_slot {
            chunks[TYPES - 1].insert(Chunk::new(s, s, s));
        }
        chunks
    })
}

fn slots_per_node(chunks: &[BTreeSet<Chunk>]) -> BTreeMap<Node, Vec<Slot>> {
    let mut slots: BTreeMap<Node, Vec<Slot>> = BTreeMap::new();
    for chunk in chunks.iter().flatten() {
        slots.entry(chunk.node).or_default().extend(chunk.begin..=chunk.end);
    }
    for list in slots.values_mut() {
        list.sort_unstable();
    }
    slots
}

fn identity(n: Node) -> u32 {
    n
}

proptest! {
    #[test]
    fn fragments_are_laminar(mut chunks in families()) {
        fragment(&mut chunks, identity);
        let all: Vec<Chunk> = chunks.iter().flatten().copied().collect();
        prop_assert!(is_laminar(&all));
    }

    #[test]
    fn fragments_keep_every_slot_once(mut chunks in families()) {
        let before = slots_per_node(&chunks);
        fragment(&mut chunks, identity);
        prop_assert_eq!(slots_per_node(&chunks), before);
    }

    #[test]
    fn fragmenting_twice_changes_nothing(mut chunks in families()) {
        fragment(&mut chunks, identity);
        let once = chunks.clone();
        fragment(&mut chunks, identity);
        prop_assert_eq!(chunks, once);
    }

    #[test]
    fn every_fragment_lands_in_the_tree_once(mut chunks in families()) {
        fragment(&mut chunks, identity);
        let mut sorted: Vec<Chunk> = chunks.iter().flatten().copied().collect();
        sorted.sort_by_key(|c| (c.begin, Reverse(c.end), c.node));

        let tree = FragmentTree::assemble(&sorted, |chunk| *chunk);
        prop_assert_eq!(tree.len(), sorted.len());

        let mut seen = BTreeSet::new();
        for (id, _) in tree.iter().skip(1) {
            let chunk = tree.chunk(id).copied();
            prop_assert_eq!(chunk, tree.info(id).copied());
            let chunk = chunk.unwrap();
            prop_assert!(seen.insert(chunk));
            if let Some(parent) = tree.parent(id).and_then(|p| tree.chunk(p)) {
                prop_assert!(parent.contains(&chunk), "{:?} not inside {:?}", chunk, parent);
            }
        }
        prop_assert_eq!(seen.len(), sorted.len());
    }
}
