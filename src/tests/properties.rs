//! Invariants over random corpora.

use crate::{Corpus, CorpusData, Level, Locality, Node, Slot, Value};
use proptest::prelude::*;
use std::cmp::Reverse;
use std::collections::BTreeMap;

const TYPES: [&str; 3] = ["phrase", "chunk", "word"];

/// Random non-slot nodes over up to nine slots, some with a gap, and a
/// `kind` feature on a random subset of all nodes.
fn corpora() -> impl Strategy<Value = CorpusData> {
    let spans = prop::collection::vec((0usize..2, 0u32..9, 0u32..5, any::<bool>()), 0..8);
    let kinds = prop::collection::vec(prop::option::of(0i64..3), 20);
    (1u32..10, spans, kinds).prop_map(|(max_slot, spans, kinds)| {
        let mut otypes = Vec::new();
        let mut oslots = Vec::new();
        for (position, begin, extra, gap) in spans {
            let begin = 1 + begin % max_slot;
            let end = (begin + extra).min(max_slot);
            let mut slots: Vec<Slot> = (begin..=end).collect();
            if gap && slots.len() >= 3 {
                slots.remove(1);
            }
            otypes.push(TYPES[position].to_string());
            oslots.push(slots);
        }

        let slot_position = TYPES.len() - 1;
        let mut keyed: Vec<(Slot, Reverse<Slot>, usize, Node)> = (1..=max_slot)
            .map(|s| (s, Reverse(s), slot_position, s))
            .collect();
        for (i, (t, slots)) in otypes.iter().zip(&oslots).enumerate() {
            let position = TYPES.iter().position(|name| name == t).unwrap();
            let n = max_slot + 1 + i as Node;
            keyed.push((slots[0], Reverse(*slots.last().unwrap()), position, n));
        }
        keyed.sort();
        let mut rank = vec![0; keyed.len()];
        for (r, key) in keyed.iter().enumerate() {
            rank[key.3 as usize - 1] = r as u32;
        }

        let max_node = max_slot + otypes.len() as Node;
        let kind: BTreeMap<Node, Value> = (1..=max_node)
            .filter_map(|n| kinds[n as usize - 1].map(|v| (n, Value::Int(v))))
            .collect();

        CorpusData {
            max_slot,
            slot_type: "word".to_string(),
            otypes,
            oslots,
            rank,
            levels: TYPES
                .iter()
                .map(|t| Level::new(*t, 1.0, 1, max_slot))
                .collect(),
            node_features: [("kind".to_string(), kind)].into_iter().collect(),
            edge_features: BTreeMap::new(),
        }
    })
}

proptest! {
    #[test]
    fn walk_inverts_rank(data in corpora()) {
        let corpus = Corpus::load(data).unwrap();
        let walked: Vec<Node> = corpus.rank().walk().collect();
        prop_assert_eq!(walked.len(), corpus.max_node() as usize);
        for (r, &n) in walked.iter().enumerate() {
            prop_assert_eq!(corpus.rank().rank(n), Some(r as u32));
        }
    }

    #[test]
    fn nodes_with_matches_a_full_scan(data in corpora()) {
        let corpus = Corpus::load(data).unwrap();
        let kind = corpus.fs("kind").unwrap();
        for v in 0..3 {
            let value = Value::Int(v);
            let scanned = corpus.sort_nodes(
                (1..=corpus.max_node()).filter(|&n| kind.value_of(n) == Some(&value)),
            );
            let found = kind.nodes_with(&value);
            prop_assert_eq!(&found, &scanned);
            for pair in found.windows(2) {
                prop_assert!(corpus.sort_key(pair[0]) < corpus.sort_key(pair[1]));
            }
        }
    }

    #[test]
    fn embedded_and_embedders_agree(data in corpora()) {
        let corpus = Corpus::load(data).unwrap();
        for n in corpus.max_slot() + 1..=corpus.max_node() {
            for m in corpus.embedded(n, None) {
                prop_assert!(corpus.embedders(m).contains(&n), "{} inside {}", m, n);
            }
        }
        for m in 1..=corpus.max_node() {
            for n in corpus.embedders(m) {
                prop_assert!(corpus.embedded(n, None).contains(&m), "{} inside {}", m, n);
            }
        }
    }
}
