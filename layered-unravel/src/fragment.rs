//! Overlap resolution.
//!
//! Chunks of different nodes may cross each other. To nest them in a tree,
//! chunks are cut at the points where the boundaries of other chunks fall
//! inside them. Earlier types cut later types, and within one type longer
//! chunks cut shorter ones. Afterwards any two chunks are either disjoint or
//! nested.

use crate::Chunk;
use layered_corpus::{Node, Slot};
use std::cmp::Reverse;
use std::collections::{BTreeMap, BTreeSet};

type Splits = BTreeMap<Chunk, BTreeSet<Slot>>;

/// Where the boundaries of `p` cut through `q`.
///
/// A split point is the first slot of the second part, so it is always greater
/// than `q.begin`. Single-slot chunks and chunks contained in `p` are not cut.
pub fn split_points(p: &Chunk, q: &Chunk) -> Vec<Slot> {
    if q.begin == q.end || p.contains(q) {
        return Vec::new();
    }
    let mut points = Vec::with_capacity(2);
    if q.begin < p.begin && p.begin <= q.end {
        points.push(p.begin);
    }
    if q.begin <= p.end && p.end < q.end {
        points.push(p.end + 1);
    }
    points
}

/// Replace every targeted chunk by its pieces.
fn apply_splits(chunks: &mut BTreeSet<Chunk>, splits: Splits) {
    for (target, points) in splits {
        if points.is_empty() || !chunks.remove(&target) {
            continue;
        }
        let mut begin = target.begin;
        for point in points {
            chunks.insert(Chunk::new(target.node, begin, point - 1));
            begin = point;
        }
        chunks.insert(Chunk::new(target.node, begin, target.end));
    }
}

/// Fragment the chunks of all types in place.
///
/// `chunks[i]` holds the chunks of the type at canonical position `i`; the
/// last position is the slot type, whose chunks are never cut. `sort_key`
/// gives the canonical rank of a node and breaks ties between chunks of equal
/// length: the one starting at the lower-ranked slot, then the one of the
/// lower-ranked node, counts as the longer one.
pub fn fragment<K>(chunks: &mut [BTreeSet<Chunk>], sort_key: K)
where
    K: Fn(Node) -> u32,
{
    let type_count = chunks.len();
    let cut_types = type_count.saturating_sub(1);

    for p in 0..type_count {
        if chunks[p].is_empty() {
            continue;
        }

        let mut sorted: Vec<Chunk> = chunks[p].iter().copied().collect();
        sorted.sort_by_key(|c| (Reverse(c.len()), sort_key(c.begin), sort_key(c.node)));

        let mut splits = Splits::new();
        for (i, bigger) in sorted.iter().enumerate() {
            for smaller in &sorted[i + 1..] {
                splits
                    .entry(*smaller)
                    .or_default()
                    .extend(split_points(bigger, smaller));
            }
        }
        apply_splits(&mut chunks[p], splits);

        for q in p + 1..cut_types {
            if chunks[q].is_empty() {
                continue;
            }
            let mut splits = Splits::new();
            for q_chunk in &chunks[q] {
                for p_chunk in &chunks[p] {
                    splits
                        .entry(*q_chunk)
                        .or_default()
                        .extend(split_points(p_chunk, q_chunk));
                }
            }
            apply_splits(&mut chunks[q], splits);
        }
    }
}

/// Whether no two chunks partially overlap.
pub fn is_laminar<'a, I>(chunks: I) -> bool
where
    I: IntoIterator<Item = &'a Chunk>,
{
    let chunks: Vec<&Chunk> = chunks.into_iter().collect();
    chunks.iter().enumerate().all(|(i, a)| {
        chunks[i + 1..]
            .iter()
            .all(|b| a.is_disjoint(b) || a.contains(b) || b.contains(a))
    })
}
