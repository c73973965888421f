//! Chunks: contiguous pieces of a node's extent, with their boundary flags.

use crate::TextDirection;
use layered_corpus::{Node, Slot};
use std::collections::HashMap;

/// A node together with one contiguous slot range of its extent.
///
/// After fragmentation the range may be a sub-range of one of the node's
/// maximal runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Chunk {
    pub node: Node,
    /// First slot, inclusive.
    pub begin: Slot,
    /// Last slot, inclusive.
    pub end: Slot,
}

impl Chunk {
    pub fn new(node: Node, begin: Slot, end: Slot) -> Self {
        Self { node, begin, end }
    }

    /// Number of slots covered.
    pub fn len(&self) -> u32 {
        self.end - self.begin + 1
    }

    pub fn contains(&self, other: &Chunk) -> bool {
        self.begin <= other.begin && other.end <= self.end
    }

    pub fn is_disjoint(&self, other: &Chunk) -> bool {
        self.end < other.begin || other.end < self.begin
    }
}

/// Maximal runs of consecutive slots, as inclusive `(begin, end)` pairs.
pub fn ranges_from_list(slots: &[Slot]) -> Vec<(Slot, Slot)> {
    let mut ranges: Vec<(Slot, Slot)> = Vec::new();
    for &s in slots {
        match ranges.last_mut() {
            Some((_, e)) if *e + 1 == s => *e = s,
            _ => ranges.push((s, s)),
        }
    }
    ranges
}

/// Left/right boundary flags of one node, keyed by slot.
///
/// `Some(true)`: the node itself starts (ends) here. `Some(false)`: one of its
/// runs starts (ends) here after (before) a gap. `None`: no run of the node
/// starts (ends) here.
pub(crate) type Bounds = HashMap<Slot, (Option<bool>, Option<bool>)>;

/// Boundary flags for the runs of one node.
pub(crate) fn bounds_of(ranges: &[(Slot, Slot)]) -> Bounds {
    let mut bounds = Bounds::new();
    let (min_slot, max_slot) = match (ranges.first(), ranges.last()) {
        (Some(&(b, _)), Some(&(_, e))) => (b, e),
        _ => return bounds,
    };
    for &(b, e) in ranges {
        bounds.insert(b, (Some(b == min_slot), if b == e { Some(e == max_slot) } else { None }));
        bounds.insert(e, (if b == e { Some(b == min_slot) } else { None }, Some(e == max_slot)));
    }
    bounds
}

/// How one side of a fragment relates to the node it belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Boundary {
    /// The node really starts or ends here.
    Node,
    /// A gap in the node's extent starts or ends here.
    Inner,
    /// The side was created by cutting the node; it is not a real boundary.
    Fragment,
}

impl Boundary {
    fn from_flag(flag: Option<bool>) -> Self {
        match flag {
            Some(true) => Boundary::Node,
            Some(false) => Boundary::Inner,
            None => Boundary::Fragment,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BoundaryClass {
    pub start: Boundary,
    pub end: Boundary,
}

impl BoundaryClass {
    pub(crate) fn of(chunk: &Chunk, bounds: Option<&Bounds>) -> Self {
        let flags = |slot: Slot| bounds.and_then(|bounds| bounds.get(&slot)).copied();
        Self {
            start: Boundary::from_flag(flags(chunk.begin).and_then(|(left, _)| left)),
            end: Boundary::from_flag(flags(chunk.end).and_then(|(_, right)| right)),
        }
    }

    /// CSS classes: `l`/`r` for inner boundaries, `lno`/`rno` for cut sides,
    /// nothing for true node boundaries. Sides swap for right-to-left text.
    pub fn css(&self, direction: TextDirection) -> String {
        let (start_cls, end_cls) = match direction {
            TextDirection::Ltr => ("l", "r"),
            TextDirection::Rtl => ("r", "l"),
        };
        let side = |boundary: Boundary, cls: &str| match boundary {
            Boundary::Node => None,
            Boundary::Inner => Some(cls.to_string()),
            Boundary::Fragment => Some(format!("{}no", cls)),
        };
        [side(self.start, start_cls), side(self.end, end_cls)]
            .iter()
            .flatten()
            .cloned()
            .collect::<Vec<_>>()
            .join(" ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ranges_split_at_gaps() {
        assert_eq!(ranges_from_list(&[1, 2, 5, 6]), vec![(1, 2), (5, 6)]);
        assert_eq!(ranges_from_list(&[3]), vec![(3, 3)]);
        assert_eq!(ranges_from_list(&[1, 3, 4, 7]), vec![(1, 1), (3, 4), (7, 7)]);
        assert!(ranges_from_list(&[]).is_empty());
    }

    #[test]
    fn bounds_distinguish_node_and_gap_boundaries() {
        let bounds = bounds_of(&ranges_from_list(&[1, 2, 5, 6]));
        assert_eq!(bounds[&1], (Some(true), None));
        assert_eq!(bounds[&2], (None, Some(false)));
        assert_eq!(bounds[&5], (Some(false), None));
        assert_eq!(bounds[&6], (None, Some(true)));
        assert!(!bounds.contains_key(&3));
    }

    #[test]
    fn single_slot_runs_carry_both_flags() {
        let bounds = bounds_of(&ranges_from_list(&[2, 4, 5]));
        assert_eq!(bounds[&2], (Some(true), Some(false)));
        assert_eq!(bounds[&4], (Some(false), None));
        assert_eq!(bounds[&5], (None, Some(true)));
    }

    #[test]
    fn boundary_css() {
        let bounds = bounds_of(&ranges_from_list(&[1, 2, 3, 4, 7, 8]));
        let whole = BoundaryClass::of(&Chunk::new(9, 1, 4), Some(&bounds));
        assert_eq!(whole.start, Boundary::Node);
        assert_eq!(whole.end, Boundary::Inner);
        assert_eq!(whole.css(TextDirection::Ltr), "r");
        assert_eq!(whole.css(TextDirection::Rtl), "l");

        let cut = BoundaryClass::of(&Chunk::new(9, 3, 4), Some(&bounds));
        assert_eq!(cut.css(TextDirection::Ltr), "lno r");

        let last = BoundaryClass::of(&Chunk::new(9, 7, 8), Some(&bounds));
        assert_eq!(last.css(TextDirection::Ltr), "l");

        let unknown = BoundaryClass::of(&Chunk::new(9, 2, 3), None);
        assert_eq!(unknown.css(TextDirection::Ltr), "lno rno");
    }

    #[test]
    fn chunk_relations() {
        let a = Chunk::new(1, 1, 4);
        let b = Chunk::new(2, 2, 3);
        let c = Chunk::new(3, 5, 6);
        assert!(a.contains(&b));
        assert!(!b.contains(&a));
        assert!(a.is_disjoint(&c));
        assert_eq!(a.len(), 4);
    }
}
