//! Node extents.
//!
//! The extents of all non-slot nodes live in one flat slot array with an
//! offset table, so a lookup is two index operations and no per-node
//! allocation is kept alive.

use crate::{CorpusError, CorpusResult, Node, Slot};
use std::ops::Deref;

/// The slots of one node, in ascending order.
///
/// Derefs to `[Slot]`. Slots own a single-element extent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Extent<'a> {
    Slot([Slot; 1]),
    Span(&'a [Slot]),
}

impl<'a> Deref for Extent<'a> {
    type Target = [Slot];

    fn deref(&self) -> &[Slot] {
        match self {
            Extent::Slot(slot) => &slot[..],
            Extent::Span(slots) => *slots,
        }
    }
}

#[derive(Debug)]
pub struct ExtentTable {
    max_slot: Slot,
    offsets: Vec<u32>,
    slots: Vec<Slot>,
}

impl ExtentTable {
    pub(crate) fn build(max_slot: Slot, oslots: &[Vec<Slot>]) -> CorpusResult<Self> {
        let total: usize = oslots.iter().map(Vec::len).sum();
        let mut offsets = Vec::with_capacity(oslots.len() + 1);
        let mut slots = Vec::with_capacity(total);
        offsets.push(0);

        for (i, extent) in oslots.iter().enumerate() {
            let node = max_slot + 1 + i as Node;
            if extent.is_empty() {
                return Err(CorpusError::EmptyExtent { node });
            }
            let mut prev = 0;
            for &slot in extent {
                if slot < 1 || slot > max_slot {
                    return Err(CorpusError::SlotOutOfRange {
                        node,
                        slot,
                        max_slot,
                    });
                }
                if slot <= prev {
                    return Err(CorpusError::UnorderedExtent { node });
                }
                prev = slot;
            }
            slots.extend_from_slice(extent);
            offsets.push(slots.len() as u32);
        }

        Ok(Self {
            max_slot,
            offsets,
            slots,
        })
    }

    /// The slots of a node; empty for node `0` and nodes past `max_node`.
    pub fn extent_of(&self, n: Node) -> Extent<'_> {
        if n == 0 {
            return Extent::Span(&[]);
        }
        if n <= self.max_slot {
            return Extent::Slot([n]);
        }
        let i = (n - self.max_slot - 1) as usize;
        match (self.offsets.get(i), self.offsets.get(i + 1)) {
            (Some(&b), Some(&e)) => Extent::Span(&self.slots[b as usize..e as usize]),
            _ => Extent::Span(&[]),
        }
    }

    /// First and last slot of a node.
    pub fn span_of(&self, n: Node) -> Option<(Slot, Slot)> {
        let extent = self.extent_of(n);
        match (extent.first(), extent.last()) {
            (Some(&b), Some(&e)) => Some((b, e)),
            _ => None,
        }
    }
}
