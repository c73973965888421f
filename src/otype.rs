//! Node types.
//!
//! Slots are never stored: every node up to `max_slot` has the slot type.
//! Non-slot nodes store a `u16` code into the canonical type list, indexed by
//! `node - max_slot - 1`.

use crate::data::Level;
use crate::{CorpusError, CorpusResult, Node, Slot};
use std::collections::HashMap;
use std::ops::RangeInclusive;

#[derive(Debug)]
pub struct TypeTable {
    max_slot: Slot,
    codes: Vec<u16>,
    levels: Vec<Level>,
    /// Canonical type order, slot type last.
    names: Vec<String>,
    positions: HashMap<String, usize>,
}

impl TypeTable {
    pub(crate) fn build(
        slot_type: &str,
        max_slot: Slot,
        otypes: &[String],
        levels: Vec<Level>,
    ) -> CorpusResult<Self> {
        if levels.len() > u16::MAX as usize {
            return Err(CorpusError::TooManyTypes {
                count: levels.len(),
            });
        }
        if levels.last().map(|level| level.name.as_str()) != Some(slot_type) {
            return Err(CorpusError::SlotTypeNotLast {
                slot_type: slot_type.to_string(),
            });
        }

        let mut positions = HashMap::with_capacity(levels.len());
        for (position, level) in levels.iter().enumerate() {
            if level.min_slot < 1 || level.min_slot > level.max_slot || level.max_slot > max_slot {
                return Err(CorpusError::InvalidSupport {
                    name: level.name.clone(),
                    min_slot: level.min_slot,
                    max_slot: level.max_slot,
                });
            }
            if positions.insert(level.name.clone(), position).is_some() {
                return Err(CorpusError::DuplicateType {
                    name: level.name.clone(),
                });
            }
        }

        let codes = otypes
            .iter()
            .map(|name| match positions.get(name) {
                Some(&position) => Ok(position as u16),
                None => Err(CorpusError::UnknownType { name: name.clone() }),
            })
            .collect::<CorpusResult<Vec<u16>>>()?;

        let names = levels.iter().map(|level| level.name.clone()).collect();

        Ok(Self {
            max_slot,
            codes,
            levels,
            names,
            positions,
        })
    }

    pub fn slot_type(&self) -> &str {
        &self.names[self.names.len() - 1]
    }

    pub fn max_slot(&self) -> Slot {
        self.max_slot
    }

    pub fn max_node(&self) -> Node {
        self.max_slot + self.codes.len() as Node
    }

    /// The type of a node, or `None` for node `0` and nodes past `max_node`.
    pub fn type_of(&self, n: Node) -> Option<&str> {
        self.position_of(n).map(|position| self.names[position].as_str())
    }

    /// Canonical position of the type of `n`.
    pub fn position_of(&self, n: Node) -> Option<usize> {
        if n == 0 {
            None
        } else if n <= self.max_slot {
            Some(self.names.len() - 1)
        } else {
            self.codes
                .get((n - self.max_slot - 1) as usize)
                .map(|&code| code as usize)
        }
    }

    pub fn is_slot(&self, n: Node) -> bool {
        n >= 1 && n <= self.max_slot
    }

    /// All types in canonical order; the slot type is last.
    pub fn all_types(&self) -> &[String] {
        &self.names
    }

    /// Canonical position of a type.
    pub fn position(&self, name: &str) -> Option<usize> {
        self.positions.get(name).copied()
    }

    pub fn level(&self, name: &str) -> Option<&Level> {
        self.position(name).map(|position| &self.levels[position])
    }

    pub fn levels(&self) -> &[Level] {
        &self.levels
    }

    /// First and last slot covered by any node of this type.
    pub fn support_of(&self, name: &str) -> Option<(Slot, Slot)> {
        self.level(name).map(|level| (level.min_slot, level.max_slot))
    }

    /// The support of a type as an inclusive slot range.
    pub fn support_slots(&self, name: &str) -> Option<RangeInclusive<Slot>> {
        self.support_of(name).map(|(b, e)| b..=e)
    }

    /// All nodes of a type, in node order.
    pub fn nodes_of_type(&self, name: &str) -> Vec<Node> {
        let position = match self.position(name) {
            Some(position) => position,
            None => return Vec::new(),
        };
        if position == self.names.len() - 1 {
            return (1..=self.max_slot).collect();
        }
        self.codes
            .iter()
            .enumerate()
            .filter(|(_, &code)| code as usize == position)
            .map(|(i, _)| self.max_slot + 1 + i as Node)
            .collect()
    }
}
