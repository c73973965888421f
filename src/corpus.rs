//! The loaded corpus: all tables plus the feature registry.

use crate::data::CorpusData;
use crate::locality::{embedded_candidates, is_subset, Locality, SlotIndex};
use crate::registry::Registry;
use crate::{
    ComputedFeature, CorpusError, CorpusResult, EdgeFeature, Extent, ExtentTable, FeatureHandle,
    FeatureKind, Node, NodeFeature, RankIndex, TypeTable, Value,
};
use once_cell::sync::OnceCell;
use std::collections::BTreeSet;
use std::sync::Arc;
use tracing::{debug, warn};

/// An immutable, validated corpus.
///
/// Construction either succeeds with every table consistent or fails with the
/// first integrity violation found; there is no partially loaded state.
/// `Corpus` is `Send + Sync` and can be shared behind an `Arc`.
#[derive(Debug)]
pub struct Corpus {
    otype: Arc<TypeTable>,
    oslots: ExtentTable,
    rank: Arc<RankIndex>,
    features: Registry,
    slot_index: OnceCell<SlotIndex>,
}

impl Corpus {
    pub fn load(data: CorpusData) -> CorpusResult<Self> {
        if data.max_node().is_none() {
            return Err(CorpusError::NodeSpaceOverflow {
                max_slot: data.max_slot,
                non_slots: data.otypes.len(),
            });
        }

        let CorpusData {
            max_slot,
            slot_type,
            otypes,
            oslots,
            rank,
            levels,
            node_features,
            edge_features,
        } = data;

        if otypes.len() != oslots.len() {
            return Err(CorpusError::TableLengthMismatch {
                otypes: otypes.len(),
                oslots: oslots.len(),
            });
        }

        let otype = Arc::new(TypeTable::build(&slot_type, max_slot, &otypes, levels)?);
        let oslots = ExtentTable::build(max_slot, &oslots)?;
        let rank = Arc::new(RankIndex::build(otype.max_node(), rank)?);

        let mut features = Registry::new();
        for (name, data) in node_features {
            let feature = NodeFeature::build(&name, data, rank.clone(), otype.clone())?;
            features.insert(name, FeatureHandle::Node(feature));
        }
        for (name, data) in edge_features {
            let feature = EdgeFeature::build(&name, data, rank.clone(), otype.clone())?;
            if features.insert(name.clone(), FeatureHandle::Edge(feature)).is_some() {
                return Err(CorpusError::DuplicateFeature { name });
            }
        }

        debug!(
            max_slot,
            max_node = otype.max_node(),
            types = otype.all_types().len(),
            features = features.len(),
            "corpus loaded"
        );

        Ok(Self {
            otype,
            oslots,
            rank,
            features,
            slot_index: OnceCell::new(),
        })
    }

    /// Register a computed feature. Must happen before the corpus is shared.
    pub fn with_computed(mut self, name: impl Into<String>, feature: ComputedFeature) -> CorpusResult<Self> {
        let name = name.into();
        if self.features.contains_key(&name) {
            return Err(CorpusError::DuplicateFeature { name });
        }
        self.features.insert(name, FeatureHandle::Computed(feature));
        Ok(self)
    }

    pub fn otype(&self) -> &TypeTable {
        &self.otype
    }

    pub fn oslots(&self) -> &ExtentTable {
        &self.oslots
    }

    pub fn rank(&self) -> &RankIndex {
        &self.rank
    }

    pub fn slot_type(&self) -> &str {
        self.otype.slot_type()
    }

    pub fn max_slot(&self) -> Node {
        self.otype.max_slot()
    }

    pub fn max_node(&self) -> Node {
        self.otype.max_node()
    }

    pub fn type_of(&self, n: Node) -> Option<&str> {
        self.otype.type_of(n)
    }

    pub fn extent_of(&self, n: Node) -> Extent<'_> {
        self.oslots.extent_of(n)
    }

    pub fn sort_key(&self, n: Node) -> u32 {
        self.rank.sort_key(n)
    }

    pub fn sort_nodes<I: IntoIterator<Item = Node>>(&self, nodes: I) -> Vec<Node> {
        self.rank.sort_nodes(nodes)
    }

    /// Node feature by name; logs and returns `None` when it is not loaded.
    pub fn fs(&self, name: &str) -> Option<&NodeFeature> {
        self.lookup(name, FeatureKind::Node, FeatureHandle::as_node).ok()
    }

    /// Edge feature by name; logs and returns `None` when it is not loaded.
    pub fn es(&self, name: &str) -> Option<&EdgeFeature> {
        self.lookup(name, FeatureKind::Edge, FeatureHandle::as_edge).ok()
    }

    /// Computed feature by name; logs and returns `None` when it is not loaded.
    pub fn cs(&self, name: &str) -> Option<&ComputedFeature> {
        self.lookup(name, FeatureKind::Computed, FeatureHandle::as_computed).ok()
    }

    pub fn node_feature(&self, name: &str) -> CorpusResult<&NodeFeature> {
        self.lookup(name, FeatureKind::Node, FeatureHandle::as_node)
    }

    pub fn edge_feature(&self, name: &str) -> CorpusResult<&EdgeFeature> {
        self.lookup(name, FeatureKind::Edge, FeatureHandle::as_edge)
    }

    pub fn computed_feature(&self, name: &str) -> CorpusResult<&ComputedFeature> {
        self.lookup(name, FeatureKind::Computed, FeatureHandle::as_computed)
    }

    fn lookup<'a, T>(
        &'a self,
        name: &str,
        kind: FeatureKind,
        project: impl Fn(&'a FeatureHandle) -> Option<&'a T>,
    ) -> CorpusResult<&'a T> {
        match self.features.get(name).and_then(project) {
            Some(feature) => Ok(feature),
            None => {
                warn!(feature = name, %kind, "feature not loaded");
                Err(CorpusError::FeatureNotLoaded {
                    kind,
                    name: name.to_string(),
                })
            }
        }
    }

    /// Value of a node or computed feature for `n`.
    ///
    /// Unknown names are logged and yield `None`, like missing values.
    pub fn feature_value(&self, name: &str, n: Node) -> Option<Value> {
        match self.features.get(name) {
            Some(FeatureHandle::Node(feature)) => feature.value_of(n).cloned(),
            Some(FeatureHandle::Computed(feature)) => feature.value_of(n),
            _ => {
                warn!(feature = name, "node feature not loaded");
                None
            }
        }
    }

    pub fn all_node_features(&self) -> Vec<&str> {
        self.names_where(|handle| matches!(handle, FeatureHandle::Node(_)))
    }

    pub fn all_edge_features(&self) -> Vec<&str> {
        self.names_where(|handle| matches!(handle, FeatureHandle::Edge(_)))
    }

    pub fn all_computed_features(&self) -> Vec<&str> {
        self.names_where(|handle| matches!(handle, FeatureHandle::Computed(_)))
    }

    fn names_where(&self, keep: impl Fn(&FeatureHandle) -> bool) -> Vec<&str> {
        self.features
            .iter()
            .filter(|(_, handle)| keep(handle))
            .map(|(name, _)| name.as_str())
            .collect()
    }

    fn slot_index(&self) -> &SlotIndex {
        self.slot_index
            .get_or_init(|| SlotIndex::build(&self.otype, &self.oslots))
    }

    /// All nodes other than `n` whose slots include every slot of `n`,
    /// in canonical order.
    pub fn embedders(&self, n: Node) -> Vec<Node> {
        let slots = self.extent_of(n);
        let first = match slots.first() {
            Some(&first) => first,
            None => return Vec::new(),
        };
        let mut result: Vec<Node> = self
            .slot_index()
            .containing(first)
            .iter()
            .copied()
            .filter(|&m| m != n && is_subset(&slots, &self.extent_of(m)))
            .collect();
        result.sort_by_key(|&m| self.sort_key(m));
        result
    }
}

impl Locality for Corpus {
    fn embedded(&self, n: Node, types: Option<&BTreeSet<String>>) -> Vec<Node> {
        if n <= self.max_slot() || n > self.max_node() {
            return Vec::new();
        }
        let slots = self.extent_of(n);
        let mut result: Vec<Node> = embedded_candidates(self.slot_index(), &slots)
            .into_iter()
            .filter(|&m| m != n)
            .filter(|&m| match types {
                None => true,
                Some(types) => self.type_of(m).map_or(false, |t| types.contains(t)),
            })
            .filter(|&m| is_subset(&self.extent_of(m), &slots))
            .collect();
        result.sort_by_key(|&m| self.sort_key(m));
        result
    }
}
