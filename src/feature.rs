//! Node features: sparse node → value maps.

use crate::{CorpusError, CorpusResult, Node, RankIndex, TypeTable, Value};
use once_cell::sync::OnceCell;
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

/// Storage for a node feature, chosen by how much of the node space it covers.
#[derive(Debug)]
enum Storage {
    /// Indexed by `node - 1`.
    Dense(Vec<Option<Value>>),
    Sparse(HashMap<Node, Value>),
}

#[derive(Debug)]
pub struct NodeFeature {
    storage: Storage,
    len: usize,
    /// Value → nodes in canonical order, built on the first reverse lookup.
    by_value: OnceCell<HashMap<Value, Vec<Node>>>,
    rank: Arc<RankIndex>,
    otype: Arc<TypeTable>,
}

impl NodeFeature {
    pub(crate) fn build(
        name: &str,
        data: BTreeMap<Node, Value>,
        rank: Arc<RankIndex>,
        otype: Arc<TypeTable>,
    ) -> CorpusResult<Self> {
        let max_node = otype.max_node();
        if let Some(&node) = data.keys().find(|&&n| n == 0 || n > max_node) {
            return Err(CorpusError::NodeOutOfRange {
                feature: name.to_string(),
                node,
                max_node,
            });
        }

        let len = data.len();
        // Dense once at least half of the nodes carry a value.
        let storage = if len * 2 >= max_node as usize && len > 0 {
            let mut values = vec![None; max_node as usize];
            for (n, value) in data {
                values[n as usize - 1] = Some(value);
            }
            Storage::Dense(values)
        } else {
            Storage::Sparse(data.into_iter().collect())
        };

        Ok(Self {
            storage,
            len,
            by_value: OnceCell::new(),
            rank,
            otype,
        })
    }

    pub fn is_dense(&self) -> bool {
        matches!(self.storage, Storage::Dense(_))
    }

    pub fn value_of(&self, n: Node) -> Option<&Value> {
        match &self.storage {
            Storage::Dense(values) => {
                if n == 0 {
                    return None;
                }
                values.get(n as usize - 1).and_then(Option::as_ref)
            }
            Storage::Sparse(values) => values.get(&n),
        }
    }

    /// Every node that has a value, with that value. Order is unspecified.
    pub fn items(&self) -> Box<dyn Iterator<Item = (Node, &Value)> + '_> {
        match &self.storage {
            Storage::Dense(values) => Box::new(
                values
                    .iter()
                    .enumerate()
                    .filter_map(|(i, v)| v.as_ref().map(|v| (i as Node + 1, v))),
            ),
            Storage::Sparse(values) => Box::new(values.iter().map(|(&n, v)| (n, v))),
        }
    }

    /// All nodes carrying `value`, in canonical order.
    pub fn nodes_with(&self, value: &Value) -> Vec<Node> {
        self.by_value().get(value).cloned().unwrap_or_default()
    }

    fn by_value(&self) -> &HashMap<Value, Vec<Node>> {
        self.by_value.get_or_init(|| {
            let mut index: HashMap<Value, Vec<Node>> = HashMap::new();
            for (n, value) in self.items() {
                index.entry(value.clone()).or_default().push(n);
            }
            for nodes in index.values_mut() {
                nodes.sort_by_key(|&n| self.rank.sort_key(n));
            }
            index
        })
    }

    /// Value frequencies, most frequent first, ties by ascending value.
    ///
    /// With `node_types`, only nodes of those types are counted.
    pub fn freq_list(&self, node_types: Option<&[&str]>) -> Vec<(Value, usize)> {
        let mut counts: HashMap<&Value, usize> = HashMap::new();
        for (n, value) in self.items() {
            if let Some(types) = node_types {
                match self.otype.type_of(n) {
                    Some(t) if types.contains(&t) => {}
                    _ => continue,
                }
            }
            *counts.entry(value).or_insert(0) += 1;
        }
        let mut freqs: Vec<(Value, usize)> = counts
            .into_iter()
            .map(|(value, count)| (value.clone(), count))
            .collect();
        freqs.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        freqs
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::Level;

    // Slots 1..=4, phrase 5 and 6; rank puts phrases before the slots they cover.
    fn tables() -> (Arc<RankIndex>, Arc<TypeTable>) {
        let levels = vec![Level::new("phrase", 2.0, 1, 4), Level::new("word", 1.0, 1, 4)];
        let otype = TypeTable::build("word", 4, &["phrase".into(), "phrase".into()], levels).unwrap();
        let rank = RankIndex::build(6, vec![1, 2, 4, 5, 0, 3]).unwrap();
        (Arc::new(rank), Arc::new(otype))
    }

    fn feature(pairs: &[(Node, Value)]) -> NodeFeature {
        let (rank, otype) = tables();
        NodeFeature::build("pos", pairs.iter().cloned().collect(), rank, otype).unwrap()
    }

    #[test]
    fn value_lookup_and_absence() {
        let pos = feature(&[(1, "det".into()), (2, "noun".into())]);
        assert!(!pos.is_dense());
        assert_eq!(pos.value_of(1), Some(&Value::from("det")));
        assert_eq!(pos.value_of(3), None);
        assert_eq!(pos.value_of(0), None);
    }

    #[test]
    fn dense_storage_when_most_nodes_have_values() {
        let pos = feature(&[
            (1, "det".into()),
            (2, "noun".into()),
            (3, "verb".into()),
            (4, "noun".into()),
        ]);
        assert!(pos.is_dense());
        assert_eq!(pos.value_of(4), Some(&Value::from("noun")));
        assert_eq!(pos.value_of(5), None);
        assert_eq!(pos.value_of(0), None);
        assert_eq!(pos.value_of(99), None);
    }

    #[test]
    fn nodes_with_follows_rank() {
        let kind = feature(&[
            (6, "np".into()),
            (1, "np".into()),
            (5, "np".into()),
            (2, "vp".into()),
        ]);
        // ranks: 5 -> 0, 1 -> 1, 6 -> 3
        assert_eq!(kind.nodes_with(&"np".into()), vec![5, 1, 6]);
        assert!(kind.nodes_with(&"pp".into()).is_empty());
    }

    #[test]
    fn reverse_index_is_built_on_first_lookup() {
        let kind = feature(&[(1, "np".into()), (5, "np".into()), (2, "vp".into())]);
        assert!(kind.by_value.get().is_none());

        assert_eq!(kind.nodes_with(&"vp".into()), vec![2]);
        let index = kind.by_value.get().unwrap();
        assert_eq!(index.len(), 2);
        assert_eq!(index[&Value::from("np")], vec![5, 1]);

        // later lookups reuse the same index
        assert_eq!(kind.nodes_with(&"np".into()), vec![5, 1]);
        assert!(std::ptr::eq(index, kind.by_value.get().unwrap()));
    }

    #[test]
    fn freq_list_sorts_by_count_then_value() {
        let kind = feature(&[
            (1, "b".into()),
            (2, "a".into()),
            (3, "b".into()),
            (5, "a".into()),
            (6, "c".into()),
        ]);
        assert_eq!(
            kind.freq_list(None),
            vec![("a".into(), 2), ("b".into(), 2), ("c".into(), 1)]
        );
        assert_eq!(
            kind.freq_list(Some(&["phrase"])),
            vec![("a".into(), 1), ("c".into(), 1)]
        );
    }

    #[test]
    fn rejects_nodes_outside_the_corpus() {
        let (rank, otype) = tables();
        let data = [(7, Value::from(1))].into_iter().collect();
        let err = NodeFeature::build("pos", data, rank, otype).unwrap_err();
        assert_eq!(
            err,
            CorpusError::NodeOutOfRange {
                feature: "pos".into(),
                node: 7,
                max_node: 6
            }
        );
    }
}
