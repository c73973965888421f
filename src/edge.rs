//! Edge features: node → target maps with an inverse for backward traversal.

use crate::data::EdgeData;
use crate::{CorpusError, CorpusResult, Node, RankIndex, TypeTable, Value};
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

type Adjacency = HashMap<Node, Vec<(Node, Option<Value>)>>;

/// Result of [`EdgeFeature::freq_list`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EdgeFrequency {
    /// Labeled edges: label frequencies, most frequent first.
    Values(Vec<(Option<Value>, usize)>),
    /// Plain edges: number of edges.
    Count(usize),
}

#[derive(Debug)]
pub struct EdgeFeature {
    has_values: bool,
    forward: Adjacency,
    inverse: Adjacency,
    rank: Arc<RankIndex>,
    otype: Arc<TypeTable>,
}

impl EdgeFeature {
    pub(crate) fn build(
        name: &str,
        data: EdgeData,
        rank: Arc<RankIndex>,
        otype: Arc<TypeTable>,
    ) -> CorpusResult<Self> {
        let (has_values, forward, inverse) = match data {
            EdgeData::Plain { forward, inverse } => {
                (false, plain_adjacency(forward), inverse.map(plain_adjacency))
            }
            EdgeData::Valued { forward, inverse } => {
                (true, valued_adjacency(forward), inverse.map(valued_adjacency))
            }
        };

        let max_node = otype.max_node();
        let out_of_range = |n: Node| n == 0 || n > max_node;
        for (&n, targets) in forward.iter().chain(inverse.iter().flatten()) {
            let bad = std::iter::once(n)
                .chain(targets.iter().map(|(m, _)| *m))
                .find(|&m| out_of_range(m));
            if let Some(node) = bad {
                return Err(CorpusError::NodeOutOfRange {
                    feature: name.to_string(),
                    node,
                    max_node,
                });
            }
        }

        let inverse = match inverse {
            Some(inverse) => inverse,
            None => invert(&forward),
        };

        Ok(Self {
            has_values,
            forward,
            inverse,
            rank,
            otype,
        })
    }

    pub fn has_values(&self) -> bool {
        self.has_values
    }

    /// Edges leaving `n`, ordered by the rank of their targets.
    pub fn outgoing(&self, n: Node) -> Vec<(Node, Option<&Value>)> {
        self.sorted(self.forward.get(&n))
    }

    /// Edges arriving at `n`, ordered by the rank of their sources.
    pub fn incoming(&self, n: Node) -> Vec<(Node, Option<&Value>)> {
        self.sorted(self.inverse.get(&n))
    }

    pub fn outgoing_nodes(&self, n: Node) -> Vec<Node> {
        self.outgoing(n).into_iter().map(|(m, _)| m).collect()
    }

    pub fn incoming_nodes(&self, n: Node) -> Vec<Node> {
        self.incoming(n).into_iter().map(|(m, _)| m).collect()
    }

    fn sorted<'a>(
        &self,
        edges: Option<&'a Vec<(Node, Option<Value>)>>,
    ) -> Vec<(Node, Option<&'a Value>)> {
        let mut edges: Vec<(Node, Option<&Value>)> = edges
            .into_iter()
            .flatten()
            .map(|(m, value)| (*m, value.as_ref()))
            .collect();
        edges.sort_by_key(|(m, _)| self.rank.sort_key(*m));
        edges
    }

    /// Label frequencies (labeled edges) or edge count (plain edges).
    ///
    /// The optional filters restrict the types of the source and target nodes.
    pub fn freq_list(&self, from_types: Option<&[&str]>, to_types: Option<&[&str]>) -> EdgeFrequency {
        let accepts = |types: Option<&[&str]>, n: Node| match types {
            None => true,
            Some(types) => self
                .otype
                .type_of(n)
                .map_or(false, |t| types.contains(&t)),
        };

        let edges = self
            .forward
            .iter()
            .filter(|(&n, _)| accepts(from_types, n))
            .flat_map(|(_, targets)| targets.iter())
            .filter(|(m, _)| accepts(to_types, *m));

        if !self.has_values {
            return EdgeFrequency::Count(edges.count());
        }

        let mut counts: HashMap<Option<&Value>, usize> = HashMap::new();
        for (_, value) in edges {
            *counts.entry(value.as_ref()).or_insert(0) += 1;
        }
        let mut freqs: Vec<(Option<Value>, usize)> = counts
            .into_iter()
            .map(|(value, count)| (value.cloned(), count))
            .collect();
        freqs.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        EdgeFrequency::Values(freqs)
    }
}

fn plain_adjacency(map: BTreeMap<Node, Vec<Node>>) -> Adjacency {
    map.into_iter()
        .map(|(n, targets)| (n, targets.into_iter().map(|m| (m, None)).collect()))
        .collect()
}

fn valued_adjacency(map: BTreeMap<Node, BTreeMap<Node, Option<Value>>>) -> Adjacency {
    map.into_iter()
        .map(|(n, targets)| (n, targets.into_iter().collect()))
        .collect()
}

/// Group the forward map by target, keeping edge values.
fn invert(forward: &Adjacency) -> Adjacency {
    let mut inverse: Adjacency = HashMap::new();
    for (&n, targets) in forward {
        for (m, value) in targets {
            inverse.entry(*m).or_default().push((n, value.clone()));
        }
    }
    inverse
}
