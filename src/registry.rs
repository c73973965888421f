//! Name → feature registry.

use crate::{EdgeFeature, Node, NodeFeature, Value};
use std::collections::BTreeMap;
use std::fmt::Debug;
use std::sync::Arc;

/// A node feature whose values are computed on demand.
#[derive(Clone)]
pub struct ComputedFeature {
    compute: Arc<dyn Fn(Node) -> Option<Value> + Send + Sync>,
}

impl Debug for ComputedFeature {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ComputedFeature").finish_non_exhaustive()
    }
}

impl ComputedFeature {
    pub fn new<F>(compute: F) -> Self
    where
        F: Fn(Node) -> Option<Value> + Send + Sync + 'static,
    {
        Self {
            compute: Arc::new(compute),
        }
    }

    pub fn value_of(&self, n: Node) -> Option<Value> {
        (self.compute)(n)
    }
}

/// A loaded feature of any kind.
#[derive(Debug)]
pub enum FeatureHandle {
    Node(NodeFeature),
    Edge(EdgeFeature),
    Computed(ComputedFeature),
}

impl FeatureHandle {
    pub fn as_node(&self) -> Option<&NodeFeature> {
        match self {
            FeatureHandle::Node(feature) => Some(feature),
            _ => None,
        }
    }

    pub fn as_edge(&self) -> Option<&EdgeFeature> {
        match self {
            FeatureHandle::Edge(feature) => Some(feature),
            _ => None,
        }
    }

    pub fn as_computed(&self) -> Option<&ComputedFeature> {
        match self {
            FeatureHandle::Computed(feature) => Some(feature),
            _ => None,
        }
    }
}

pub(crate) type Registry = BTreeMap<String, FeatureHandle>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn computed_feature_calls_its_closure() {
        let parity = ComputedFeature::new(|n| Some(Value::from((n % 2) as i64)));
        assert_eq!(parity.value_of(3), Some(Value::Int(1)));
        assert_eq!(parity.value_of(4), Some(Value::Int(0)));
        let handle = FeatureHandle::Computed(parity);
        assert!(handle.as_node().is_none());
        assert!(handle.as_computed().is_some());
    }

    #[test]
    fn computed_feature_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<ComputedFeature>();
        assert_send_sync::<FeatureHandle>();
    }
}
