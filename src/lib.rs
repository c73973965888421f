#![doc(
    html_logo_url = "https://raw.githubusercontent.com/storyscript/layered-nlp/main/assets/layered-nlp.svg",
    issue_tracker_base_url = "https://github.com/storyscript/layered-nlp/issues/"
)]

//! Data model for annotated text corpora.
//!
//! A corpus is a sequence of **slots** (words, characters, ...) and a set of
//! **nodes** spanning them (sentences, phrases, XML elements, ...). Every node
//! is an integer: nodes `1..=max_slot` are the slots themselves, higher nodes
//! are the non-slot nodes. Types and extents are looked up by offset, so a
//! corpus of millions of nodes needs no per-node objects.
//!
//! ## Core Types
//!
//! - [`TypeTable`] - node → type, type → slot support, canonical type order
//! - [`ExtentTable`] - node → ordered slots (gaps allowed)
//! - [`RankIndex`] - canonical total order over all nodes
//! - [`NodeFeature`] / [`EdgeFeature`] - sparse feature data with reverse lookups
//! - [`Corpus`] - validated bundle of all of the above plus a feature registry
//! - [`Locality`] - containment queries over extents
//!
//! ## Example
//!
//! ```
//! use layered_corpus::{Corpus, CorpusData, Level, Locality};
//!
//! let corpus = Corpus::load(CorpusData {
//!     max_slot: 3,
//!     slot_type: "word".into(),
//!     otypes: vec!["sentence".into()],
//!     oslots: vec![vec![1, 2, 3]],
//!     rank: vec![1, 2, 3, 0],
//!     levels: vec![
//!         Level::new("sentence", 3.0, 1, 3),
//!         Level::new("word", 1.0, 1, 3),
//!     ],
//!     node_features: Default::default(),
//!     edge_features: Default::default(),
//! })
//! .unwrap();
//!
//! assert_eq!(corpus.type_of(4), Some("sentence"));
//! assert_eq!(&*corpus.extent_of(2), &[2]);
//! assert_eq!(corpus.embedded(4, None), vec![1, 2, 3]);
//! ```

mod corpus;
mod data;
mod edge;
mod errors;
mod feature;
mod locality;
mod oslots;
mod otype;
mod rank;
mod registry;
mod value;

/// A slot: `1..=max_slot`.
pub type Slot = u32;
/// A node: `1..=max_node`; the first `max_slot` nodes are the slots.
pub type Node = u32;

pub use corpus::Corpus;
pub use data::{CorpusData, EdgeData, Level};
pub use edge::{EdgeFeature, EdgeFrequency};
pub use errors::{CorpusError, CorpusResult, FeatureKind};
pub use feature::NodeFeature;
pub use locality::Locality;
pub use oslots::{Extent, ExtentTable};
pub use otype::TypeTable;
pub use rank::RankIndex;
pub use registry::{ComputedFeature, FeatureHandle};
pub use value::Value;
